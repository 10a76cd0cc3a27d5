use std::path::PathBuf;

use chrono_tz::Tz;
use shared::models::ChurchInfo;

use crate::utils::time::parse_timezone;

/// Document store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl StoreKind {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Self::Memory,
            "sqlite" => Self::Sqlite,
            other => {
                tracing::warn!(store = %other, "Unknown STORE, using sqlite");
                Self::Sqlite
            }
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STORE | sqlite | 文档存储: sqlite / memory |
/// | DATABASE_PATH | {WORK_DIR}/trombetas.db | SQLite 文件 |
/// | ROSTER_PATH | {WORK_DIR}/members.json | 成员名册 |
/// | TIMEZONE | America/Sao_Paulo | 报表日期时区 |
/// | ADMIN_PASSWORD_HASH / ADMIN_PASSWORD | - | 管理员密码 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | CHURCH_NAME / CHURCH_UNIT / CHURCH_EVENT / CHURCH_FORM_TITLE | - | 表单标题 |
///
/// JWT 相关变量见 [`JwtConfig`](crate::auth::JwtConfig)，日志变量见
/// [`LogConfig`](crate::LogConfig)。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/trombetas HTTP_PORT=8080 ADMIN_PASSWORD=segredo cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存放数据库、名册
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub store: StoreKind,
    pub database_path: Option<String>,
    pub roster_path: Option<String>,
    pub timezone: Tz,
    pub admin_password_hash: Option<String>,
    pub admin_password: Option<String>,
    pub church: ChurchInfo,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: env_or("WORK_DIR", "./data"),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: env_or("ENVIRONMENT", "development"),
            store: StoreKind::parse(&env_or("STORE", "sqlite")),
            database_path: env_opt("DATABASE_PATH"),
            roster_path: env_opt("ROSTER_PATH"),
            timezone: parse_timezone(&env_or("TIMEZONE", "America/Sao_Paulo")),
            admin_password_hash: env_opt("ADMIN_PASSWORD_HASH"),
            admin_password: env_opt("ADMIN_PASSWORD"),
            church: ChurchInfo {
                name: env_or("CHURCH_NAME", "Igreja Evangélica Assembleia de Deus"),
                unit: env_or("CHURCH_UNIT", "Unidade Central"),
                event: env_or("CHURCH_EVENT", "Festa das Trombetas"),
                form_title: env_or("CHURCH_FORM_TITLE", "Registro de Visitantes"),
            },
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.work_dir).join("trombetas.db"))
    }

    pub fn roster_path(&self) -> PathBuf {
        self.roster_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.work_dir).join("members.json"))
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
