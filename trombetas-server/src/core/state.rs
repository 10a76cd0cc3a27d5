use std::sync::Arc;

use crate::auth::{AdminCredential, JwtConfig, JwtService};
use crate::core::Config;
use crate::core::config::StoreKind;
use crate::db::repository::RegistrationRepository;
use crate::db::{DbService, DocumentStore, MemoryDocumentStore, SqliteDocumentStore};
use crate::reports::ReportRenderer;
use crate::roster::Roster;
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一次。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | registrations | 登记记录仓储 |
/// | roster | 成员名册 (只读) |
/// | jwt_service | JWT 认证服务 |
/// | admin | 管理员密码 |
/// | reports | PDF 报表 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub registrations: RegistrationRepository,
    pub roster: Roster,
    pub jwt_service: Arc<JwtService>,
    pub admin: Arc<AdminCredential>,
    pub reports: ReportRenderer,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("environment", &self.config.environment)
            .field("roster", &self.roster.len())
            .field("admin_enabled", &self.admin.is_enabled())
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录
    /// 2. 打开文档存储 (SQLite 或内存)
    /// 3. 加载成员名册
    /// 4. 解析管理员密码与 JWT 配置
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir).map_err(|e| {
            AppError::config(format!("Failed to create work dir {}: {e}", config.work_dir))
        })?;

        let store: Arc<dyn DocumentStore> = match config.store {
            StoreKind::Sqlite => {
                let path = config.database_path();
                let db = DbService::new(&path.to_string_lossy()).await?;
                Arc::new(SqliteDocumentStore::new(db.pool))
            }
            StoreKind::Memory => {
                tracing::warn!("Using in-memory store, registrations are lost on restart");
                Arc::new(MemoryDocumentStore::new())
            }
        };

        let roster = Roster::load(&config.roster_path())?;

        let admin = AdminCredential::resolve(
            config.admin_password_hash.as_deref(),
            config.admin_password.as_deref(),
        )?;
        if !admin.is_enabled() {
            tracing::warn!("ADMIN_PASSWORD not set, admin login is disabled");
        }

        let jwt = JwtConfig::from_env(config.is_production())
            .map_err(|e| AppError::config(e.to_string()))?;

        Ok(Self::with_parts(config.clone(), store, roster, admin, jwt))
    }

    /// Assemble a state from already built parts
    pub fn with_parts(
        config: Config,
        store: Arc<dyn DocumentStore>,
        roster: Roster,
        admin: AdminCredential,
        jwt: JwtConfig,
    ) -> Self {
        let reports = ReportRenderer::new(config.timezone);
        Self {
            config,
            registrations: RegistrationRepository::new(store),
            roster,
            jwt_service: Arc::new(JwtService::with_config(jwt)),
            admin: Arc::new(admin),
            reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_memory_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.store = StoreKind::Memory;
        config.roster_path = None;
        config.admin_password_hash = None;
        config.admin_password = Some("segredo".to_string());
        config.environment = "development".to_string();

        let state = ServerState::initialize(&config).await.unwrap();
        assert!(state.roster.is_empty());
        assert!(state.admin.verify("segredo"));
        assert!(state.registrations.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_sqlite_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.store = StoreKind::Sqlite;
        config.database_path = None;
        config.roster_path = None;
        config.environment = "development".to_string();

        ServerState::initialize(&config).await.unwrap();
        assert!(dir.path().join("trombetas.db").exists());
    }
}
