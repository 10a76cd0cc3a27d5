//! Trombetas Server - 教会访客登记服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 文档存储 (SQLite / 内存)
//! - **名册** (`roster`): 成员名单 (只读 JSON)
//! - **认证** (`auth`): JWT + Argon2 管理员认证
//! - **报表** (`reports`): 访客 / 未登记成员 PDF
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! trombetas-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、密码
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 文档存储与仓储
//! ├── roster/        # 成员名册
//! ├── reports/       # 报表组装
//! └── utils/         # 日志、时间
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reports;
pub mod roster;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use roster::Roster;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{LogConfig, init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
 _____                _          _
|_   _| __ ___  _ __ | |__   ___| |_ __ _ ___
  | || '__/ _ \| '_ \| '_ \ / _ \ __/ _` / __|
  | || | | (_) | | | | |_) |  __/ || (_| \__ \
  |_||_|  \___/|_| |_|_.__/ \___|\__\__,_|___/
    "#
    );
}

/// 设置运行环境: 加载 .env, 初始化日志
///
/// 日志目录不存在时会先创建。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log = LogConfig::from_env();
    if let Some(dir) = &log.dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(&log);

    Ok(())
}
