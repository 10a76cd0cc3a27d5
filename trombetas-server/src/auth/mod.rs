//! 认证授权模块
//!
//! 提供 JWT 认证、管理员密码和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`AdminCredential`] - 管理员密码 (Argon2)
//! - [`require_auth`] - 认证中间件
//! - [`require_admin`] - 管理员检查中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{ADMIN_ROLE, Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{is_public_api_route, require_admin, require_auth};
pub use password::{AdminCredential, hash_password, verify_password};
