//! Report API 模块 - 管理员

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub use handler::MissingMembersResponse;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/reports",
        Router::new()
            .route("/missing-members", get(handler::missing_members))
            .route("/visitors.pdf", get(handler::visitors_pdf))
            .route("/missing-members.pdf", get(handler::missing_members_pdf))
            .layer(middleware::from_fn(require_admin)),
    )
}
