//! Registration API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/registrations", routes())
}

fn routes() -> Router<ServerState> {
    // 公共表单提交
    let submit_routes = Router::new().route("/", post(handler::create));

    // 管理路由：需要管理员角色
    let manage_routes = Router::new()
        .route("/", get(handler::list))
        .route("/grouped", get(handler::grouped))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    submit_routes.merge(manage_routes)
}
