//! Auth API 模块

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub use handler::{LoginRequest, LoginResponse};

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/auth",
        Router::new()
            .route("/login", post(handler::login))
            .route("/me", get(handler::me)),
    )
}
