//! Roster API 模块 - 表单的成员选择器

use axum::{Router, extract::State, routing::get};
use shared::models::Member;

use crate::core::ServerState;
use crate::utils::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/roster",
        Router::new()
            .route("/members", get(members))
            .route("/groups", get(groups)),
    )
}

/// Members sorted by name
async fn members(State(state): State<ServerState>) -> ApiResponse<Vec<Member>> {
    ApiResponse::success(state.roster.sorted_members())
}

async fn groups(State(state): State<ServerState>) -> ApiResponse<Vec<String>> {
    ApiResponse::success(state.roster.groups())
}
