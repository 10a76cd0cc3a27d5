//! Church header shown above the registration form

use axum::{Router, extract::State, routing::get};
use shared::models::ChurchInfo;

use crate::core::ServerState;
use crate::utils::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/church", get(info))
}

async fn info(State(state): State<ServerState>) -> ApiResponse<ChurchInfo> {
    ApiResponse::success(state.config.church.clone())
}
