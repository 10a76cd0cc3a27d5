//! HTTP API
//!
//! | 模块 | 路径 | 认证 |
//! |------|------|------|
//! | health | /health | 公共 |
//! | church | /api/church | 公共 |
//! | roster | /api/roster/* | 公共 |
//! | auth | /api/auth/* | login 公共, me 需登录 |
//! | registrations | /api/registrations/* | POST 公共, 其余管理员 |
//! | reports | /api/reports/* | 管理员 |

pub mod auth;
pub mod church;
pub mod health;
pub mod registrations;
pub mod reports;
pub mod roster;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use http::{HeaderName, HeaderValue, StatusCode};
use serde::Deserialize;
use shared::GroupFilter;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// `?group=` query shared by listings and reports
#[derive(Debug, Default, Deserialize)]
pub struct GroupQuery {
    pub group: Option<String>,
}

impl GroupQuery {
    pub fn filter(&self) -> GroupFilter {
        GroupFilter::parse(self.group.as_deref())
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(church::router())
        .merge(roster::router())
        .merge(auth::router())
        .merge(registrations::router())
        .merge(reports::router())
}

/// Build the application with all middleware
///
/// Used by the HTTP server and by tests driving the router in-process.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        // JWT 认证 - 在路由之前执行，注入 CurrentUser
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(state.config.request_timeout_ms),
        ))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
