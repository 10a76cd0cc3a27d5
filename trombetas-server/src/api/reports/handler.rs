//! Report Handlers

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use http::{HeaderValue, header};
use serde::Serialize;
use shared::models::Member;
use shared::report::ReportKind;
use shared::{GroupFilter, group_by_member};

use crate::api::GroupQuery;
use crate::core::ServerState;
use crate::reports::RenderedReport;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct MissingMembersResponse {
    pub count: usize,
    pub members: Vec<Member>,
}

async fn compute_missing(state: &ServerState, filter: &GroupFilter) -> AppResult<Vec<Member>> {
    let registrations = state.registrations.find_all().await?;
    Ok(shared::missing_members(
        state.roster.members(),
        registrations.iter().map(|r| &r.registration),
        filter.as_group(),
    ))
}

/// `attachment` with an ASCII `filename` and an RFC 6266 `filename*`
fn content_disposition(file_name: &str) -> HeaderValue {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

fn pdf_response(report: RenderedReport) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, content_disposition(&report.file_name)),
        ],
        report.bytes,
    )
        .into_response()
}

/// GET /api/reports/missing-members?group=
pub async fn missing_members(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<ApiResponse<MissingMembersResponse>> {
    let members = compute_missing(&state, &query.filter()).await?;
    Ok(ApiResponse::success(MissingMembersResponse {
        count: members.len(),
        members,
    }))
}

/// GET /api/reports/visitors.pdf?group=
pub async fn visitors_pdf(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<Response> {
    let filter = query.filter();
    let registrations = state.registrations.find_by_group(&filter).await?;
    let grouped = group_by_member(registrations.iter().map(|r| &r.registration));

    let document = state.reports.visitors_document(&grouped, &filter, Utc::now());
    let report = state.reports.render(ReportKind::Visitors, &filter, document).await?;
    Ok(pdf_response(report))
}

/// GET /api/reports/missing-members.pdf?group=
pub async fn missing_members_pdf(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<Response> {
    let filter = query.filter();
    let members = compute_missing(&state, &filter).await?;

    let document = state
        .reports
        .missing_members_document(&members, &filter, Utc::now());
    let report = state
        .reports
        .render(ReportKind::MissingMembers, &filter, document)
        .await?;
    Ok(pdf_response(report))
}
