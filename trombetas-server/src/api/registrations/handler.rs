//! Registration API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use shared::group_by_member;
use shared::models::{
    GroupedRegistration, Member, Registration, RegistrationForm, RegistrationUpdate,
    StoredRegistration,
};

use crate::api::GroupQuery;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::RepoError;
use crate::roster::Roster;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn roster_member<'a>(roster: &'a Roster, name: &str) -> AppResult<&'a Member> {
    roster.find(name).ok_or_else(|| {
        AppError::new(ErrorCode::MemberNotInRoster).with_detail("memberName", name)
    })
}

fn registration_error(id: &str, err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => AppError::with_message(
            ErrorCode::RegistrationNotFound,
            format!("Registration {id} not found"),
        ),
        other => other.into(),
    }
}

/// POST /api/registrations - 公共表单提交
pub async fn create(
    State(state): State<ServerState>,
    Json(form): Json<RegistrationForm>,
) -> AppResult<ApiResponse<StoredRegistration>> {
    let visitors = form.validate()?;
    let member_name = form.member_name.trim();
    let member = roster_member(&state.roster, member_name)?;

    let stored = state
        .registrations
        .create(Registration {
            member_name: member.name.clone(),
            assistance_group: member.group.clone(),
            visitors,
            timestamp: Utc::now(),
        })
        .await?;

    tracing::info!(
        id = %stored.id,
        member = %stored.member_name,
        visitors = stored.visitors.len(),
        "Registration created"
    );
    Ok(ApiResponse::success(stored))
}

/// GET /api/registrations?group= - 按时间倒序
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<ApiResponse<Vec<StoredRegistration>>> {
    let registrations = state.registrations.find_by_group(&query.filter()).await?;
    Ok(ApiResponse::success(registrations))
}

/// GET /api/registrations/grouped?group= - 按成员合并
pub async fn grouped(
    State(state): State<ServerState>,
    Query(query): Query<GroupQuery>,
) -> AppResult<ApiResponse<Vec<GroupedRegistration>>> {
    let registrations = state.registrations.find_by_group(&query.filter()).await?;
    let grouped = group_by_member(registrations.iter().map(|r| &r.registration));
    Ok(ApiResponse::success(grouped))
}

/// PUT /api/registrations/{id}
///
/// The assistance group is re-derived from the roster when the member
/// changes; otherwise the stored group is kept.
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(form): Json<RegistrationForm>,
) -> AppResult<ApiResponse<StoredRegistration>> {
    let visitors = form.validate()?;
    let member_name = form.member_name.trim();

    let existing = state
        .registrations
        .find_by_id(&id)
        .await?
        .ok_or_else(|| registration_error(&id, RepoError::NotFound(id.clone())))?;

    let assistance_group = if existing.member_name == member_name {
        existing.assistance_group.clone()
    } else {
        roster_member(&state.roster, member_name)?.group.clone()
    };

    let updated = state
        .registrations
        .update(
            &id,
            RegistrationUpdate {
                member_name: member_name.to_string(),
                assistance_group,
                visitors,
            },
        )
        .await
        .map_err(|e| registration_error(&id, e))?;

    tracing::info!(id = %id, user = %current_user.username, "Registration updated");
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/registrations/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state
        .registrations
        .delete(&id)
        .await
        .map_err(|e| registration_error(&id, e))?;

    tracing::info!(id = %id, user = %current_user.username, "Registration deleted");
    Ok(ApiResponse::ok())
}
