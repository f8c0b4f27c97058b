//! Auto-apply session endpoints.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auto_apply::session::{load_session, save_session, AutoApplySession};
use crate::candidates::repository::get_or_create_profile;
use crate::db::require_user_type;
use crate::errors::AppError;
use crate::matching::filter::{filter_jobs, JobFilterCriteria};
use crate::matching::handlers::validate_criteria;
use crate::matching::ranking::rank_jobs;
use crate::models::profile::UserProfile;
use crate::models::user::USER_TYPE_CANDIDATE;
use crate::recruiter::jobs::list_active_postings;
use crate::state::AppState;

const LISTING_POOL_SIZE: i64 = 200;
const MAX_APPLICATIONS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct StartAutoApplyRequest {
    #[serde(default)]
    pub criteria: JobFilterCriteria,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub preferred_companies: Vec<String>,
    #[serde(default)]
    pub min_salary: u64,
    #[serde(default = "default_max_applications")]
    pub max_applications: usize,
}

fn default_max_applications() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct AutoApplyStatusResponse {
    pub status: &'static str,
    pub message: String,
    pub session: Option<AutoApplySession>,
}

/// POST /api/v1/auto-apply/start
///
/// Replaces any existing session for the user. Postings are queued best match first.
pub async fn handle_start(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<StartAutoApplyRequest>,
) -> Result<Json<AutoApplySession>, AppError> {
    if request.max_applications == 0 || request.max_applications > MAX_APPLICATIONS {
        return Err(AppError::Validation(format!(
            "max_applications must be between 1 and {MAX_APPLICATIONS}"
        )));
    }
    validate_criteria(&request.criteria)?;
    require_user_type(&state.db, params.user_id, USER_TYPE_CANDIDATE).await?;

    let candidate = get_or_create_profile(&state.db, params.user_id).await?;
    let profile = UserProfile {
        skills: candidate.skills,
        preferred_locations: request.preferred_locations,
        preferred_companies: request.preferred_companies,
        min_salary: request.min_salary,
        experience_years: candidate.experience_years,
    };

    let listings = list_active_postings(&state.db, LISTING_POOL_SIZE).await?;
    let matching = filter_jobs(listings, &request.criteria);
    let queued_job_ids = rank_jobs(&profile, matching, &state.policy, request.max_applications)
        .into_iter()
        .map(|r| r.job_id)
        .collect::<Vec<_>>();

    let session = AutoApplySession::start(
        params.user_id,
        request.criteria,
        request.max_applications,
        queued_job_ids,
    );
    save_session(state.sessions.as_ref(), &session, session_ttl(&state)).await?;

    info!(
        "Started auto-apply session {} for user {} ({} postings queued)",
        session.session_id,
        params.user_id,
        session.queued_job_ids.len()
    );
    Ok(Json(session))
}

/// POST /api/v1/auto-apply/stop
pub async fn handle_stop(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AutoApplySession>, AppError> {
    require_user_type(&state.db, params.user_id, USER_TYPE_CANDIDATE).await?;

    let mut session = require_active(load_session(state.sessions.as_ref(), params.user_id).await?)?;
    session.stop();
    save_session(state.sessions.as_ref(), &session, session_ttl(&state)).await?;

    info!("Stopped auto-apply session for user {}", params.user_id);
    Ok(Json(session))
}

/// GET /api/v1/auto-apply/status
pub async fn handle_status(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AutoApplyStatusResponse>, AppError> {
    require_user_type(&state.db, params.user_id, USER_TYPE_CANDIDATE).await?;

    let session = load_session(state.sessions.as_ref(), params.user_id).await?;
    Ok(Json(status_response(session)))
}

fn require_active(session: Option<AutoApplySession>) -> Result<AutoApplySession, AppError> {
    session
        .filter(AutoApplySession::is_active)
        .ok_or_else(|| AppError::NotFound("No active auto-application session found".to_string()))
}

fn status_response(session: Option<AutoApplySession>) -> AutoApplyStatusResponse {
    match session {
        Some(session) if session.is_active() => AutoApplyStatusResponse {
            status: "active",
            message: format!("{} postings queued", session.queued_job_ids.len()),
            session: Some(session),
        },
        Some(session) => AutoApplyStatusResponse {
            status: "stopped",
            message: "Auto-application session stopped".to_string(),
            session: Some(session),
        },
        None => AutoApplyStatusResponse {
            status: "inactive",
            message: "No auto-application sessions found".to_string(),
            session: None,
        },
    }
}

fn session_ttl(state: &AppState) -> Duration {
    Duration::from_secs(state.config.session_ttl_secs)
}
