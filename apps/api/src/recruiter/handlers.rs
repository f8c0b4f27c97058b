//! Recruiter endpoints: job postings and candidate ranking.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::candidates::repository::fetch_candidate_pool;
use crate::db::require_user_type;
use crate::errors::AppError;
use crate::matching::ranking::{rank_candidates, RankedCandidate, RANKING_CRITERIA};
use crate::models::job_posting::{JobPostingCreate, JobPostingRow, JobPostingUpdate};
use crate::models::user::USER_TYPE_RECRUITER;
use crate::recruiter::jobs::{create_posting, get_owned_posting, list_postings, update_posting};
use crate::state::AppState;

const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct RecruiterQuery {
    pub recruiter_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub recruiter_id: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_limit() -> i64 {
    100
}

fn default_active_only() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct RankCandidatesResponse {
    pub job_id: i64,
    pub job_title: String,
    pub total_candidates: usize,
    pub recommended_candidates: usize,
    pub ranked_candidates: Vec<RankedCandidate>,
    pub ranking_criteria: Vec<&'static str>,
}

/// POST /api/v1/recruiter/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Query(params): Query<RecruiterQuery>,
    Json(job): Json<JobPostingCreate>,
) -> Result<(StatusCode, Json<JobPostingRow>), AppError> {
    validate_job(&job)?;
    require_user_type(&state.db, params.recruiter_id, USER_TYPE_RECRUITER).await?;

    let created = create_posting(&state.db, params.recruiter_id, &job).await?;
    info!("Created job posting: {} at {}", created.title, created.company);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/recruiter/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<Vec<JobPostingRow>>, AppError> {
    validate_page(params.skip, params.limit)?;
    require_user_type(&state.db, params.recruiter_id, USER_TYPE_RECRUITER).await?;

    let jobs = list_postings(
        &state.db,
        params.recruiter_id,
        params.active_only,
        params.skip,
        params.limit,
    )
    .await?;
    info!(
        "Retrieved {} job postings for recruiter {}",
        jobs.len(),
        params.recruiter_id
    );
    Ok(Json(jobs))
}

/// PUT /api/v1/recruiter/jobs/:job_id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<RecruiterQuery>,
    Json(update): Json<JobPostingUpdate>,
) -> Result<Json<JobPostingRow>, AppError> {
    validate_job_update(&update)?;
    require_user_type(&state.db, params.recruiter_id, USER_TYPE_RECRUITER).await?;

    get_owned_posting(&state.db, job_id, params.recruiter_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {job_id} not found")))?;

    let updated = update_posting(&state.db, job_id, params.recruiter_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {job_id} not found")))?;
    info!("Updated job posting {job_id}");
    Ok(Json(updated))
}

/// POST /api/v1/recruiter/rank-candidates/:job_id
///
/// Scores the candidate pool against one of the recruiter's postings and
/// returns the top candidates, best first.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<RecruiterQuery>,
) -> Result<Json<RankCandidatesResponse>, AppError> {
    require_user_type(&state.db, params.recruiter_id, USER_TYPE_RECRUITER).await?;

    let job = get_owned_posting(&state.db, job_id, params.recruiter_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {job_id} not found")))?;

    let candidates = fetch_candidate_pool(&state.db, state.config.ranking_pool_size).await?;
    debug!("Scoring {} candidates for job {job_id}", candidates.len());

    let ranking = rank_candidates(
        candidates,
        &job,
        &state.policy,
        state.config.ranking_top_n,
    );
    info!(
        "Ranked {} candidates for job {job_id} ({} recommended)",
        ranking.total_candidates, ranking.recommended_candidates
    );

    Ok(Json(RankCandidatesResponse {
        job_id,
        job_title: job.title,
        total_candidates: ranking.total_candidates,
        recommended_candidates: ranking.recommended_candidates,
        ranked_candidates: ranking.ranked_candidates,
        ranking_criteria: RANKING_CRITERIA.to_vec(),
    }))
}

fn validate_job(job: &JobPostingCreate) -> Result<(), AppError> {
    for (field, value) in [
        ("title", &job.title),
        ("company", &job.company),
        ("description", &job.description),
        ("location", &job.location),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    Ok(())
}

/// Supplied text fields must not be blank; absent ones are left alone.
fn validate_job_update(update: &JobPostingUpdate) -> Result<(), AppError> {
    for (field, value) in [
        ("title", &update.title),
        ("company", &update.company),
        ("description", &update.description),
        ("location", &update.location),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    Ok(())
}

pub(crate) fn validate_page(skip: i64, limit: i64) -> Result<(), AppError> {
    if skip < 0 {
        return Err(AppError::Validation("skip cannot be negative".to_string()));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_create() -> JobPostingCreate {
        serde_json::from_value(serde_json::json!({
            "title": "Backend Developer",
            "company": "Acme",
            "description": "Build services",
            "location": "Remote"
        }))
        .unwrap()
    }

    #[test]
    fn test_job_create_defaults() {
        let job = job_create();
        assert_eq!(job.employment_type, "full-time");
        assert!(!job.remote_ok);
        assert!(job.requirements.is_empty());
        assert!(validate_job(&job).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut job = job_create();
        job.title = "   ".to_string();
        let err = validate_job(&job).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_job_update_rejects_blank_fields_only_when_supplied() {
        assert!(validate_job_update(&JobPostingUpdate::default()).is_ok());

        let update = JobPostingUpdate {
            is_active: Some(false),
            location: Some("Remote".to_string()),
            ..Default::default()
        };
        assert!(validate_job_update(&update).is_ok());

        let blank = JobPostingUpdate {
            description: Some(" ".to_string()),
            ..Default::default()
        };
        let err = validate_job_update(&blank).unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_page_bounds() {
        assert!(validate_page(0, 100).is_ok());
        assert!(validate_page(-1, 100).is_err());
        assert!(validate_page(0, 0).is_err());
        assert!(validate_page(0, 1001).is_err());
    }
}
