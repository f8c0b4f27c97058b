//! Axum route handlers for job recommendations.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::matching::filter::{filter_jobs, JobFilterCriteria};
use crate::matching::ranking::{rank_jobs, JobRecommendation};
use crate::models::profile::UserProfile;
use crate::recruiter::jobs::list_active_postings;
use crate::state::AppState;

/// Upper bound on listings pulled from storage per recommendation request.
const LISTING_POOL_SIZE: i64 = 200;
const MAX_RECOMMENDATIONS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct JobRecommendationRequest {
    pub profile: UserProfile,
    #[serde(default)]
    pub criteria: JobFilterCriteria,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct JobRecommendationResponse {
    pub total_listings: usize,
    pub matching_listings: usize,
    pub recommendations: Vec<JobRecommendation>,
}

/// POST /api/v1/jobs/recommendations
///
/// Filters active postings by hard criteria, scores the survivors against the
/// seeker's profile and returns the best matches first.
pub async fn handle_job_recommendations(
    State(state): State<AppState>,
    Json(request): Json<JobRecommendationRequest>,
) -> Result<Json<JobRecommendationResponse>, AppError> {
    validate_request(&request)?;

    let listings = list_active_postings(&state.db, LISTING_POOL_SIZE).await?;
    let total_listings = listings.len();

    let matching = filter_jobs(listings, &request.criteria);
    let matching_listings = matching.len();
    debug!("{matching_listings}/{total_listings} listings passed the filter");

    let recommendations = rank_jobs(&request.profile, matching, &state.policy, request.limit);
    info!(
        "Returning {} job recommendations from {total_listings} listings",
        recommendations.len()
    );

    Ok(Json(JobRecommendationResponse {
        total_listings,
        matching_listings,
        recommendations,
    }))
}

pub(crate) fn validate_request(request: &JobRecommendationRequest) -> Result<(), AppError> {
    if request.limit == 0 || request.limit > MAX_RECOMMENDATIONS {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_RECOMMENDATIONS}"
        )));
    }
    validate_criteria(&request.criteria)?;
    if request.profile.experience_years < 0 {
        return Err(AppError::Validation(
            "experience_years cannot be negative".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_criteria(criteria: &JobFilterCriteria) -> Result<(), AppError> {
    if !(0.0..=1.0).contains(&criteria.skill_match_threshold) {
        return Err(AppError::Validation(
            "skill_match_threshold must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> JobRecommendationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let req = request(serde_json::json!({ "profile": { "skills": ["rust"] } }));
        assert_eq!(req.limit, 10);
        assert_eq!(req.criteria.skill_match_threshold, 0.5);
        assert_eq!(req.profile.min_salary, 0);
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        let zero = request(serde_json::json!({ "profile": {}, "limit": 0 }));
        assert!(validate_request(&zero).is_err());
        let huge = request(serde_json::json!({ "profile": {}, "limit": 51 }));
        assert!(validate_request(&huge).is_err());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let req = request(serde_json::json!({
            "profile": {},
            "criteria": { "skill_match_threshold": 1.5 }
        }));
        assert!(matches!(validate_request(&req), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_negative_experience_rejected() {
        let req = request(serde_json::json!({ "profile": { "experience_years": -2 } }));
        assert!(validate_request(&req).is_err());
    }
}
