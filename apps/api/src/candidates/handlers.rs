//! Candidate profile endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::candidates::repository::{get_or_create_profile, update_profile};
use crate::db::require_user_type;
use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, CandidateUpdate};
use crate::models::user::USER_TYPE_CANDIDATE;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

/// GET /api/v1/candidates/profile
///
/// Returns the caller's candidate profile, creating an empty one on first access.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CandidateRow>, AppError> {
    require_user_type(&state.db, params.user_id, USER_TYPE_CANDIDATE).await?;
    let profile = get_or_create_profile(&state.db, params.user_id).await?;
    info!("Retrieved candidate profile for user {}", params.user_id);
    Ok(Json(profile))
}

/// PUT /api/v1/candidates/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(update): Json<CandidateUpdate>,
) -> Result<Json<CandidateRow>, AppError> {
    validate_update(&update)?;
    let update = normalize_update(update);
    require_user_type(&state.db, params.user_id, USER_TYPE_CANDIDATE).await?;
    let profile = update_profile(&state.db, params.user_id, &update).await?;
    info!("Updated candidate profile for user {}", params.user_id);
    Ok(Json(profile))
}

/// Rejects shapes the scorer would otherwise have to guess about.
pub(crate) fn validate_update(update: &CandidateUpdate) -> Result<(), AppError> {
    if update.experience_years.is_some_and(|y| y < 0) {
        return Err(AppError::Validation(
            "experience_years cannot be negative".to_string(),
        ));
    }
    if let Some(skills) = &update.skills {
        if skills.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::Validation("skills cannot contain blank entries".to_string()));
        }
    }
    Ok(())
}

/// Trims free-text fields. A whitespace-only URL or goal is stored as `""`,
/// which clears it for scoring.
pub(crate) fn normalize_update(mut update: CandidateUpdate) -> CandidateUpdate {
    for field in [
        &mut update.resume_url,
        &mut update.linkedin_url,
        &mut update.github_url,
        &mut update.career_goals,
    ] {
        if let Some(value) = field.as_mut() {
            *value = value.trim().to_string();
        }
    }
    if let Some(skills) = update.skills.as_mut() {
        for skill in skills.iter_mut() {
            *skill = skill.trim().to_string();
        }
    }
    update
}
