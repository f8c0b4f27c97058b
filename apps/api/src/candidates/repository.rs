use sqlx::PgPool;

use crate::models::candidate::{CandidateRow, CandidateUpdate};

const CANDIDATE_COLUMNS: &str = "id, user_id, resume_url, linkedin_url, github_url, skills, \
     experience_years, preferred_roles, career_goals, created_at, updated_at";

/// Returns the candidate profile for `user_id`, creating an empty one if none exists.
pub async fn get_or_create_profile(pool: &PgPool, user_id: i64) -> Result<CandidateRow, sqlx::Error> {
    sqlx::query("INSERT INTO candidates (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;

    sqlx::query_as::<_, CandidateRow>(&format!(
        "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Applies a partial update. Fields absent from `update` keep their stored value.
pub async fn update_profile(
    pool: &PgPool,
    user_id: i64,
    update: &CandidateUpdate,
) -> Result<CandidateRow, sqlx::Error> {
    get_or_create_profile(pool, user_id).await?;

    sqlx::query_as::<_, CandidateRow>(&format!(
        r#"
        UPDATE candidates SET
            resume_url       = COALESCE($2, resume_url),
            linkedin_url     = COALESCE($3, linkedin_url),
            github_url       = COALESCE($4, github_url),
            skills           = COALESCE($5, skills),
            experience_years = COALESCE($6, experience_years),
            preferred_roles  = COALESCE($7, preferred_roles),
            career_goals     = COALESCE($8, career_goals),
            updated_at       = NOW()
        WHERE user_id = $1
        RETURNING {CANDIDATE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&update.resume_url)
    .bind(&update.linkedin_url)
    .bind(&update.github_url)
    .bind(&update.skills)
    .bind(update.experience_years)
    .bind(&update.preferred_roles)
    .bind(&update.career_goals)
    .fetch_one(pool)
    .await
}

/// The candidate pool considered for a ranking request, in stable id order.
pub async fn fetch_candidate_pool(pool: &PgPool, limit: i64) -> Result<Vec<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>(&format!(
        "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY id LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}
