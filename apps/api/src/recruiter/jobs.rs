use sqlx::PgPool;

use crate::models::job_posting::{JobPostingCreate, JobPostingRow, JobPostingUpdate};

const JOB_COLUMNS: &str = "id, recruiter_id, title, company, description, requirements, \
     salary_range, location, remote_ok, employment_type, experience_level, department, \
     is_active, created_at, updated_at";

pub async fn create_posting(
    pool: &PgPool,
    recruiter_id: i64,
    job: &JobPostingCreate,
) -> Result<JobPostingRow, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(&format!(
        r#"
        INSERT INTO job_postings
            (recruiter_id, title, company, description, requirements, salary_range,
             location, remote_ok, employment_type, experience_level, department, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE)
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(recruiter_id)
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.description)
    .bind(&job.requirements)
    .bind(&job.salary_range)
    .bind(&job.location)
    .bind(job.remote_ok)
    .bind(&job.employment_type)
    .bind(&job.experience_level)
    .bind(&job.department)
    .fetch_one(pool)
    .await
}

/// A recruiter's own postings, newest first.
pub async fn list_postings(
    pool: &PgPool,
    recruiter_id: i64,
    active_only: bool,
    skip: i64,
    limit: i64,
) -> Result<Vec<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(&format!(
        r#"
        SELECT {JOB_COLUMNS} FROM job_postings
        WHERE recruiter_id = $1 AND (NOT $2 OR is_active)
        ORDER BY created_at DESC
        OFFSET $3 LIMIT $4
        "#
    ))
    .bind(recruiter_id)
    .bind(active_only)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Fetches a posting only if it belongs to `recruiter_id`.
pub async fn get_owned_posting(
    pool: &PgPool,
    job_id: i64,
    recruiter_id: i64,
) -> Result<Option<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(&format!(
        "SELECT {JOB_COLUMNS} FROM job_postings WHERE id = $1 AND recruiter_id = $2"
    ))
    .bind(job_id)
    .bind(recruiter_id)
    .fetch_optional(pool)
    .await
}

/// Applies a partial update to a posting owned by `recruiter_id`.
pub async fn update_posting(
    pool: &PgPool,
    job_id: i64,
    recruiter_id: i64,
    update: &JobPostingUpdate,
) -> Result<Option<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(&format!(
        r#"
        UPDATE job_postings SET
            title            = COALESCE($3, title),
            company          = COALESCE($4, company),
            description      = COALESCE($5, description),
            requirements     = COALESCE($6, requirements),
            salary_range     = COALESCE($7, salary_range),
            location         = COALESCE($8, location),
            remote_ok        = COALESCE($9, remote_ok),
            employment_type  = COALESCE($10, employment_type),
            experience_level = COALESCE($11, experience_level),
            department       = COALESCE($12, department),
            is_active        = COALESCE($13, is_active),
            updated_at       = NOW()
        WHERE id = $1 AND recruiter_id = $2
        RETURNING {JOB_COLUMNS}
        "#
    ))
    .bind(job_id)
    .bind(recruiter_id)
    .bind(&update.title)
    .bind(&update.company)
    .bind(&update.description)
    .bind(&update.requirements)
    .bind(&update.salary_range)
    .bind(&update.location)
    .bind(update.remote_ok)
    .bind(&update.employment_type)
    .bind(&update.experience_level)
    .bind(&update.department)
    .bind(update.is_active)
    .fetch_optional(pool)
    .await
}

/// Active postings across all recruiters, newest first. Source for job recommendations.
pub async fn list_active_postings(pool: &PgPool, limit: i64) -> Result<Vec<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(&format!(
        "SELECT {JOB_COLUMNS} FROM job_postings WHERE is_active ORDER BY created_at DESC, id LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}
