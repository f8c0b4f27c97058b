use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::application::{
    ApplicationStatus, JobApplicationCreate, JobApplicationRow, JobApplicationUpdate,
};

const APPLICATION_COLUMNS: &str = "id, user_id, job_title, company, job_url, salary_range, \
     location, job_description, notes, source, status, applied_date, response_date, \
     created_at, updated_at";

/// Optional narrowing for [`list_applications`].
#[derive(Debug, Default)]
pub struct ApplicationFilter<'a> {
    pub status: Option<ApplicationStatus>,
    /// Case-insensitive substring of the company name.
    pub company: Option<&'a str>,
}

pub async fn create_application(
    pool: &PgPool,
    user_id: i64,
    application: &JobApplicationCreate,
) -> Result<JobApplicationRow, sqlx::Error> {
    sqlx::query_as::<_, JobApplicationRow>(&format!(
        r#"
        INSERT INTO job_applications
            (user_id, job_title, company, job_url, salary_range, location,
             job_description, notes, source, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'applied')
        RETURNING {APPLICATION_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&application.job_title)
    .bind(&application.company)
    .bind(&application.job_url)
    .bind(&application.salary_range)
    .bind(&application.location)
    .bind(&application.job_description)
    .bind(&application.notes)
    .bind(&application.source)
    .fetch_one(pool)
    .await
}

/// A user's applications, most recent first.
pub async fn list_applications(
    pool: &PgPool,
    user_id: i64,
    filter: &ApplicationFilter<'_>,
    skip: i64,
    limit: i64,
) -> Result<Vec<JobApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, JobApplicationRow>(&format!(
        r#"
        SELECT {APPLICATION_COLUMNS} FROM job_applications
        WHERE user_id = $1
          AND ($2::TEXT IS NULL OR status = $2)
          AND ($3::TEXT IS NULL OR company ILIKE '%' || $3 || '%')
        ORDER BY applied_date DESC, id DESC
        OFFSET $4 LIMIT $5
        "#
    ))
    .bind(user_id)
    .bind(filter.status.map(ApplicationStatus::as_str))
    .bind(filter.company)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Every application of the user applied on or after `since`, or all of them
/// when `since` is `None`. Input for the aggregate statistics.
pub async fn applications_since(
    pool: &PgPool,
    user_id: i64,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<JobApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, JobApplicationRow>(&format!(
        r#"
        SELECT {APPLICATION_COLUMNS} FROM job_applications
        WHERE user_id = $1 AND ($2::TIMESTAMPTZ IS NULL OR applied_date >= $2)
        ORDER BY applied_date, id
        "#
    ))
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await
}

/// Applies a partial update to an application owned by `user_id`.
/// Returns `None` when no such application exists.
pub async fn update_application(
    pool: &PgPool,
    application_id: i64,
    user_id: i64,
    update: &JobApplicationUpdate,
) -> Result<Option<JobApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, JobApplicationRow>(&format!(
        r#"
        UPDATE job_applications SET
            status        = COALESCE($3, status),
            notes         = COALESCE($4, notes),
            response_date = COALESCE($5, response_date, CASE WHEN $6 THEN NOW() END),
            updated_at    = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING {APPLICATION_COLUMNS}
        "#
    ))
    .bind(application_id)
    .bind(user_id)
    .bind(update.status.map(ApplicationStatus::as_str))
    .bind(&update.notes)
    .bind(update.response_date)
    .bind(update.stamps_response())
    .fetch_optional(pool)
    .await
}

/// Returns whether a row owned by `user_id` was deleted.
pub async fn delete_application(
    pool: &PgPool,
    application_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM job_applications WHERE id = $1 AND user_id = $2")
        .bind(application_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
