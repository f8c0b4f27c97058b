//! Application tracking and analytics endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::applications::analytics::{
    application_stats, dashboard, funnel, performance, time_range_days, ApplicationStats,
    Dashboard, Funnel, PerformanceReport, DEFAULT_DASHBOARD_DAYS, DEFAULT_FUNNEL_DAYS,
    DEFAULT_PERFORMANCE_DAYS,
};
use crate::applications::repository::{
    applications_since, create_application, delete_application, list_applications,
    update_application, ApplicationFilter,
};
use crate::db::require_active_user;
use crate::errors::AppError;
use crate::models::application::{
    ApplicationStatus, JobApplicationCreate, JobApplicationRow, JobApplicationUpdate,
};
use crate::recruiter::handlers::validate_page;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub user_id: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// A status name, or "all".
    pub status: Option<String>,
    pub company: Option<String>,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub user_id: i64,
    /// "7_days" | "30_days" | "90_days" | "180_days" | "365_days"
    pub time_range: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PerformanceResponse {
    Report(PerformanceReport),
    Empty { message: &'static str, metrics: Value },
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<JobApplicationRow>>, AppError> {
    validate_page(params.skip, params.limit)?;
    let filter = ApplicationFilter {
        status: parse_status_filter(params.status.as_deref())?,
        company: params.company.as_deref().filter(|c| !c.is_empty()),
    };
    require_active_user(&state.db, params.user_id).await?;

    let applications =
        list_applications(&state.db, params.user_id, &filter, params.skip, params.limit).await?;
    info!(
        "Retrieved {} applications for user {}",
        applications.len(),
        params.user_id
    );
    Ok(Json(applications))
}

/// POST /api/v1/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(application): Json<JobApplicationCreate>,
) -> Result<(StatusCode, Json<JobApplicationRow>), AppError> {
    validate_application(&application)?;
    require_active_user(&state.db, params.user_id).await?;

    let created = create_application(&state.db, params.user_id, &application).await?;
    info!("Created application for {} - {}", created.company, created.job_title);
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/v1/applications/:application_id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(application_id): Path<i64>,
    Query(params): Query<UserIdQuery>,
    Json(update): Json<JobApplicationUpdate>,
) -> Result<Json<JobApplicationRow>, AppError> {
    require_active_user(&state.db, params.user_id).await?;

    let updated = update_application(&state.db, application_id, params.user_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    info!("Updated application {application_id} for user {}", params.user_id);
    Ok(Json(updated))
}

/// DELETE /api/v1/applications/:application_id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(application_id): Path<i64>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    require_active_user(&state.db, params.user_id).await?;

    if !delete_application(&state.db, application_id, params.user_id).await? {
        return Err(AppError::NotFound("Application not found".to_string()));
    }
    info!("Deleted application {application_id} for user {}", params.user_id);
    Ok(Json(json!({ "message": "Application deleted successfully" })))
}

/// GET /api/v1/applications/stats
pub async fn handle_application_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ApplicationStats>, AppError> {
    require_active_user(&state.db, params.user_id).await?;
    let applications = applications_since(&state.db, params.user_id, None).await?;
    Ok(Json(application_stats(&applications)))
}

/// GET /api/v1/analytics/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<Dashboard>, AppError> {
    require_active_user(&state.db, params.user_id).await?;

    let days = time_range_days(params.time_range.as_deref(), DEFAULT_DASHBOARD_DAYS);
    let now = Utc::now();
    let applications =
        applications_since(&state.db, params.user_id, Some(now - Duration::days(days))).await?;
    Ok(Json(dashboard(&applications, days, now)))
}

/// GET /api/v1/analytics/funnel
pub async fn handle_funnel(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<Funnel>, AppError> {
    require_active_user(&state.db, params.user_id).await?;

    let days = time_range_days(params.time_range.as_deref(), DEFAULT_FUNNEL_DAYS);
    let since = Utc::now() - Duration::days(days);
    let applications = applications_since(&state.db, params.user_id, Some(since)).await?;
    Ok(Json(funnel(&applications)))
}

/// GET /api/v1/analytics/performance
pub async fn handle_performance(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<PerformanceResponse>, AppError> {
    require_active_user(&state.db, params.user_id).await?;

    let days = time_range_days(params.time_range.as_deref(), DEFAULT_PERFORMANCE_DAYS);
    let applications = applications_since(&state.db, params.user_id, None).await?;
    let response = match performance(&applications, days, Utc::now()) {
        Some(report) => PerformanceResponse::Report(report),
        None => PerformanceResponse::Empty {
            message: "No applications found. Start applying to see performance metrics!",
            metrics: json!({}),
        },
    };
    Ok(Json(response))
}

fn validate_application(application: &JobApplicationCreate) -> Result<(), AppError> {
    for (field, value) in [
        ("job_title", &application.job_title),
        ("company", &application.company),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }
    Ok(())
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<ApplicationStatus>, AppError> {
    match raw {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::Validation),
    }
}
