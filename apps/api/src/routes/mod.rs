pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::auto_apply::handlers as auto_apply;
use crate::candidates::handlers as candidates;
use crate::matching::handlers as matching;
use crate::recruiter::handlers as recruiter;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidate profile
        .route(
            "/api/v1/candidates/profile",
            get(candidates::handle_get_profile).put(candidates::handle_update_profile),
        )
        // Recruiter
        .route(
            "/api/v1/recruiter/jobs",
            post(recruiter::handle_create_job).get(recruiter::handle_list_jobs),
        )
        .route("/api/v1/recruiter/jobs/:job_id", put(recruiter::handle_update_job))
        .route(
            "/api/v1/recruiter/rank-candidates/:job_id",
            post(recruiter::handle_rank_candidates),
        )
        // Job seeker
        .route(
            "/api/v1/jobs/recommendations",
            post(matching::handle_job_recommendations),
        )
        // Application tracking
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications).post(applications::handle_create_application),
        )
        .route(
            "/api/v1/applications/stats",
            get(applications::handle_application_stats),
        )
        .route(
            "/api/v1/applications/:application_id",
            put(applications::handle_update_application)
                .delete(applications::handle_delete_application),
        )
        // Analytics
        .route("/api/v1/analytics/dashboard", get(applications::handle_dashboard))
        .route("/api/v1/analytics/funnel", get(applications::handle_funnel))
        .route(
            "/api/v1/analytics/performance",
            get(applications::handle_performance),
        )
        // Auto-apply sessions
        .route("/api/v1/auto-apply/start", post(auto_apply::handle_start))
        .route("/api/v1/auto-apply/stop", post(auto_apply::handle_stop))
        .route("/api/v1/auto-apply/status", get(auto_apply::handle_status))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::matching::policy::MatchPolicy;
    use crate::sessions::InMemorySessionStore;

    /// State with a pool that never connects; only routes that stay off the
    /// database are exercised here.
    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/jobmatch_test".to_string(),
            redis_url: None,
            port: 0,
            rust_log: "debug".to_string(),
            run_migrations: false,
            ranking_pool_size: 20,
            ranking_top_n: 10,
            session_ttl_secs: 60,
            match_policy: MatchPolicy::default(),
        };
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        AppState {
            db,
            sessions: Arc::new(InMemorySessionStore::new()),
            policy: Arc::new(config.match_policy.clone()),
            config,
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["session_backend"], "memory");
    }

    #[tokio::test]
    async fn test_auto_apply_status_requires_user_id() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/auto-apply/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommendations_validation_runs_before_storage() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/v1/jobs/recommendations")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"profile":{"skills":["rust"]},"limit":0}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_negative_experience_rejected_before_storage() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::put("/api/v1/candidates/profile?user_id=1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"experience_years":-3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_application_rejected_before_storage() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/v1/applications?user_id=1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"job_title":"SRE","company":" "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_status_filter_rejected() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/v1/applications?user_id=1&status=hired")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_job_update_rejected_before_storage() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::put("/api/v1/recruiter/jobs/3?recruiter_id=7")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title":""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
