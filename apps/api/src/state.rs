use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::matching::policy::MatchPolicy;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Auto-apply session storage. Redis when configured, in-process otherwise.
    pub sessions: Arc<dyn SessionStore>,
    pub config: Config,
    /// Weight caps and thresholds used by both scorers.
    pub policy: Arc<MatchPolicy>,
}
