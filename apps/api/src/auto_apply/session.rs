use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::filter::JobFilterCriteria;
use crate::sessions::{SessionError, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Stopped,
}

/// A candidate's request to have applications sent for matching postings.
/// Submission itself happens outside this service; the session only tracks intent
/// and the queue of postings chosen at start time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoApplySession {
    pub session_id: Uuid,
    pub user_id: i64,
    pub status: SessionStatus,
    pub criteria: JobFilterCriteria,
    pub max_applications: usize,
    /// Posting ids, best match first.
    pub queued_job_ids: Vec<i64>,
    pub applications_submitted: u32,
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
}

impl AutoApplySession {
    pub fn start(
        user_id: i64,
        criteria: JobFilterCriteria,
        max_applications: usize,
        queued_job_ids: Vec<i64>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            status: SessionStatus::Active,
            criteria,
            max_applications,
            queued_job_ids,
            applications_submitted: 0,
            started_at: Utc::now(),
            stopped_at: None,
        }
    }

    pub fn stop(&mut self) {
        self.status = SessionStatus::Stopped;
        self.stopped_at = Some(Utc::now());
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}

pub fn session_key(user_id: i64) -> String {
    format!("auto_apply:{user_id}")
}

pub async fn load_session(
    store: &dyn SessionStore,
    user_id: i64,
) -> Result<Option<AutoApplySession>, SessionError> {
    match store.get(&session_key(user_id)).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub async fn save_session(
    store: &dyn SessionStore,
    session: &AutoApplySession,
    ttl: Duration,
) -> Result<(), SessionError> {
    let raw = serde_json::to_string(session)?;
    store.set(&session_key(session.user_id), raw, ttl).await
}
