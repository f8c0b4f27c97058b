use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub user_id: i64,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub preferred_roles: Vec<String>,
    pub career_goals: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update for a candidate profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateUpdate {
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub preferred_roles: Option<Vec<String>>,
    pub career_goals: Option<String>,
}
