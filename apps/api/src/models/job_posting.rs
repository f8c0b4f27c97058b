use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recruiter's job posting. Serves as the requirement side when ranking
/// candidates and as the listing side when recommending jobs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: i64,
    pub recruiter_id: i64,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary_range: Option<String>,
    pub location: String,
    pub remote_ok: bool,
    /// full-time | part-time | contract
    pub employment_type: String,
    /// Free text, usually containing "entry", "mid" or "senior".
    pub experience_level: Option<String>,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobPostingCreate {
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub salary_range: Option<String>,
    pub location: String,
    #[serde(default)]
    pub remote_ok: bool,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    pub experience_level: Option<String>,
    pub department: Option<String>,
}

fn default_employment_type() -> String {
    "full-time".to_string()
}

/// Partial update of a posting. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPostingUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub remote_ok: Option<bool>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub department: Option<String>,
    pub is_active: Option<bool>,
}
