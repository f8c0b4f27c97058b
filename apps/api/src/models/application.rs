use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Rejected,
    Ghosted,
    Offer,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Ghosted => "ghosted",
            ApplicationStatus::Offer => "offer",
        }
    }

    /// The employer answered, one way or the other.
    pub fn is_response(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Interview | ApplicationStatus::Rejected | ApplicationStatus::Offer
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(ApplicationStatus::Applied),
            "interview" => Ok(ApplicationStatus::Interview),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "ghosted" => Ok(ApplicationStatus::Ghosted),
            "offer" => Ok(ApplicationStatus::Offer),
            other => Err(format!("unknown application status '{other}'")),
        }
    }
}

/// A job the user applied to, tracked through its hiring stages.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: i64,
    pub user_id: i64,
    pub job_title: String,
    pub company: String,
    pub job_url: Option<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub job_description: Option<String>,
    pub notes: Option<String>,
    /// Where the application came from, e.g. "manual" or "auto_apply".
    pub source: String,
    pub status: String,
    pub applied_date: DateTime<Utc>,
    pub response_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JobApplicationRow {
    /// `None` for a status string written outside this service.
    pub fn status(&self) -> Option<ApplicationStatus> {
        self.status.parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobApplicationCreate {
    pub job_title: String,
    pub company: String,
    pub job_url: Option<String>,
    pub salary_range: Option<String>,
    pub location: Option<String>,
    pub job_description: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "manual".to_string()
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobApplicationUpdate {
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
}

impl JobApplicationUpdate {
    /// Moving into a response status stamps `response_date` unless one is
    /// already stored or supplied.
    pub fn stamps_response(&self) -> bool {
        self.status.is_some_and(ApplicationStatus::is_response)
    }
}
