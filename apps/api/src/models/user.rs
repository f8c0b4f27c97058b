use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const USER_TYPE_CANDIDATE: &str = "candidate";
pub const USER_TYPE_RECRUITER: &str = "recruiter";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    /// "candidate" | "recruiter"
    pub user_type: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
