use serde::{Deserialize, Serialize};

/// A job seeker's search preferences, supplied per request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub preferred_companies: Vec<String>,
    /// Minimum acceptable salary. Zero means no preference.
    #[serde(default)]
    pub min_salary: u64,
    #[serde(default)]
    pub experience_years: i32,
}
