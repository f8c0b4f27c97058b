use serde::{Deserialize, Serialize};

use crate::matching::salary::extract_min_salary;
use crate::models::job_posting::JobPostingRow;

/// Hard criteria applied to job listings before they are scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFilterCriteria {
    #[serde(default)]
    pub min_salary: Option<u64>,
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Share of `required_skills` that must appear in the listing, in `[0, 1]`.
    #[serde(default = "default_skill_match_threshold")]
    pub skill_match_threshold: f64,
}

fn default_skill_match_threshold() -> f64 {
    0.5
}

impl Default for JobFilterCriteria {
    fn default() -> Self {
        Self {
            min_salary: None,
            remote_only: false,
            experience_level: None,
            required_skills: vec![],
            skill_match_threshold: default_skill_match_threshold(),
        }
    }
}

impl JobFilterCriteria {
    /// Returns true when the listing survives every criterion.
    /// A listing whose salary text holds no number is never dropped on salary.
    pub fn accepts(&self, job: &JobPostingRow) -> bool {
        if let Some(floor) = self.min_salary.filter(|f| *f > 0) {
            let job_min = job.salary_range.as_deref().and_then(extract_min_salary);
            if job_min.is_some_and(|m| m < floor) {
                return false;
            }
        }

        if self.remote_only && !job.location.to_lowercase().contains("remote") {
            return false;
        }

        if let Some(wanted) = self.experience_level.as_deref().filter(|l| !l.is_empty()) {
            let level = job.experience_level.as_deref().unwrap_or("").to_lowercase();
            if !level.contains(&wanted.to_lowercase()) {
                return false;
            }
        }

        if !self.required_skills.is_empty() {
            let text = format!(
                "{} {}",
                job.requirements.join(" ").to_lowercase(),
                job.description.to_lowercase()
            );
            let found = self
                .required_skills
                .iter()
                .filter(|s| text.contains(&s.to_lowercase()))
                .count();
            let share = found as f64 / self.required_skills.len() as f64;
            if share < self.skill_match_threshold {
                return false;
            }
        }

        true
    }
}

/// Keeps listings accepted by `criteria`, preserving input order.
pub fn filter_jobs(jobs: Vec<JobPostingRow>, criteria: &JobFilterCriteria) -> Vec<JobPostingRow> {
    jobs.into_iter().filter(|j| criteria.accepts(j)).collect()
}
