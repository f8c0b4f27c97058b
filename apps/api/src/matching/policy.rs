use serde::{Deserialize, Serialize};

/// Point caps for the candidate-to-job scorer. Sum is the maximum score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CandidateWeights {
    pub skills: f64,
    pub experience: f64,
    pub completeness: f64,
    pub remote: f64,
}

impl Default for CandidateWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            experience: 30.0,
            completeness: 20.0,
            remote: 10.0,
        }
    }
}

/// Point caps for the job-to-profile scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JobWeights {
    pub skills: f64,
    pub location: f64,
    pub experience_level: f64,
    pub company: f64,
    pub salary: f64,
}

impl Default for JobWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            location: 20.0,
            experience_level: 20.0,
            company: 10.0,
            salary: 10.0,
        }
    }
}

/// Business heuristics behind both scorers. Defaults are the production values;
/// deployments may override the bucket thresholds via config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub candidate_weights: CandidateWeights,
    pub job_weights: JobWeights,
    /// Points per year of experience before the experience cap kicks in.
    pub points_per_experience_year: f64,
    /// Minimum years before an experience reason is surfaced.
    pub experience_reason_min_years: i32,
    /// Scores strictly above this get the "excellent" reason.
    pub excellent_reason_threshold: u32,
    /// Scores strictly above this (and not excellent) get the "good" reason.
    pub good_reason_threshold: u32,
    /// Scores strictly above this are bucketed as `recommend`.
    pub recommend_threshold: u32,
    /// Scores strictly above this (and not recommend) are bucketed as `maybe`.
    pub maybe_threshold: u32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            candidate_weights: CandidateWeights::default(),
            job_weights: JobWeights::default(),
            points_per_experience_year: 6.0,
            experience_reason_min_years: 3,
            excellent_reason_threshold: 80,
            good_reason_threshold: 60,
            recommend_threshold: 70,
            maybe_threshold: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps_sum_to_one_hundred() {
        let c = CandidateWeights::default();
        let j = JobWeights::default();
        assert_eq!(c.skills + c.experience + c.completeness + c.remote, 100.0);
        assert_eq!(
            j.skills + j.location + j.experience_level + j.company + j.salary,
            100.0
        );
    }

    #[test]
    fn test_experience_saturates_at_five_years_by_default() {
        let policy = MatchPolicy::default();
        let years_to_cap = policy.candidate_weights.experience / policy.points_per_experience_year;
        assert!((years_to_cap - 5.0).abs() < f64::EPSILON);
    }
}
