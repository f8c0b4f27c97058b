//! Ranking wrappers: score every pair, sort descending (stable), truncate.

use serde::{Deserialize, Serialize};

use crate::matching::policy::MatchPolicy;
use crate::matching::scorer::ScoreBreakdown;
use crate::matching::{candidate, job};
use crate::models::candidate::CandidateRow;
use crate::models::job_posting::JobPostingRow;
use crate::models::profile::UserProfile;

/// Triage bucket derived from a candidate's match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Recommend,
    Maybe,
    Skip,
}

impl Recommendation {
    pub fn from_score(score: u32, policy: &MatchPolicy) -> Self {
        if score > policy.recommend_threshold {
            Recommendation::Recommend
        } else if score > policy.maybe_threshold {
            Recommendation::Maybe
        } else {
            Recommendation::Skip
        }
    }
}

/// One entry of a candidate ranking, as returned to recruiters.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub candidate_id: i64,
    pub user_id: i64,
    pub match_score: u32,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub match_reasons: Vec<String>,
    pub red_flags: Vec<String>,
    pub interview_recommendation: Recommendation,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRanking {
    /// Number of candidates scored, before truncation.
    pub total_candidates: usize,
    /// Candidates bucketed as `recommend`, before truncation.
    pub recommended_candidates: usize,
    pub ranked_candidates: Vec<RankedCandidate>,
}

pub const RANKING_CRITERIA: &[&str] = &[
    "Skills alignment with job requirements",
    "Years of relevant experience",
    "GitHub activity and code quality",
    "LinkedIn profile completeness",
    "Previous work experience relevance",
];

pub fn rank_candidates(
    candidates: Vec<CandidateRow>,
    job: &JobPostingRow,
    policy: &MatchPolicy,
    top_n: usize,
) -> CandidateRanking {
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|c| {
            let match_score = candidate::score(&c, job, policy);
            RankedCandidate {
                match_reasons: candidate::match_reasons(&c, job, match_score, policy),
                red_flags: candidate::red_flags(&c, job),
                interview_recommendation: Recommendation::from_score(match_score, policy),
                candidate_id: c.id,
                user_id: c.user_id,
                match_score,
                skills: c.skills,
                experience_years: c.experience_years,
                github_url: c.github_url,
                linkedin_url: c.linkedin_url,
                resume_url: c.resume_url,
            }
        })
        .collect();

    // `sort_by` is stable: equal scores keep their input order.
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let total_candidates = ranked.len();
    let recommended_candidates = ranked
        .iter()
        .filter(|c| c.interview_recommendation == Recommendation::Recommend)
        .count();
    ranked.truncate(top_n);

    CandidateRanking {
        total_candidates,
        recommended_candidates,
        ranked_candidates: ranked,
    }
}

/// A job listing scored against a seeker's profile.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecommendation {
    pub job_id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub remote_ok: bool,
    pub match_score: u32,
    pub breakdown: ScoreBreakdown,
}

pub fn rank_jobs(
    profile: &UserProfile,
    jobs: Vec<JobPostingRow>,
    policy: &MatchPolicy,
    limit: usize,
) -> Vec<JobRecommendation> {
    let mut ranked: Vec<JobRecommendation> = jobs
        .into_iter()
        .map(|j| {
            let breakdown = job::breakdown(profile, &j, policy);
            JobRecommendation {
                job_id: j.id,
                title: j.title,
                company: j.company,
                location: j.location,
                salary_range: j.salary_range,
                remote_ok: j.remote_ok,
                match_score: breakdown.total,
                breakdown,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::candidate::tests::{make_candidate, make_job};

    #[test]
    fn test_recommendation_buckets() {
        let policy = MatchPolicy::default();
        assert_eq!(Recommendation::from_score(75, &policy), Recommendation::Recommend);
        assert_eq!(Recommendation::from_score(71, &policy), Recommendation::Recommend);
        assert_eq!(Recommendation::from_score(70, &policy), Recommendation::Maybe);
        assert_eq!(Recommendation::from_score(60, &policy), Recommendation::Maybe);
        assert_eq!(Recommendation::from_score(51, &policy), Recommendation::Maybe);
        assert_eq!(Recommendation::from_score(50, &policy), Recommendation::Skip);
        assert_eq!(Recommendation::from_score(40, &policy), Recommendation::Skip);
    }

    #[test]
    fn test_recommendation_serializes_snake_case() {
        let json = serde_json::to_string(&Recommendation::Recommend).unwrap();
        assert_eq!(json, r#""recommend""#);
    }

    #[test]
    fn test_rank_sorts_descending_and_truncates() {
        let policy = MatchPolicy::default();
        let job = make_job("Engineer", &["go", "sql"], true);
        let candidates = vec![
            make_candidate(1, &[], 0, false),
            make_candidate(2, &["go", "sql"], 5, true),
            make_candidate(3, &["go"], 2, false),
        ];

        let ranking = rank_candidates(candidates, &job, &policy, 2);
        assert_eq!(ranking.total_candidates, 3);
        assert_eq!(ranking.recommended_candidates, 1);
        let ids: Vec<i64> = ranking.ranked_candidates.iter().map(|c| c.candidate_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(ranking.ranked_candidates[0].match_score, 100);
        assert_eq!(
            ranking.ranked_candidates[0].interview_recommendation,
            Recommendation::Recommend
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let policy = MatchPolicy::default();
        let job = make_job("Engineer", &["go"], false);
        let candidates = (10..15)
            .map(|id| make_candidate(id, &["go"], 1, false))
            .collect();
        let ranking = rank_candidates(candidates, &job, &policy, 10);
        let ids: Vec<i64> = ranking.ranked_candidates.iter().map(|c| c.candidate_id).collect();
        assert_eq!(ids, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_ranked_record_json_fields() {
        let policy = MatchPolicy::default();
        let job = make_job("Engineer", &["go"], false);
        let ranking = rank_candidates(vec![make_candidate(4, &["go"], 3, true)], &job, &policy, 10);
        let value = serde_json::to_value(&ranking.ranked_candidates[0]).unwrap();
        for field in [
            "candidate_id",
            "match_score",
            "skills",
            "experience_years",
            "match_reasons",
            "red_flags",
            "interview_recommendation",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        // 40 + 18 + 20 = 78
        assert_eq!(value["match_score"], 78);
        assert_eq!(value["interview_recommendation"], "recommend");
    }

    #[test]
    fn test_rank_jobs_orders_by_score() {
        let policy = MatchPolicy::default();
        let profile = UserProfile {
            skills: vec!["rust".into()],
            ..Default::default()
        };
        let mut weak = make_job("Weak", &["java"], false);
        weak.id = 1;
        let mut strong = make_job("Strong", &["Rust"], false);
        strong.id = 2;

        let ranked = rank_jobs(&profile, vec![weak, strong], &policy, 5);
        assert_eq!(ranked[0].job_id, 2);
        assert!(ranked[0].match_score > ranked[1].match_score);
        assert_eq!(ranked[0].breakdown.components.len(), 5);
    }
}
