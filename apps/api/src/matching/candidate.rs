//! Candidate-to-job matching: how well a candidate fits a recruiter's posting.
//!
//! Four independent factors, each capped by the policy's candidate weights:
//! skills overlap, years of experience, profile completeness, remote-friendliness.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::matching::policy::MatchPolicy;
use crate::matching::scorer::{Component, Contribution, WeightedScorer};
use crate::models::candidate::CandidateRow;
use crate::models::job_posting::JobPostingRow;

static CANDIDATE_SCORER: Lazy<WeightedScorer<CandidateRow, JobPostingRow>> = Lazy::new(|| {
    WeightedScorer::new(vec![
        Component {
            name: "skills",
            eval: skills_component,
        },
        Component {
            name: "experience",
            eval: experience_component,
        },
        Component {
            name: "completeness",
            eval: completeness_component,
        },
        Component {
            name: "remote",
            eval: remote_component,
        },
    ])
});

/// Match score in `0..=100`.
pub fn score(candidate: &CandidateRow, job: &JobPostingRow, policy: &MatchPolicy) -> u32 {
    CANDIDATE_SCORER.score(candidate, job, policy)
}

/// Positive signals, in a fixed order.
pub fn match_reasons(
    candidate: &CandidateRow,
    job: &JobPostingRow,
    score: u32,
    policy: &MatchPolicy,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if score > policy.excellent_reason_threshold {
        reasons.push("Excellent skills alignment with job requirements".to_string());
    } else if score > policy.good_reason_threshold {
        reasons.push("Good skills match with most requirements".to_string());
    }

    if candidate.experience_years >= policy.experience_reason_min_years {
        reasons.push(format!(
            "{} years of relevant experience",
            candidate.experience_years
        ));
    }

    if is_present(&candidate.github_url) {
        reasons.push("Active GitHub profile with code samples".to_string());
    }

    if is_present(&candidate.linkedin_url) {
        reasons.push("Complete LinkedIn professional profile".to_string());
    }

    if job.remote_ok {
        reasons.push("Open to remote work opportunities".to_string());
    }

    reasons
}

/// Warnings about missing or concerning attributes, in a fixed order.
pub fn red_flags(candidate: &CandidateRow, job: &JobPostingRow) -> Vec<String> {
    let mut flags = Vec::new();

    if !is_present(&candidate.resume_url) {
        flags.push("No resume uploaded".to_string());
    }

    if candidate.skills.is_empty() {
        flags.push("No skills listed in profile".to_string());
    }

    if candidate.experience_years == 0 {
        flags.push("No professional experience listed".to_string());
    }

    if !is_present(&candidate.github_url) && job.title.to_lowercase().contains("developer") {
        flags.push("No GitHub profile for technical role".to_string());
    }

    flags
}

// ────────────────────────────────────────────────────────────────────────────
// Components
// ────────────────────────────────────────────────────────────────────────────

fn skills_component(
    candidate: &CandidateRow,
    job: &JobPostingRow,
    policy: &MatchPolicy,
) -> Contribution {
    let cap = policy.candidate_weights.skills;
    let have = skill_set(&candidate.skills);
    let required = skill_set(&job.requirements);

    if have.is_empty() || required.is_empty() {
        return Contribution::zero(cap);
    }

    let overlap = have.intersection(&required).count();
    Contribution::ratio(overlap as f64 / required.len() as f64, cap)
}

fn experience_component(
    candidate: &CandidateRow,
    _job: &JobPostingRow,
    policy: &MatchPolicy,
) -> Contribution {
    let years = candidate.experience_years.max(0) as f64;
    Contribution::new(
        years * policy.points_per_experience_year,
        policy.candidate_weights.experience,
    )
}

fn completeness_component(
    candidate: &CandidateRow,
    _job: &JobPostingRow,
    policy: &MatchPolicy,
) -> Contribution {
    let checked = [
        &candidate.github_url,
        &candidate.linkedin_url,
        &candidate.resume_url,
        &candidate.career_goals,
    ];
    let filled = checked.iter().filter(|field| is_present(field)).count();
    Contribution::ratio(
        filled as f64 / checked.len() as f64,
        policy.candidate_weights.completeness,
    )
}

fn remote_component(
    _candidate: &CandidateRow,
    job: &JobPostingRow,
    policy: &MatchPolicy,
) -> Contribution {
    Contribution::binary(job.remote_ok, policy.candidate_weights.remote)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Lower-cased, de-duplicated skills.
fn skill_set(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|s| s.to_lowercase()).collect()
}

/// Set and non-empty. Whitespace is trimmed at the HTTP boundary, not here.
fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
