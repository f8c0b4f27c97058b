//! Job-to-profile matching: how well a job listing fits a seeker's preferences.

use once_cell::sync::Lazy;

use crate::matching::policy::MatchPolicy;
use crate::matching::salary::extract_min_salary;
use crate::matching::scorer::{Component, Contribution, ScoreBreakdown, WeightedScorer};
use crate::models::job_posting::JobPostingRow;
use crate::models::profile::UserProfile;

static JOB_SCORER: Lazy<WeightedScorer<UserProfile, JobPostingRow>> = Lazy::new(|| {
    WeightedScorer::new(vec![
        Component {
            name: "skills",
            eval: skills_component,
        },
        Component {
            name: "location",
            eval: location_component,
        },
        Component {
            name: "experience_level",
            eval: experience_level_component,
        },
        Component {
            name: "company",
            eval: company_component,
        },
        Component {
            name: "salary",
            eval: salary_component,
        },
    ])
});

pub fn score(profile: &UserProfile, job: &JobPostingRow, policy: &MatchPolicy) -> u32 {
    JOB_SCORER.score(profile, job, policy)
}

pub fn breakdown(profile: &UserProfile, job: &JobPostingRow, policy: &MatchPolicy) -> ScoreBreakdown {
    JOB_SCORER.breakdown(profile, job, policy)
}

/// Seniority bucket a number of years falls into. Boundaries overlap on
/// purpose: 2 years counts as entry and mid, 5 as mid and senior.
pub fn experience_level_matches(level: &str, years: i32) -> bool {
    let level = level.to_lowercase();
    (level.contains("entry") && years <= 2)
        || (level.contains("mid") && (2..=5).contains(&years))
        || (level.contains("senior") && years >= 5)
}

fn skills_component(profile: &UserProfile, job: &JobPostingRow, policy: &MatchPolicy) -> Contribution {
    let cap = policy.job_weights.skills;
    let skills: Vec<String> = profile
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if skills.is_empty() {
        return Contribution::zero(cap);
    }

    let requirements: Vec<String> = job.requirements.iter().map(|r| r.to_lowercase()).collect();
    let description = job.description.to_lowercase();

    let matched = skills
        .iter()
        .filter(|skill| {
            requirements.iter().any(|r| r.contains(skill.as_str()))
                || description.contains(skill.as_str())
        })
        .count();

    Contribution::ratio(matched as f64 / skills.len() as f64, cap)
}

fn location_component(profile: &UserProfile, job: &JobPostingRow, policy: &MatchPolicy) -> Contribution {
    let location = job.location.to_lowercase();
    let hit = profile.preferred_locations.is_empty()
        || location.contains("remote")
        || profile
            .preferred_locations
            .iter()
            .any(|l| location.contains(&l.to_lowercase()));
    Contribution::binary(hit, policy.job_weights.location)
}

fn experience_level_component(
    profile: &UserProfile,
    job: &JobPostingRow,
    policy: &MatchPolicy,
) -> Contribution {
    let hit = job
        .experience_level
        .as_deref()
        .is_some_and(|level| experience_level_matches(level, profile.experience_years));
    Contribution::binary(hit, policy.job_weights.experience_level)
}

fn company_component(profile: &UserProfile, job: &JobPostingRow, policy: &MatchPolicy) -> Contribution {
    let company = job.company.to_lowercase();
    let hit = profile.preferred_companies.is_empty()
        || profile
            .preferred_companies
            .iter()
            .any(|c| company.contains(&c.to_lowercase()));
    Contribution::binary(hit, policy.job_weights.company)
}

/// With no extractable number the floor counts as met only when it is unset (zero).
fn salary_component(profile: &UserProfile, job: &JobPostingRow, policy: &MatchPolicy) -> Contribution {
    let extracted = job.salary_range.as_deref().and_then(extract_min_salary);
    let hit = match extracted {
        Some(job_min) => job_min >= profile.min_salary,
        None => profile.min_salary == 0,
    };
    Contribution::binary(hit, policy.job_weights.salary)
}
