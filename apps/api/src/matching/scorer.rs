//! Weighted multi-factor scorer shared by the candidate and job matchers.
//!
//! A scorer is an ordered list of named components. Each component returns a
//! [`Contribution`] (raw points plus the cap for that factor); the scorer clips
//! every contribution to its cap, sums them, truncates to an integer and clips
//! the total to `0..=100`.

use serde::Serialize;

use crate::matching::policy::MatchPolicy;

pub const MAX_SCORE: u32 = 100;

/// Raw points produced by one component, before clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub points: f64,
    pub cap: f64,
}

impl Contribution {
    pub fn new(points: f64, cap: f64) -> Self {
        Self { points, cap }
    }

    /// Full cap when `hit`, nothing otherwise.
    pub fn binary(hit: bool, cap: f64) -> Self {
        Self::new(if hit { cap } else { 0.0 }, cap)
    }

    /// `ratio * cap`; `ratio` above 1.0 is absorbed by the clip.
    pub fn ratio(ratio: f64, cap: f64) -> Self {
        Self::new(ratio * cap, cap)
    }

    pub fn zero(cap: f64) -> Self {
        Self::new(0.0, cap)
    }

    /// Points clipped to `[0, cap]`. NaN collapses to zero.
    pub fn clipped(&self) -> f64 {
        if self.points.is_nan() {
            return 0.0;
        }
        self.points.clamp(0.0, self.cap.max(0.0))
    }
}

/// A single scoring factor.
pub type ComponentFn<S, T> = fn(&S, &T, &MatchPolicy) -> Contribution;

pub struct Component<S, T> {
    pub name: &'static str,
    pub eval: ComponentFn<S, T>,
}

/// Clipped points of one component, for transparency in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentScore {
    pub name: &'static str,
    pub points: f64,
    pub cap: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub total: u32,
    pub components: Vec<ComponentScore>,
}

pub struct WeightedScorer<S, T> {
    components: Vec<Component<S, T>>,
}

impl<S, T> WeightedScorer<S, T> {
    pub fn new(components: Vec<Component<S, T>>) -> Self {
        Self { components }
    }

    pub fn score(&self, subject: &S, target: &T, policy: &MatchPolicy) -> u32 {
        let sum: f64 = self
            .components
            .iter()
            .map(|c| (c.eval)(subject, target, policy).clipped())
            .sum();
        finalize(sum)
    }

    pub fn breakdown(&self, subject: &S, target: &T, policy: &MatchPolicy) -> ScoreBreakdown {
        let components: Vec<ComponentScore> = self
            .components
            .iter()
            .map(|c| {
                let contribution = (c.eval)(subject, target, policy);
                ComponentScore {
                    name: c.name,
                    points: contribution.clipped(),
                    cap: contribution.cap,
                }
            })
            .collect();

        let total = finalize(components.iter().map(|c| c.points).sum());
        ScoreBreakdown { total, components }
    }
}

/// Truncates toward zero, then clips to `0..=MAX_SCORE`.
fn finalize(sum: f64) -> u32 {
    let truncated = sum.trunc();
    if truncated <= 0.0 {
        0
    } else if truncated >= MAX_SCORE as f64 {
        MAX_SCORE
    } else {
        truncated as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(f64, f64);

    fn first(s: &Pair, _: &(), _: &MatchPolicy) -> Contribution {
        Contribution::new(s.0, 60.0)
    }

    fn second(s: &Pair, _: &(), _: &MatchPolicy) -> Contribution {
        Contribution::new(s.1, 60.0)
    }

    fn scorer() -> WeightedScorer<Pair, ()> {
        WeightedScorer::new(vec![
            Component {
                name: "first",
                eval: first,
            },
            Component {
                name: "second",
                eval: second,
            },
        ])
    }

    #[test]
    fn test_contribution_clipped_to_cap() {
        assert_eq!(Contribution::new(55.0, 40.0).clipped(), 40.0);
        assert_eq!(Contribution::new(-3.0, 40.0).clipped(), 0.0);
        assert_eq!(Contribution::new(f64::NAN, 40.0).clipped(), 0.0);
        assert_eq!(Contribution::ratio(1.5, 20.0).clipped(), 20.0);
    }

    #[test]
    fn test_binary_contribution() {
        assert_eq!(Contribution::binary(true, 10.0).clipped(), 10.0);
        assert_eq!(Contribution::binary(false, 10.0).clipped(), 0.0);
    }

    #[test]
    fn test_total_truncates_not_rounds() {
        let policy = MatchPolicy::default();
        assert_eq!(scorer().score(&Pair(10.9, 10.9), &(), &policy), 21);
    }

    #[test]
    fn test_total_clipped_to_max_score() {
        let policy = MatchPolicy::default();
        // Each component clips to 60, sum 120 clips to 100.
        assert_eq!(scorer().score(&Pair(90.0, 90.0), &(), &policy), MAX_SCORE);
    }

    #[test]
    fn test_breakdown_matches_score() {
        let policy = MatchPolicy::default();
        let s = scorer();
        let pair = Pair(25.5, 70.0);
        let breakdown = s.breakdown(&pair, &(), &policy);
        assert_eq!(breakdown.total, s.score(&pair, &(), &policy));
        assert_eq!(breakdown.components.len(), 2);
        assert_eq!(breakdown.components[1].points, 60.0);
        assert_eq!(breakdown.components[0].name, "first");
    }
}
