//! Aggregate statistics over a user's tracked applications.
//!
//! Rates are percentages rounded to one decimal place and are 0 whenever
//! their denominator is 0.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::application::{ApplicationStatus, JobApplicationRow};

pub const DEFAULT_DASHBOARD_DAYS: i64 = 30;
pub const DEFAULT_FUNNEL_DAYS: i64 = 90;
pub const DEFAULT_PERFORMANCE_DAYS: i64 = 30;

const TOP_COMPANIES: usize = 10;
const AVERAGE_RESPONSE_RATE: f64 = 20.0;
const INDUSTRY_INTERVIEW_RATE: f64 = 15.0;
const INDUSTRY_OFFER_RATE: f64 = 3.0;

/// Maps a `time_range` query value to a window length in days.
/// Unknown or missing values fall back to `default`.
pub fn time_range_days(raw: Option<&str>, default: i64) -> i64 {
    match raw {
        Some("7_days") => 7,
        Some("30_days") => 30,
        Some("90_days") => 90,
        Some("180_days") => 180,
        Some("365_days") => 365,
        _ => default,
    }
}

pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct StatusCounts {
    total: usize,
    applied: usize,
    interviews: usize,
    rejected: usize,
    ghosted: usize,
    offers: usize,
}

impl StatusCounts {
    fn tally<'a>(rows: impl IntoIterator<Item = &'a JobApplicationRow>) -> Self {
        let mut counts = Self::default();
        for row in rows {
            counts.total += 1;
            match row.status() {
                Some(ApplicationStatus::Applied) => counts.applied += 1,
                Some(ApplicationStatus::Interview) => counts.interviews += 1,
                Some(ApplicationStatus::Rejected) => counts.rejected += 1,
                Some(ApplicationStatus::Ghosted) => counts.ghosted += 1,
                Some(ApplicationStatus::Offer) => counts.offers += 1,
                None => {}
            }
        }
        counts
    }

    fn responses(&self) -> usize {
        self.interviews + self.rejected + self.offers
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stats
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub applied: usize,
    pub interviews: usize,
    pub offers: usize,
    pub rejected: usize,
    pub ghosted: usize,
    pub response_rate: f64,
    pub offer_rate: f64,
}

pub fn application_stats(rows: &[JobApplicationRow]) -> ApplicationStats {
    let counts = StatusCounts::tally(rows);
    ApplicationStats {
        total: counts.total,
        applied: counts.applied,
        interviews: counts.interviews,
        offers: counts.offers,
        rejected: counts.rejected,
        ghosted: counts.ghosted,
        response_rate: percentage(counts.responses(), counts.total),
        offer_rate: percentage(counts.offers, counts.total),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Funnel
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelStage {
    pub stage: &'static str,
    pub count: usize,
    /// Share of all applications that reached this stage.
    pub percentage: f64,
    /// Share of the previous stage that reached this one. `None` for the first stage.
    pub conversion_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Funnel {
    pub stages: Vec<FunnelStage>,
    pub insights: Vec<String>,
}

pub fn funnel(rows: &[JobApplicationRow]) -> Funnel {
    let counts = StatusCounts::tally(rows);
    let total = counts.total;
    let responded = counts.responses();
    let interviews = counts.interviews;
    let offers = counts.offers;

    let response_rate = percentage(responded, total);
    let offer_conversion = percentage(offers, interviews);

    let stages = vec![
        FunnelStage {
            stage: "Applied",
            count: total,
            percentage: 100.0,
            conversion_rate: None,
        },
        FunnelStage {
            stage: "Response Received",
            count: responded,
            percentage: response_rate,
            conversion_rate: Some(response_rate),
        },
        FunnelStage {
            stage: "Interview",
            count: interviews,
            percentage: percentage(interviews, total),
            conversion_rate: Some(percentage(interviews, responded)),
        },
        FunnelStage {
            stage: "Offer",
            count: offers,
            percentage: percentage(offers, total),
            conversion_rate: Some(offer_conversion),
        },
    ];

    let standing = if response_rate > AVERAGE_RESPONSE_RATE {
        "above"
    } else {
        "below"
    };
    let insights = vec![
        format!("Your response rate of {response_rate:.1}% is {standing} average"),
        format!("You've received {interviews} interviews from {total} applications"),
        format!("Your offer conversion rate is {offer_conversion:.1}%"),
    ];

    Funnel { stages, insights }
}

// ────────────────────────────────────────────────────────────────────────────
// Dashboard
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_applications: usize,
    pub response_rate: f64,
    pub offer_rate: f64,
    pub avg_response_time_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCount {
    pub week: String,
    pub applications: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCount {
    pub company: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub applications_per_week: f64,
    pub interview_conversion: f64,
    pub offer_conversion: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub overview: Overview,
    pub status_breakdown: BTreeMap<String, usize>,
    pub weekly_trend: Vec<WeeklyCount>,
    pub top_companies: Vec<CompanyCount>,
    pub performance_metrics: PerformanceMetrics,
}

/// Dashboard over the `days` ending at `now`. Rows applied before the window
/// are ignored.
pub fn dashboard(rows: &[JobApplicationRow], days: i64, now: DateTime<Utc>) -> Dashboard {
    let start = now - Duration::days(days);
    let in_window: Vec<&JobApplicationRow> =
        rows.iter().filter(|a| a.applied_date >= start).collect();

    let counts = StatusCounts::tally(in_window.iter().copied());
    let total = counts.total;

    let mut status_breakdown = BTreeMap::new();
    for row in &in_window {
        *status_breakdown.entry(row.status.clone()).or_insert(0) += 1;
    }

    let weekly_trend = (0..days / 7)
        .map(|week| {
            let week_start = start + Duration::weeks(week);
            let week_end = week_start + Duration::days(7);
            WeeklyCount {
                week: week_start.format("%Y-%m-%d").to_string(),
                applications: in_window
                    .iter()
                    .filter(|a| a.applied_date >= week_start && a.applied_date < week_end)
                    .count(),
            }
        })
        .collect();

    let response_days: Vec<i64> = in_window
        .iter()
        .filter_map(|a| a.response_date.map(|r| (r - a.applied_date).num_days()))
        .collect();
    let avg_response_time_days = if response_days.is_empty() {
        0.0
    } else {
        round1(response_days.iter().sum::<i64>() as f64 / response_days.len() as f64)
    };

    let applications_per_week = if days > 0 {
        round1(total as f64 / (days as f64 / 7.0))
    } else {
        0.0
    };
    let offer_rate = percentage(counts.offers, total);

    Dashboard {
        overview: Overview {
            total_applications: total,
            response_rate: percentage(counts.responses(), total),
            offer_rate,
            avg_response_time_days,
        },
        status_breakdown,
        weekly_trend,
        top_companies: top_companies(&in_window),
        performance_metrics: PerformanceMetrics {
            applications_per_week,
            interview_conversion: percentage(counts.interviews, total),
            offer_conversion: offer_rate,
        },
    }
}

/// Most applied-to companies, ties in first-seen order.
fn top_companies(rows: &[&JobApplicationRow]) -> Vec<CompanyCount> {
    let mut companies: Vec<CompanyCount> = Vec::new();
    for row in rows {
        match companies.iter_mut().find(|c| c.company == row.company) {
            Some(entry) => entry.count += 1,
            None => companies.push(CompanyCount {
                company: row.company.clone(),
                count: 1,
            }),
        }
    }
    companies.sort_by(|a, b| b.count.cmp(&a.count));
    companies.truncate(TOP_COMPANIES);
    companies
}

// ────────────────────────────────────────────────────────────────────────────
// Performance
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct OverallMetrics {
    pub total_applications: usize,
    pub interview_rate: f64,
    pub offer_rate: f64,
    pub rejection_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentPerformance {
    pub recent_applications: usize,
    pub weekly_average: f64,
    /// "increasing" when the window holds more than 30% of all applications.
    pub trend: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Benchmarks {
    pub industry_interview_rate: f64,
    pub industry_offer_rate: f64,
    pub your_performance: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub overall_metrics: OverallMetrics,
    pub recent_performance: RecentPerformance,
    pub benchmarks: Benchmarks,
}

/// All-time rates plus activity in the last `days`. `None` when there is
/// nothing to report.
pub fn performance(
    rows: &[JobApplicationRow],
    days: i64,
    now: DateTime<Utc>,
) -> Option<PerformanceReport> {
    if rows.is_empty() {
        return None;
    }

    let counts = StatusCounts::tally(rows);
    let total = counts.total;
    let interview_rate = percentage(counts.interviews, total);

    let cutoff = now - Duration::days(days);
    let recent = rows.iter().filter(|a| a.applied_date >= cutoff).count();
    let weekly_average = if days > 0 {
        round1(recent as f64 / (days as f64 / 7.0))
    } else {
        0.0
    };
    let trend = if recent as f64 > total as f64 * 0.3 {
        "increasing"
    } else {
        "stable"
    };

    Some(PerformanceReport {
        overall_metrics: OverallMetrics {
            total_applications: total,
            interview_rate,
            offer_rate: percentage(counts.offers, total),
            rejection_rate: percentage(counts.rejected, total),
        },
        recent_performance: RecentPerformance {
            recent_applications: recent,
            weekly_average,
            trend,
        },
        benchmarks: Benchmarks {
            industry_interview_rate: INDUSTRY_INTERVIEW_RATE,
            industry_offer_rate: INDUSTRY_OFFER_RATE,
            your_performance: if interview_rate > INDUSTRY_INTERVIEW_RATE {
                "above_average"
            } else {
                "below_average"
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap()
    }

    fn make_application(
        id: i64,
        company: &str,
        status: ApplicationStatus,
        days_ago: i64,
        responded_after_days: Option<i64>,
    ) -> JobApplicationRow {
        let applied = now() - Duration::days(days_ago);
        JobApplicationRow {
            id,
            user_id: 1,
            job_title: "Backend Engineer".to_string(),
            company: company.to_string(),
            job_url: None,
            salary_range: None,
            location: None,
            job_description: None,
            notes: None,
            source: "manual".to_string(),
            status: status.as_str().to_string(),
            applied_date: applied,
            response_date: responded_after_days.map(|d| applied + Duration::days(d)),
            created_at: applied,
            updated_at: None,
        }
    }

    fn sample() -> Vec<JobApplicationRow> {
        use ApplicationStatus::*;
        vec![
            make_application(1, "Acme", Applied, 3, None),
            make_application(2, "Acme", Interview, 5, Some(3)),
            make_application(3, "Globex", Rejected, 10, Some(7)),
            make_application(4, "Initech", Offer, 20, Some(14)),
            make_application(5, "Globex", Ghosted, 25, None),
            make_application(6, "Acme", Applied, 60, None),
        ]
    }

    #[test]
    fn test_percentage_guards_zero_denominator() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
    }

    #[test]
    fn test_time_range_days() {
        assert_eq!(time_range_days(Some("7_days"), 30), 7);
        assert_eq!(time_range_days(Some("365_days"), 30), 365);
        assert_eq!(time_range_days(Some("forever"), 90), 90);
        assert_eq!(time_range_days(None, 30), 30);
    }

    #[test]
    fn test_stats_counts_and_rates() {
        let stats = application_stats(&sample());
        assert_eq!(
            stats,
            ApplicationStats {
                total: 6,
                applied: 2,
                interviews: 1,
                offers: 1,
                rejected: 1,
                ghosted: 1,
                response_rate: 50.0,
                offer_rate: 16.7,
            }
        );
    }

    #[test]
    fn test_stats_empty() {
        let stats = application_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.response_rate, 0.0);
        assert_eq!(stats.offer_rate, 0.0);
    }

    #[test]
    fn test_funnel_stages() {
        let funnel = funnel(&sample());
        let stages = &funnel.stages;
        assert_eq!(stages.len(), 4);
        assert_eq!(stages[0].conversion_rate, None);
        assert_eq!(stages[1].count, 3);
        assert_eq!(stages[1].percentage, 50.0);
        assert_eq!(stages[2].count, 1);
        assert_eq!(stages[2].conversion_rate, Some(33.3));
        assert_eq!(stages[3].conversion_rate, Some(100.0));
        assert_eq!(
            funnel.insights[0],
            "Your response rate of 50.0% is above average"
        );
        assert_eq!(
            funnel.insights[1],
            "You've received 1 interviews from 6 applications"
        );
    }

    #[test]
    fn test_funnel_empty_has_no_division_errors() {
        let funnel = funnel(&[]);
        assert!(funnel.stages.iter().all(|s| s.count == 0));
        assert!(funnel.stages[1..]
            .iter()
            .all(|s| s.percentage == 0.0 && s.conversion_rate == Some(0.0)));
        assert_eq!(
            funnel.insights[0],
            "Your response rate of 0.0% is below average"
        );
    }

    #[test]
    fn test_dashboard_window_and_breakdown() {
        let dashboard = dashboard(&sample(), 30, now());
        // The 60-day-old application is outside the window.
        assert_eq!(dashboard.overview.total_applications, 5);
        assert_eq!(dashboard.overview.response_rate, 60.0);
        assert_eq!(dashboard.overview.offer_rate, 20.0);
        // (3 + 7 + 14) / 3
        assert_eq!(dashboard.overview.avg_response_time_days, 8.0);
        assert_eq!(dashboard.status_breakdown["applied"], 1);
        assert_eq!(dashboard.status_breakdown["ghosted"], 1);
        assert_eq!(dashboard.weekly_trend.len(), 4);
        assert_eq!(
            dashboard.weekly_trend.iter().map(|w| w.applications).sum::<usize>(),
            5
        );
        assert_eq!(dashboard.performance_metrics.interview_conversion, 20.0);
        assert_eq!(dashboard.performance_metrics.applications_per_week, 1.2);
    }

    #[test]
    fn test_top_companies_sorted_with_stable_ties() {
        let dashboard = dashboard(&sample(), 90, now());
        assert_eq!(
            dashboard.top_companies,
            vec![
                CompanyCount { company: "Acme".to_string(), count: 3 },
                CompanyCount { company: "Globex".to_string(), count: 2 },
                CompanyCount { company: "Initech".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_performance_none_without_applications() {
        assert!(performance(&[], 30, now()).is_none());
    }

    #[test]
    fn test_performance_report() {
        let report = performance(&sample(), 30, now()).unwrap();
        assert_eq!(report.overall_metrics.total_applications, 6);
        assert_eq!(report.overall_metrics.interview_rate, 16.7);
        assert_eq!(report.overall_metrics.rejection_rate, 16.7);
        assert_eq!(report.recent_performance.recent_applications, 5);
        assert_eq!(report.recent_performance.trend, "increasing");
        assert_eq!(report.benchmarks.your_performance, "above_average");
    }
}
