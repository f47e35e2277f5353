//! Single-pass aggregation of the raw ticket collection.
//!
//! Every value here is recomputed from scratch on each refresh; nothing is
//! incremental and nothing mutates the source records. Order of the input
//! collection is irrelevant except for `status_counts`, which preserves
//! first-seen order for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::metrics;
use crate::ticket::{Ticket, PRIORITY_EMERGENCY, PRIORITY_HIGH};

/// SLA threshold: a ticket older than 48 hours is in breach
pub const SLA_SECONDS: f64 = 48.0 * 3600.0;

/// Smoothing factor the age EWMA uses (deliberately heavier than the
/// reusable default in [`metrics::DEFAULT_EWMA_ALPHA`])
pub const AGE_EWMA_ALPHA: f64 = 0.25;

/// Occurrence count for one distinct raw status string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Counts and rates derived from one pass over the collection.
///
/// The open/pending/closed buckets are substring classifications and are
/// intentionally not mutually exclusive; a status like "Closed - Reopened"
/// counts toward both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueMetrics {
    pub total: usize,
    pub open: usize,
    pub pending: usize,
    pub closed: usize,
    pub high_prio: usize,
    pub emergency: usize,
    /// Raw status string -> count, first-seen order
    pub status_counts: Vec<StatusCount>,
    /// Tickets whose age exceeds [`SLA_SECONDS`]
    pub breaches: usize,
    /// Mean ticket age, rounded to whole seconds; 0 when no ages parsed
    pub avg_age_secs: i64,
    /// Formatted mean age, `"-"` when zero
    pub avg_age: String,
    /// Rounded percentages; 0 when the collection is empty
    pub breach_rate: i64,
    pub open_rate: i64,
    pub closed_rate: i64,
}

impl QueueMetrics {
    /// Aggregate the full collection in a single pass.
    pub fn compute(tickets: &[Ticket], now: DateTime<Utc>) -> Self {
        let total = tickets.len();
        let mut open = 0;
        let mut pending = 0;
        let mut closed = 0;
        let mut high_prio = 0;
        let mut emergency = 0;
        let mut breaches = 0;
        let mut status_counts: Vec<StatusCount> = Vec::new();
        let mut ages: Vec<f64> = Vec::new();

        for t in tickets {
            let status = t.status.as_deref().unwrap_or("").to_lowercase();
            if status.contains("open") {
                open += 1;
            }
            if status.contains("clos") {
                closed += 1;
            }
            if status.contains("pend") {
                pending += 1;
            }

            match t.priority_id {
                Some(p) if p >= PRIORITY_HIGH => {
                    high_prio += 1;
                    if p == PRIORITY_EMERGENCY {
                        emergency += 1;
                    }
                }
                _ => {}
            }

            if let Some(age) = t
                .created
                .as_deref()
                .and_then(|c| clock::seconds_since(c, now))
            {
                if age > SLA_SECONDS {
                    breaches += 1;
                }
                ages.push(age);
            }

            let raw = match t.status.as_deref() {
                Some(s) if !s.is_empty() => s,
                _ => "Unknown",
            };
            match status_counts.iter_mut().find(|c| c.status == raw) {
                Some(entry) => entry.count += 1,
                None => status_counts.push(StatusCount {
                    status: raw.to_string(),
                    count: 1,
                }),
            }
        }

        let avg_age_secs = if ages.is_empty() {
            0
        } else {
            metrics::mean(&ages).round() as i64
        };
        let avg_age = if avg_age_secs == 0 {
            "-".to_string()
        } else {
            clock::format_hours(avg_age_secs as f64)
        };

        let pct = |part: usize| {
            if total == 0 {
                0
            } else {
                (part as f64 / total as f64 * 100.0).round() as i64
            }
        };

        Self {
            total,
            open,
            pending,
            closed,
            high_prio,
            emergency,
            status_counts,
            breaches,
            avg_age_secs,
            avg_age,
            breach_rate: pct(breaches),
            open_rate: pct(open),
            closed_rate: pct(closed),
        }
    }

    /// Three-tier operational risk from breach rate and emergency count
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::classify(self.breach_rate, self.emergency)
    }

    /// Open minus closed; negative when the queue is draining
    pub fn closure_gap(&self) -> i64 {
        self.open as i64 - self.closed as i64
    }
}

/// Derived operational risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Stable,
    Elevated,
    Critical,
}

impl RiskLevel {
    /// Critical is checked first; the order of evaluation matters.
    pub fn classify(breach_rate: i64, emergency: usize) -> Self {
        if breach_rate >= 25 || emergency >= 5 {
            Self::Critical
        } else if breach_rate >= 12 || emergency >= 2 {
            Self::Elevated
        } else {
            Self::Stable
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stable => write!(f, "Stable"),
            Self::Elevated => write!(f, "Elevated"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Ages in seconds for every ticket with a parsable creation timestamp.
///
/// Tickets that fail to parse are excluded from every age-based statistic.
pub fn collect_ages(tickets: &[Ticket], now: DateTime<Utc>) -> Vec<f64> {
    tickets
        .iter()
        .filter_map(|t| t.created.as_deref())
        .filter_map(|c| clock::seconds_since(c, now))
        .collect()
}

/// Tickets currently past the SLA threshold
pub fn sla_breaches<'a>(tickets: &'a [Ticket], now: DateTime<Utc>) -> Vec<&'a Ticket> {
    tickets
        .iter()
        .filter(|t| {
            t.created
                .as_deref()
                .and_then(|c| clock::seconds_since(c, now))
                .is_some_and(|age| age > SLA_SECONDS)
        })
        .collect()
}

/// Percentile and dispersion estimates over the ticket age distribution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgeProfile {
    /// Median, tail and extreme-tail age in whole seconds
    pub p50_secs: i64,
    pub p90_secs: i64,
    pub p99_secs: i64,
    pub stddev_secs: i64,
    /// Latest EWMA value (alpha = [`AGE_EWMA_ALPHA`]), whole seconds
    pub ewma_secs: i64,
    /// Standard score of the newest age, two decimals
    pub zscore: f64,
    /// Rate of change between the two newest ages, rounded percent
    pub roc_pct: i64,
    /// Dispersion-normalized mean age, two decimals
    pub sharpe_like: f64,
}

impl AgeProfile {
    pub fn from_ages(ages: &[f64]) -> Self {
        let smoothed = metrics::ewma(ages, AGE_EWMA_ALPHA);
        Self {
            p50_secs: metrics::percentile(ages, 0.5).round() as i64,
            p90_secs: metrics::percentile(ages, 0.9).round() as i64,
            p99_secs: metrics::percentile(ages, 0.99).round() as i64,
            stddev_secs: metrics::stddev(ages).round() as i64,
            ewma_secs: smoothed.last().copied().unwrap_or(0.0).round() as i64,
            zscore: round2(metrics::zscore(ages, None)),
            roc_pct: (metrics::rate_of_change(ages) * 100.0).round() as i64,
            sharpe_like: round2(metrics::sharpe_like(ages)),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count per priority label, fixed Low..Emergency order.
///
/// Unrecognized codes are not folded into any of the four buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCount {
    pub label: String,
    pub count: u64,
}

pub fn priority_breakdown(tickets: &[Ticket]) -> Vec<PriorityCount> {
    let mut counts = [0u64; 4];
    for t in tickets {
        match t.priority_id {
            Some(p @ 1..=4) => counts[(p - 1) as usize] += 1,
            _ => {}
        }
    }
    ["Low", "Normal", "High", "Emergency"]
        .into_iter()
        .zip(counts)
        .map(|(label, count)| PriorityCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// Count per department, descending, cut to `limit` entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeptCount {
    pub dept: String,
    pub count: u64,
}

pub fn dept_load(tickets: &[Ticket], limit: usize) -> Vec<DeptCount> {
    let mut counts: Vec<DeptCount> = Vec::new();
    for t in tickets {
        let dept = t.dept_label();
        match counts.iter_mut().find(|c| c.dept == dept) {
            Some(entry) => entry.count += 1,
            None => counts.push(DeptCount {
                dept: dept.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
