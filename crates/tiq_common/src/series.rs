//! Time-bucketed series feeding the trend and throughput views.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::metrics;
use crate::ticket::Ticket;

/// Moving-average window for the daily trend
pub const TREND_MA_WINDOW: usize = 3;

/// Moving-average window for the hourly throughput
pub const THROUGHPUT_MA_WINDOW: usize = 4;

/// Size of the rolling throughput window
pub const THROUGHPUT_HOURS: usize = 24;

/// One calendar day of ticket volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// UTC day, `YYYY-MM-DD`
    pub day: String,
    pub count: u64,
    /// Trailing moving average over [`TREND_MA_WINDOW`] days
    pub ma: f64,
}

/// Tickets grouped by UTC calendar day, ascending.
///
/// Lexicographic order of the `YYYY-MM-DD` keys is chronological, so a
/// BTreeMap does the sorting. When no ticket has a parsable date the
/// series still carries a single zero point for the current day.
pub fn daily_trend(tickets: &[Ticket], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let mut per_day: BTreeMap<String, u64> = BTreeMap::new();
    for t in tickets {
        let Some(created) = t.created.as_deref() else {
            continue;
        };
        let Some(dt) = clock::parse_created(created) else {
            continue;
        };
        *per_day.entry(dt.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
    }

    if per_day.is_empty() {
        return vec![TrendPoint {
            day: now.format("%Y-%m-%d").to_string(),
            count: 0,
            ma: 0.0,
        }];
    }

    let counts: Vec<f64> = per_day.values().map(|&c| c as f64).collect();
    let ma = metrics::moving_average(&counts, TREND_MA_WINDOW);
    per_day
        .into_iter()
        .zip(ma)
        .map(|((day, count), ma)| TrendPoint { day, count, ma })
        .collect()
}

/// One hour bucket of ticket arrivals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputPoint {
    /// Display label, hour of day `HH`
    pub hour: String,
    pub count: u64,
    /// Trailing moving average over [`THROUGHPUT_MA_WINDOW`] buckets
    pub ma: f64,
}

/// Arrivals per hour over the `hours` hours ending at `now`.
///
/// Exactly `hours` zero-initialized buckets keyed by UTC date-hour;
/// tickets outside the window or with unparsable timestamps are dropped
/// silently.
pub fn hourly_throughput(
    tickets: &[Ticket],
    now: DateTime<Utc>,
    hours: usize,
) -> Vec<ThroughputPoint> {
    let mut keys = Vec::with_capacity(hours);
    for i in 0..hours {
        let t = now - Duration::hours((hours - 1 - i) as i64);
        keys.push(t.format("%Y-%m-%dT%H").to_string());
    }

    let mut counts = vec![0u64; hours];
    for t in tickets {
        let Some(created) = t.created.as_deref() else {
            continue;
        };
        let Some(dt) = clock::parse_created(created) else {
            continue;
        };
        let key = dt.format("%Y-%m-%dT%H").to_string();
        if let Some(pos) = keys.iter().position(|k| *k == key) {
            counts[pos] += 1;
        }
    }

    let as_floats: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let ma = metrics::moving_average(&as_floats, THROUGHPUT_MA_WINDOW);
    keys.into_iter()
        .zip(counts)
        .zip(ma)
        .map(|((key, count), ma)| ThroughputPoint {
            // the date-hour key is YYYY-MM-DDTHH; display wants the HH part
            hour: key[11..].to_string(),
            count,
            ma,
        })
        .collect()
}
