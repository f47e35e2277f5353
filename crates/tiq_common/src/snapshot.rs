//! One refresh worth of derived dashboard data.
//!
//! Built from scratch on every poll; downstream consumers read it in
//! isolation and never reach back into the ticket list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    self, AgeProfile, DeptCount, PriorityCount, QueueMetrics, RiskLevel,
};
use crate::clock;
use crate::series::{self, ThroughputPoint, TrendPoint, THROUGHPUT_HOURS};
use crate::ticket::Ticket;

/// How many departments the load panel keeps
pub const DEPT_LOAD_LIMIT: usize = 6;

/// One SLA breach, trimmed down to what the alerts panel shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreachAlert {
    pub id: Option<i64>,
    pub number: Option<String>,
    pub subject: Option<String>,
    pub requester: String,
    pub created: Option<String>,
    /// Age at snapshot time, whole hours
    pub age_hours: i64,
}

/// The full derived bundle handed to whatever renders the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub metrics: QueueMetrics,
    pub risk: RiskLevel,
    pub closure_gap: i64,
    pub ages: AgeProfile,
    pub trend: Vec<TrendPoint>,
    pub throughput: Vec<ThroughputPoint>,
    pub priorities: Vec<PriorityCount>,
    pub departments: Vec<DeptCount>,
    pub breaches: Vec<BreachAlert>,
}

impl DashboardSnapshot {
    /// Derive everything the dashboard shows from the raw collection.
    pub fn build(tickets: &[Ticket], now: DateTime<Utc>) -> Self {
        let metrics = QueueMetrics::compute(tickets, now);
        let risk = metrics.risk_level();
        let closure_gap = metrics.closure_gap();
        let ages = aggregate::collect_ages(tickets, now);

        let breaches = aggregate::sla_breaches(tickets, now)
            .into_iter()
            .map(|t| {
                let age = t
                    .created
                    .as_deref()
                    .and_then(|c| clock::seconds_since(c, now))
                    .unwrap_or(0.0);
                BreachAlert {
                    id: t.id,
                    number: t.number.clone(),
                    subject: t.subject.clone(),
                    requester: t.requester_display().to_string(),
                    created: t.created.clone(),
                    age_hours: (age / 3600.0).round() as i64,
                }
            })
            .collect();

        Self {
            generated_at: now,
            metrics,
            risk,
            closure_gap,
            ages: AgeProfile::from_ages(&ages),
            trend: series::daily_trend(tickets, now),
            throughput: series::hourly_throughput(tickets, now, THROUGHPUT_HOURS),
            priorities: aggregate::priority_breakdown(tickets),
            departments: aggregate::dept_load(tickets, DEPT_LOAD_LIMIT),
            breaches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_snapshot() {
        let now = clock::parse_created("2024-05-02T12:00:00").unwrap();
        let snap = DashboardSnapshot::build(&[], now);

        assert_eq!(snap.metrics.total, 0);
        assert_eq!(snap.risk, RiskLevel::Stable);
        assert_eq!(snap.closure_gap, 0);
        assert!(snap.breaches.is_empty());
        // trend degrades to one zero point for the current day
        assert_eq!(snap.trend.len(), 1);
        assert_eq!(snap.trend[0].day, "2024-05-02");
        assert_eq!(snap.trend[0].count, 0);
        assert_eq!(snap.throughput.len(), THROUGHPUT_HOURS);
    }

    #[test]
    fn test_snapshot_serializes_round_trip() {
        let now = clock::parse_created("2024-05-02T12:00:00").unwrap();
        let tickets = vec![Ticket {
            id: Some(1),
            status: Some("Open".to_string()),
            created: Some("2024-04-28 12:00:00".to_string()),
            ..Default::default()
        }];
        let snap = DashboardSnapshot::build(&tickets, now);

        let json = serde_json::to_string(&snap).unwrap();
        let parsed: DashboardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.metrics.total, 1);
        assert_eq!(parsed.breaches.len(), 1);
        assert_eq!(parsed.breaches[0].age_hours, 96);
    }
}
