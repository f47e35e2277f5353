//! Table projection: free-text filtering and keyed sorting.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock;
use crate::ticket::Ticket;

/// Sortable ticket columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Created,
    Id,
    Number,
    PriorityId,
    Subject,
    Status,
    Dept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

/// A sort selection, e.g. `created:desc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub dir: SortDir,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Created,
            dir: SortDir::Desc,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid sort spec {0:?}, expected <key>[:asc|desc]")]
pub struct ParseSortError(String);

impl FromStr for SortSpec {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, dir) = match s.split_once(':') {
            Some((k, d)) => (k, d),
            None => (s, "desc"),
        };
        let key = match key.trim().to_lowercase().as_str() {
            "created" => SortKey::Created,
            "id" => SortKey::Id,
            "number" => SortKey::Number,
            "priority" | "priority_id" => SortKey::PriorityId,
            "subject" => SortKey::Subject,
            "status" => SortKey::Status,
            "dept" => SortKey::Dept,
            _ => return Err(ParseSortError(s.to_string())),
        };
        let dir = match dir.trim().to_lowercase().as_str() {
            "asc" => SortDir::Asc,
            "desc" => SortDir::Desc,
            _ => return Err(ParseSortError(s.to_string())),
        };
        Ok(Self { key, dir })
    }
}

/// Case-insensitive substring filter over subject, number and requester
/// name. A blank query matches everything.
pub fn filter_tickets<'a>(tickets: &'a [Ticket], query: &str) -> Vec<&'a Ticket> {
    let q = query.trim().to_lowercase();
    tickets
        .iter()
        .filter(|t| {
            if q.is_empty() {
                return true;
            }
            let subject = t.subject.as_deref().unwrap_or("").to_lowercase();
            let number = t.number.as_deref().unwrap_or("").to_lowercase();
            let name = t.requester_name().unwrap_or("").to_lowercase();
            subject.contains(&q) || number.contains(&q) || name.contains(&q)
        })
        .collect()
}

/// Sort the projection in place.
///
/// `created` compares as parsed timestamps with the comparison inverted
/// relative to the requested direction: `created:asc` yields newest-first,
/// `created:desc` oldest-first, and the two stay mutual mirrors. Missing
/// values sort as empty (timestamps as the epoch floor).
pub fn sort_tickets(rows: &mut [&Ticket], spec: SortSpec) {
    let flip = matches!(spec.dir, SortDir::Desc);
    rows.sort_by(|a, b| {
        let ord = match spec.key {
            SortKey::Created => created_stamp(a).cmp(&created_stamp(b)).reverse(),
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::PriorityId => a.priority_id.cmp(&b.priority_id),
            SortKey::Number => str_cmp(a.number.as_deref(), b.number.as_deref()),
            SortKey::Subject => str_cmp(a.subject.as_deref(), b.subject.as_deref()),
            SortKey::Status => str_cmp(a.status.as_deref(), b.status.as_deref()),
            SortKey::Dept => str_cmp(a.dept.as_deref(), b.dept.as_deref()),
        };
        if flip {
            ord.reverse()
        } else {
            ord
        }
    });
}

fn created_stamp(t: &Ticket) -> i64 {
    t.created
        .as_deref()
        .and_then(clock::parse_created)
        .map(|dt| dt.timestamp())
        .unwrap_or(i64::MIN)
}

fn str_cmp(a: Option<&str>, b: Option<&str>) -> std::cmp::Ordering {
    let a = a.unwrap_or("").to_lowercase();
    let b = b.unwrap_or("").to_lowercase();
    a.cmp(&b)
}

/// The table's visible row order: filter, then sort.
pub fn project<'a>(tickets: &'a [Ticket], query: &str, spec: SortSpec) -> Vec<&'a Ticket> {
    let mut rows = filter_tickets(tickets, query);
    sort_tickets(&mut rows, spec);
    rows
}
