//! Mutable dashboard state owned by the daemon loop.
//!
//! The pipeline itself is pure; this is the one place the daemon keeps
//! anything between refreshes. A failed fetch keeps the previous tickets
//! on display and records the error message.

use chrono::{DateTime, Utc};
use tiq_common::feed::FeedError;
use tiq_common::snapshot::DashboardSnapshot;
use tiq_common::ticket::Ticket;

#[derive(Default)]
pub struct DashState {
    tickets: Vec<Ticket>,
    last_updated: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl DashState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fetch outcome into the state.
    pub fn apply(&mut self, outcome: Result<Vec<Ticket>, FeedError>, now: DateTime<Utc>) {
        match outcome {
            Ok(tickets) => {
                self.tickets = tickets;
                self.last_updated = Some(now);
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Derive the full dashboard bundle from the current tickets.
    pub fn snapshot(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot::build(&self.tickets, now)
    }
}
