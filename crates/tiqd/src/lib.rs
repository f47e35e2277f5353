//! Tiqd - support-queue telemetry daemon.
//!
//! Polls the ticket feed on a fixed cadence, rebuilds the dashboard
//! snapshot from scratch each time, and drops the result where consumers
//! can pick it up.

pub mod poller;
pub mod state;
