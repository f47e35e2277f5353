//! Tiq Common - Shared types and the metrics-derivation pipeline.
//!
//! Everything under [`aggregate`], [`clock`], [`export`], [`metrics`],
//! [`series`], [`snapshot`] and [`view`] is a pure function of the current
//! ticket collection and an injected wall-clock instant. The only modules
//! that touch the outside world are [`feed`] (HTTP) and [`theme`] /
//! [`config`] (small files on disk).

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod export;
pub mod feed;
pub mod metrics;
pub mod series;
pub mod snapshot;
pub mod theme;
pub mod ticket;
pub mod view;

pub use aggregate::{AgeProfile, QueueMetrics, RiskLevel, SLA_SECONDS};
pub use snapshot::DashboardSnapshot;
pub use ticket::Ticket;
