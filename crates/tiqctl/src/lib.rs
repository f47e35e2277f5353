//! Tiqctl - one-shot CLI views over the ticket feed.

pub mod alerts;
pub mod cli;
pub mod display;
pub mod export;
pub mod status;
pub mod theme_cmd;
pub mod tickets;
