//! The SLA breach alert list.

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;

use tiq_common::snapshot::DashboardSnapshot;
use tiq_common::ticket::Ticket;

pub fn run(tickets: &[Ticket]) -> Result<()> {
    let snapshot = DashboardSnapshot::build(tickets, Utc::now());

    if snapshot.breaches.is_empty() {
        println!("No breaches");
        return Ok(());
    }

    for alert in &snapshot.breaches {
        println!(
            "{} #{} - {}  ({}, {}h)",
            "!".red().bold(),
            alert.number.as_deref().unwrap_or("-"),
            alert.subject.as_deref().unwrap_or("(no subject)"),
            alert.requester,
            alert.age_hours,
        );
    }
    println!();
    println!("{} tickets past SLA", snapshot.breaches.len());
    Ok(())
}
