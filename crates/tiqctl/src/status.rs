//! The status view: queue KPIs and the quant block.

use anyhow::Result;
use chrono::Utc;

use tiq_common::clock::format_hours;
use tiq_common::snapshot::DashboardSnapshot;
use tiq_common::ticket::Ticket;

use crate::display;

pub fn run(tickets: &[Ticket], json: bool) -> Result<()> {
    let snapshot = DashboardSnapshot::build(tickets, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let m = &snapshot.metrics;
    println!("{}", display::head("Queue"));
    println!("{}", display::kv("total", &m.total.to_string()));
    println!(
        "{}",
        display::kv("open", &format!("{} ({}%)", m.open, m.open_rate))
    );
    println!("{}", display::kv("pending", &m.pending.to_string()));
    println!(
        "{}",
        display::kv("closed", &format!("{} ({}%)", m.closed, m.closed_rate))
    );
    println!("{}", display::kv("high priority", &m.high_prio.to_string()));
    println!("{}", display::kv("emergency", &m.emergency.to_string()));
    println!("{}", display::kv("avg age", &m.avg_age));
    println!(
        "{}",
        display::kv(
            "sla breaches",
            &format!("{} ({}%)", m.breaches, m.breach_rate)
        )
    );
    println!("{}", display::kv("risk", &display::risk(snapshot.risk)));
    println!(
        "{}",
        display::kv("open-closed delta", &format!("{:+}", snapshot.closure_gap))
    );

    let a = &snapshot.ages;
    println!();
    println!("{}", display::head("Ticket age statistics"));
    println!("{}", display::kv("p50", &format_hours(a.p50_secs as f64)));
    println!("{}", display::kv("p90", &format_hours(a.p90_secs as f64)));
    println!("{}", display::kv("p99", &format_hours(a.p99_secs as f64)));
    println!("{}", display::kv("ewma", &format_hours(a.ewma_secs as f64)));
    println!(
        "{}",
        display::kv("stddev", &format_hours(a.stddev_secs as f64))
    );
    println!("{}", display::kv("z-score", &a.zscore.to_string()));
    println!(
        "{}",
        display::kv("rate of change", &format!("{:+}%", a.roc_pct))
    );
    println!("{}", display::kv("sharpe-like", &a.sharpe_like.to_string()));

    if !snapshot.departments.is_empty() {
        println!();
        println!("{}", display::head("Department load"));
        for dept in &snapshot.departments {
            println!("{}", display::kv(&dept.dept, &dept.count.to_string()));
        }
    }

    Ok(())
}
