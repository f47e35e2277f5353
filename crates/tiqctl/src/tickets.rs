//! The sortable, filterable ticket table.

use anyhow::Result;

use tiq_common::ticket::Ticket;
use tiq_common::view::{self, SortSpec};

use crate::display::clip;

pub fn run(tickets: &[Ticket], query: &str, sort: SortSpec, limit: Option<usize>) -> Result<()> {
    let rows = view::project(tickets, query, sort);
    let shown = limit.unwrap_or(rows.len()).min(rows.len());

    println!(
        "{:<6} {:<10} {:<10} {:<14} {:<14} {:<19} {:<18} SUBJECT",
        "ID", "NUMBER", "PRIORITY", "STATUS", "DEPT", "CREATED", "USER"
    );
    for t in rows.iter().take(shown) {
        println!(
            "{:<6} {:<10} {:<10} {:<14} {:<14} {:<19} {:<18} {}",
            t.id.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
            clip(t.number.as_deref().unwrap_or("-"), 10),
            t.priority_label(),
            clip(t.status.as_deref().unwrap_or("-"), 14),
            clip(t.dept_label(), 14),
            clip(t.created.as_deref().unwrap_or("-"), 19),
            clip(t.requester_display(), 18),
            clip(t.subject.as_deref().unwrap_or(""), 48),
        );
    }
    println!();
    println!("{shown} of {} matching tickets shown", rows.len());
    Ok(())
}
