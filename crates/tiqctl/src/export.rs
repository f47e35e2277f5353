//! CSV export of the visible rows.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use tiq_common::export::tickets_to_csv;
use tiq_common::ticket::Ticket;
use tiq_common::view::{self, SortSpec};

pub fn run(tickets: &[Ticket], query: &str, sort: SortSpec, output: &Path) -> Result<()> {
    let rows = view::project(tickets, query, sort);
    match tickets_to_csv(&rows) {
        Some(csv) => {
            // fs::write opens, writes and closes in one step, so the
            // handle is released as soon as the export lands
            fs::write(output, csv)
                .with_context(|| format!("could not write {}", output.display()))?;
            println!("wrote {} rows to {}", rows.len(), output.display());
        }
        None => println!("no visible rows, nothing exported"),
    }
    Ok(())
}
