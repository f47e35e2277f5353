//! Command-line surface for tiqctl.
//!
//! Keeps argument parsing separate from execution logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tiq_common::theme::Theme;
use tiq_common::view::SortSpec;

/// Tiq CLI
#[derive(Parser)]
#[command(name = "tiqctl")]
#[command(about = "Support queue telemetry - one-shot views", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Feed URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Queue KPIs, risk level and age statistics
    Status {
        /// Output the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// The visible ticket table
    Tickets {
        /// Substring filter over subject, number and requester name
        #[arg(short, long, default_value = "")]
        query: String,

        /// Sort spec, e.g. created:desc, priority:asc, number
        #[arg(short, long, default_value = "created:desc")]
        sort: SortSpec,

        /// Show at most this many rows
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Write the visible rows to a CSV file
    Export {
        /// Output path
        #[arg(short, long, default_value = "tickets.csv")]
        output: PathBuf,

        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short, long, default_value = "created:desc")]
        sort: SortSpec,
    },

    /// Tickets currently past the SLA threshold
    Alerts,

    /// Show or set the display theme
    Theme {
        /// "light" or "dark"; omit to print the current theme
        value: Option<Theme>,
    },
}
