//! tiqd - support-queue telemetry daemon.
//!
//! Polls the ticket feed, rebuilds the dashboard snapshot on every tick,
//! and writes the latest snapshot JSON to the data directory. SIGUSR1
//! toggles polling; Ctrl-C shuts down.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tiq_common::config::TiqConfig;
use tiq_common::feed::FeedClient;
use tiq_common::snapshot::DashboardSnapshot;
use tiqd::poller::{Poller, PollerHandle};
use tiqd::state::DashState;

/// File the latest snapshot is written to, inside the data directory
const SNAPSHOT_FILE: &str = "snapshot.json";

#[derive(Parser)]
#[command(name = "tiqd")]
#[command(about = "Support queue telemetry daemon", long_about = None)]
#[command(version)]
struct Args {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feed URL override
    #[arg(long)]
    url: Option<String>,

    /// Poll interval override in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Run a single refresh, print the snapshot JSON to stdout, and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(TiqConfig::default_path);
    let mut config = TiqConfig::load(&config_path)?;
    if let Some(url) = args.url {
        config.feed_url = url;
    }
    if let Some(interval) = args.interval {
        config.poll_interval_secs = interval;
    }
    if config.feed_url.is_empty() {
        bail!(
            "no feed url configured; set feed_url in {} or pass --url",
            config_path.display()
        );
    }

    let client = FeedClient::new(
        &config.feed_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    if args.once {
        let tickets = client.fetch().await?;
        let snapshot = DashboardSnapshot::build(&tickets, Utc::now());
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    info!("tiqd v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        url = %client.url(),
        interval_secs = config.poll_interval_secs,
        "polling ticket feed"
    );

    let data_dir = config.data_dir();
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("could not create data dir {}", data_dir.display()))?;
    let snapshot_path = data_dir.join(SNAPSHOT_FILE);

    let state = Arc::new(Mutex::new(DashState::new()));
    let poller = Poller::spawn(Duration::from_secs(config.poll_interval_secs), {
        let state = state.clone();
        let client = client.clone();
        let snapshot_path = snapshot_path.clone();
        move || refresh(client.clone(), state.clone(), snapshot_path.clone())
    });

    spawn_pause_toggle(poller.handle());

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    poller.shutdown().await;
    Ok(())
}

/// One poll tick: fetch, fold into state, emit the snapshot.
async fn refresh(client: FeedClient, state: Arc<Mutex<DashState>>, snapshot_path: PathBuf) {
    let outcome = client.fetch().await;
    let now = Utc::now();

    let mut state = state.lock().await;
    state.apply(outcome, now);

    if let Some(err) = state.last_error() {
        // previous tickets stay on display; the stale snapshot file stands
        warn!("refresh failed: {err}");
        return;
    }

    let snapshot = state.snapshot(now);
    info!(
        total = snapshot.metrics.total,
        open = snapshot.metrics.open,
        breaches = snapshot.metrics.breaches,
        breach_rate = snapshot.metrics.breach_rate,
        risk = %snapshot.risk,
        "refresh complete"
    );
    if let Err(e) = write_snapshot(&snapshot_path, &snapshot) {
        warn!("could not write snapshot: {e:#}");
    }
}

/// Write via a temp file so readers never observe a half-written snapshot.
fn write_snapshot(path: &Path, snapshot: &DashboardSnapshot) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(snapshot)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// SIGUSR1 flips polling on and off (unix only).
#[cfg(unix)]
fn spawn_pause_toggle(handle: PollerHandle) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut stream = match signal(SignalKind::user_defined1()) {
            Ok(s) => s,
            Err(e) => {
                warn!("could not install SIGUSR1 handler: {e}");
                return;
            }
        };
        while stream.recv().await.is_some() {
            if handle.toggle() {
                info!("polling paused");
            } else {
                info!("polling resumed");
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_pause_toggle(_handle: PollerHandle) {}
