//! Postdeck - social media content calendar
//!
//! Command-line entry point: loads a store snapshot and prints the
//! reconciled month view as JSON.
//!
//! ```text
//! postdeck <snapshot.json> <YYYY-MM> [owner]
//! ```

use std::io::Write;

use anyhow::{anyhow, bail, Context};
use postdeck_domain::{Config, OwnerScope};
use postdeck_infra::StoreSnapshot;
use postdeck_lib::utils::logging::init_logging;
use postdeck_lib::{get_month_view, AppContext};
use tracing::{info, warn};

const USAGE: &str = "usage: postdeck <snapshot.json> <YYYY-MM> [owner]";
const DEFAULT_OWNER: &str = "local";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = match postdeck_infra::config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("postdeck: using default configuration ({err})");
            Config::default()
        }
    };
    init_logging(&config.logging).context("failed to initialise logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(err) => warn!(error = %err, "No .env file loaded"),
    }

    let mut args = std::env::args().skip(1);
    let snapshot_path = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let month_arg = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let owner = OwnerScope::new(args.next().unwrap_or_else(|| DEFAULT_OWNER.to_string()));
    let (year, month) = parse_year_month(&month_arg)?;

    let snapshot = StoreSnapshot::read(&snapshot_path)
        .await
        .with_context(|| format!("failed to read snapshot {snapshot_path}"))?;
    let ctx = AppContext::with_snapshot(config, owner.clone(), snapshot)
        .context("failed to initialise application context")?;

    let view = get_month_view(&ctx, &owner, year, month)
        .await
        .map_err(|notification| anyhow!(notification.message))?;
    info!(%owner, year, month, events = view.view.event_count(), "Month view ready");

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &view)?;
    writeln!(stdout)?;
    Ok(())
}

fn parse_year_month(value: &str) -> anyhow::Result<(i32, u32)> {
    let Some((year, month)) = value.split_once('-') else {
        bail!("expected YYYY-MM, got '{value}'");
    };
    let year = year.parse().with_context(|| format!("invalid year in '{value}'"))?;
    let month = month.parse().with_context(|| format!("invalid month in '{value}'"))?;
    Ok((year, month))
}
