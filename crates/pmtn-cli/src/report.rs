//! The `report` subcommand: build and deliver the daily digest.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Args;

use pmtn_core::AppConfig;
use pmtn_notify::{build_digest, recent_split, send_digest, write_preview};

const NEWS_FILE: &str = "news.csv";
const PREVIEW_FILE: &str = "slack_preview.json";

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Size of the reporting window in hours. Overrides PMTN_RECENT_WINDOW_HOURS.
    #[arg(long)]
    hours: Option<i64>,

    /// Directory holding news.csv. Overrides PMTN_DATA_DIR.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

pub async fn run(args: &ReportArgs, config: &AppConfig) -> anyhow::Result<()> {
    let data_dir = args.data_dir.as_ref().unwrap_or(&config.data_dir);
    let news_path = data_dir.join(NEWS_FILE);
    let hours = args.hours.unwrap_or(config.recent_window_hours);

    let items = pmtn_store::load(&news_path)?;
    let now = Utc::now();
    let (traffic, gaming) = recent_split(&items, hours, now);

    tracing::info!(
        traffic_impact = traffic.len(),
        gaming = gaming.len(),
        hours,
        "building digest"
    );

    let digest = build_digest(
        &traffic,
        &gaming,
        now.date_naive(),
        config.dashboard_url.as_deref(),
    );

    match config.slack_webhook_url.as_deref() {
        Some(url) => send_digest(url, &digest).await?,
        None => {
            write_preview(Path::new(PREVIEW_FILE), &digest)?;
        }
    }

    Ok(())
}
