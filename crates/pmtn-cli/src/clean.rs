//! The `clean` subcommand: re-classify the store and drop irrelevant rows.

use std::path::PathBuf;

use clap::Args;

use pmtn_classify::{classify, Verdict};
use pmtn_core::{AppConfig, NewsKind};

const NEWS_FILE: &str = "news.csv";

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Directory holding news.csv. Overrides PMTN_DATA_DIR.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

pub fn run(args: &CleanArgs, config: &AppConfig) -> anyhow::Result<()> {
    let data_dir = args.data_dir.as_ref().unwrap_or(&config.data_dir);
    let news_path = data_dir.join(NEWS_FILE);

    let keywords = pmtn_core::load_keywords(&config.keywords_path)?;
    let items = pmtn_store::load(&news_path)?;
    let original = items.len();

    let mut kept = Vec::with_capacity(items.len());
    let mut removed = 0usize;
    let mut reclassified = 0usize;

    for mut item in items {
        match classify(item.kind, &item.title, &item.summary, &keywords.rules) {
            Verdict::Drop => {
                tracing::debug!(title = %item.title, "dropping irrelevant item");
                removed += 1;
            }
            Verdict::Keep(kind) => {
                if item.kind != Some(kind) {
                    reclassified += 1;
                    // A reclassified item's fine category no longer applies.
                    if kind == NewsKind::TrafficImpact
                        && item.category.as_deref() == Some("gaming")
                    {
                        item.category = None;
                        item.category_group = None;
                    }
                }
                item.kind = Some(kind);
                kept.push(item);
            }
        }
    }

    let gaming = kept
        .iter()
        .filter(|i| i.kind == Some(NewsKind::Gaming))
        .count();
    let traffic = kept
        .iter()
        .filter(|i| i.kind == Some(NewsKind::TrafficImpact))
        .count();
    let final_count = kept.len();

    pmtn_store::save(&news_path, kept)?;

    tracing::info!(
        original,
        removed,
        reclassified,
        remaining = final_count,
        gaming,
        traffic_impact = traffic,
        "cleaning complete"
    );

    Ok(())
}
