//! The `fetch` subcommand: collect, dedup, append.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Args;

use pmtn_core::{ApiType, AppConfig};
use pmtn_feed::Collector;

const NEWS_FILE: &str = "news.csv";

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// News backend to query (rss, openai, claude). Overrides PMTN_API_TYPE.
    #[arg(long)]
    api: Option<String>,

    /// Query both AI backends and cross-validate the results.
    /// Overrides PMTN_CROSS_VALIDATE.
    #[arg(long)]
    cross_validate: bool,

    /// Directory holding news.csv. Overrides PMTN_DATA_DIR.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// Run a full collection pass over every configured keyword.
///
/// Exit code contract (consumed by the scheduled workflow): `0` when new
/// items were appended, `1` when nothing new turned up. Failures propagate
/// as errors.
pub async fn run(args: &FetchArgs, config: &AppConfig) -> anyhow::Result<ExitCode> {
    let mut config = config.clone();
    if let Some(api) = args.api.as_deref() {
        config.api_type = parse_api_type(api)?;
    }
    if args.cross_validate {
        config.cross_validate = true;
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir.clone_from(dir);
    }

    let keywords = pmtn_core::load_keywords(&config.keywords_path)?;
    let news_path = config.data_dir.join(NEWS_FILE);
    let existing = pmtn_store::load(&news_path)?;
    tracing::info!(existing = existing.len(), "loaded store");

    if config.cross_validate && config.api_type != ApiType::Rss {
        tracing::info!("cross-validation mode: querying OpenAI and Claude for every keyword");
    } else {
        tracing::info!(api = %config.api_type, "collection starting");
    }

    let collector = Collector::from_config(&config)?;
    let pause = Duration::from_millis(config.inter_keyword_delay_ms);
    let mut collected = Vec::new();

    for keyword in &keywords.base_keywords {
        collected.extend(collector.collect_keyword(keyword, None).await);
        tokio::time::sleep(pause).await;
    }

    for (country, country_keyword_list) in &keywords.country_keywords {
        for keyword in country_keyword_list {
            collected.extend(collector.collect_keyword(keyword, Some(country)).await);
            tokio::time::sleep(pause).await;
        }
    }

    let unique = pmtn_store::merge_new(&existing, collected);
    if unique.is_empty() {
        tracing::info!("no new items collected");
        return Ok(ExitCode::from(1));
    }

    let added = unique.len();
    let mut all = existing;
    all.extend(unique);
    pmtn_store::save(&news_path, all)?;
    tracing::info!(added, "collection complete");

    Ok(ExitCode::SUCCESS)
}

fn parse_api_type(raw: &str) -> anyhow::Result<ApiType> {
    match raw.to_lowercase().as_str() {
        "rss" => Ok(ApiType::Rss),
        "openai" => Ok(ApiType::OpenAi),
        "claude" => Ok(ApiType::Claude),
        other => anyhow::bail!("invalid --api '{other}'; expected rss, openai, or claude"),
    }
}
