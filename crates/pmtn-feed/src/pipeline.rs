//! Collection orchestration: source selection, cross-validation, RSS fallback.

use std::time::Duration;

use pmtn_classify::cross_validate;
use pmtn_core::{ApiType, AppConfig, NewsItem};

use crate::ai::{AnthropicClient, OpenAiClient};
use crate::error::FeedError;
use crate::retry::retry_with_backoff;
use crate::rss::fetch_google_news;

const LABEL_OPENAI: &str = "OpenAI";
const LABEL_CLAUDE: &str = "Claude";

/// Collects news for one keyword at a time, according to the configured API
/// type and cross-validation mode.
///
/// Source failures are explicit [`FeedError`] values internally; the
/// collector logs each one and degrades (AI → RSS) rather than aborting the
/// run, so a keyword never fails the whole fetch.
pub struct Collector {
    openai: Option<OpenAiClient>,
    anthropic: Option<AnthropicClient>,
    api_type: ApiType,
    cross_validate: bool,
    max_retries: u32,
    retry_delay: Duration,
    provider_pause: Duration,
}

impl Collector {
    /// Build a collector from application config.
    ///
    /// AI clients are only constructed when their API keys are present; a
    /// missing key surfaces later as [`FeedError::MissingApiKey`] if that
    /// provider is actually selected.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if an HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        let openai = config
            .openai_api_key
            .as_deref()
            .map(|key| OpenAiClient::new(key, config.request_timeout_secs, &config.user_agent))
            .transpose()?;
        let anthropic = config
            .anthropic_api_key
            .as_deref()
            .map(|key| AnthropicClient::new(key, config.request_timeout_secs, &config.user_agent))
            .transpose()?;

        Ok(Self {
            openai,
            anthropic,
            api_type: config.api_type,
            cross_validate: config.cross_validate,
            max_retries: config.max_retries,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            provider_pause: Duration::from_millis(config.provider_pause_ms),
        })
    }

    /// Collect items for one search keyword.
    ///
    /// Never fails: every source error is logged and the next fallback is
    /// tried, ending with an empty list when everything is exhausted.
    pub async fn collect_keyword(&self, keyword: &str, country: Option<&str>) -> Vec<NewsItem> {
        if self.cross_validate && self.api_type != ApiType::Rss {
            return self.collect_cross_validated(keyword, country).await;
        }

        match self.api_type {
            ApiType::Rss => self.rss_or_empty(keyword, country).await,
            ApiType::OpenAi => match self.fetch_openai(keyword, country).await {
                Ok(items) if !items.is_empty() => items,
                Ok(_) => {
                    tracing::info!(keyword, "OpenAI returned no items — falling back to RSS");
                    self.rss_or_empty(keyword, country).await
                }
                Err(e) => {
                    tracing::warn!(keyword, error = %e, "OpenAI search failed — falling back to RSS");
                    self.rss_or_empty(keyword, country).await
                }
            },
            ApiType::Claude => match self.fetch_anthropic(keyword, country).await {
                Ok(items) if !items.is_empty() => items,
                Ok(_) => {
                    tracing::info!(keyword, "Claude returned no items — falling back to RSS");
                    self.rss_or_empty(keyword, country).await
                }
                Err(e) => {
                    tracing::warn!(keyword, error = %e, "Claude search failed — falling back to RSS");
                    self.rss_or_empty(keyword, country).await
                }
            },
        }
    }

    /// Query both AI providers and merge their answers.
    ///
    /// Each provider failure is logged individually so "validated against two
    /// sources" and "one source only" runs are distinguishable in the logs;
    /// only when both come back empty does the collector fall back to RSS.
    async fn collect_cross_validated(
        &self,
        keyword: &str,
        country: Option<&str>,
    ) -> Vec<NewsItem> {
        tracing::info!(keyword, "cross-validation: querying OpenAI and Claude");

        let openai_items = match self.fetch_openai(keyword, country).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(keyword, source = LABEL_OPENAI, error = %e, "provider failed during cross-validation");
                Vec::new()
            }
        };

        tokio::time::sleep(self.provider_pause).await;

        let claude_items = match self.fetch_anthropic(keyword, country).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(keyword, source = LABEL_CLAUDE, error = %e, "provider failed during cross-validation");
                Vec::new()
            }
        };

        if openai_items.is_empty() && claude_items.is_empty() {
            tracing::warn!(keyword, "both AI sources empty — falling back to RSS");
            return self.rss_or_empty(keyword, country).await;
        }

        let merged = cross_validate(openai_items, claude_items, LABEL_OPENAI, LABEL_CLAUDE);
        let high = merged
            .iter()
            .filter(|n| n.confidence == Some(pmtn_core::Confidence::High))
            .count();
        tracing::info!(
            keyword,
            total = merged.len(),
            high,
            medium = merged.len() - high,
            "cross-validation complete"
        );
        merged
    }

    async fn fetch_openai(
        &self,
        keyword: &str,
        country: Option<&str>,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let Some(client) = self.openai.as_ref() else {
            return Err(FeedError::MissingApiKey("OPENAI_API_KEY"));
        };
        let countries = country_context(country);
        retry_with_backoff(self.max_retries, self.retry_delay, || {
            client.search_news(keyword, &countries)
        })
        .await
    }

    async fn fetch_anthropic(
        &self,
        keyword: &str,
        country: Option<&str>,
    ) -> Result<Vec<NewsItem>, FeedError> {
        let Some(client) = self.anthropic.as_ref() else {
            return Err(FeedError::MissingApiKey("ANTHROPIC_API_KEY"));
        };
        let countries = country_context(country);
        retry_with_backoff(self.max_retries, self.retry_delay, || {
            client.search_news(keyword, &countries)
        })
        .await
    }

    async fn rss_or_empty(&self, keyword: &str, country: Option<&str>) -> Vec<NewsItem> {
        let result = retry_with_backoff(self.max_retries, self.retry_delay, || {
            fetch_google_news(keyword, country)
        })
        .await;
        match result {
            Ok(items) => {
                tracing::debug!(keyword, count = items.len(), "collected RSS items");
                items
            }
            Err(e) => {
                tracing::warn!(keyword, error = %e, "RSS fetch failed");
                Vec::new()
            }
        }
    }
}

fn country_context(country: Option<&str>) -> Vec<String> {
    country.map(ToString::to_string).into_iter().collect()
}
