//! Anthropic messages-API search client.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use pmtn_core::NewsItem;

use crate::error::FeedError;

use super::{build_search_prompt, parse_search_response, raw_items_to_news, today};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const MODEL: &str = "claude-3-5-sonnet-20241022";
const API_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Client for Anthropic's messages endpoint.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl AnthropicClient {
    /// Creates a new client pointed at the production Anthropic API.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] on client construction failure, or
    /// [`FeedError::MalformedResponse`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            FeedError::MalformedResponse(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Search for news about a keyword, optionally biased toward countries.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network failure.
    /// - [`FeedError::Api`] on a non-2xx response.
    /// - [`FeedError::MalformedResponse`] when the completion carries no
    ///   usable JSON array.
    pub async fn search_news(
        &self,
        keyword: &str,
        countries: &[String],
    ) -> Result<Vec<NewsItem>, FeedError> {
        let prompt = build_search_prompt(keyword, countries);
        let request = MessagesRequest {
            model: MODEL,
            max_tokens: 2000,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        };

        let url = self
            .base_url
            .join("v1/messages")
            .map_err(|e| FeedError::MalformedResponse(format!("bad endpoint: {e}")))?;

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(FeedError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        let content = parsed
            .content
            .first()
            .map(|c| c.text.as_str())
            .ok_or_else(|| FeedError::MalformedResponse("empty content".to_string()))?;

        let raw = parse_search_response(content)?;
        let items = raw_items_to_news(raw, "Claude", today());
        tracing::debug!(keyword, count = items.len(), "collected Claude search results");
        Ok(items)
    }
}
