//! OpenAI chat-completions search client.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use pmtn_core::NewsItem;

use crate::error::FeedError;

use super::{build_search_prompt, parse_search_response, raw_items_to_news, today};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/";
const MODEL: &str = "gpt-4o-mini";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for OpenAI's chat-completions endpoint.
///
/// Use [`OpenAiClient::new`] for production or
/// [`OpenAiClient::with_base_url`] to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl OpenAiClient {
    /// Creates a new client pointed at the production OpenAI API.
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
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a news analyst. Return only valid JSON array.",
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 2000,
        };

        let url = self
            .base_url
            .join("v1/chat/completions")
            .map_err(|e| FeedError::MalformedResponse(format!("bad endpoint: {e}")))?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
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

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| FeedError::MalformedResponse("empty choices".to_string()))?;

        let raw = parse_search_response(content)?;
        let items = raw_items_to_news(raw, "OpenAI", today());
        tracing::debug!(keyword, count = items.len(), "collected OpenAI search results");
        Ok(items)
    }
}
