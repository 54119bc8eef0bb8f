//! News collection for the PMTN pipeline.
//!
//! Fetches candidate items from Google News RSS and from two AI search
//! backends (OpenAI and Anthropic), with fixed-backoff retries on transient
//! failures. The collector orchestrates source selection, cross-source
//! validation, and the RSS fallback path.

pub mod ai;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod rss;

pub use ai::{AnthropicClient, OpenAiClient};
pub use error::FeedError;
pub use pipeline::Collector;
pub use rss::fetch_google_news;
