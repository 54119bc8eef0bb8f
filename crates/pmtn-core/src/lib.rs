//! Shared domain types and configuration for the PMTN pipeline.
//!
//! Holds the `NewsItem` record that flows through fetch, classification,
//! validation, and persistence, the keyword-rule tables loaded from
//! `config/keywords.yaml`, and application config from environment variables.

pub mod app_config;
pub mod config;
pub mod keywords;
pub mod types;

use thiserror::Error;

pub use app_config::{ApiType, AppConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{load_keywords, KeywordRules, KeywordSet, KeywordsFile};
pub use types::{CategoryGroup, Confidence, Continent, NewsItem, NewsKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read keywords file {path}: {source}")]
    KeywordsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse keywords file: {0}")]
    KeywordsFileParse(#[from] serde_yaml::Error),

    #[error("keywords validation failed: {0}")]
    Validation(String),
}
