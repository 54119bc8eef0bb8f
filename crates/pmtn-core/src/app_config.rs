use std::path::PathBuf;

/// Which news backend the fetch command talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiType {
    Rss,
    OpenAi,
    Claude,
}

impl std::fmt::Display for ApiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiType::Rss => write!(f, "rss"),
            ApiType::OpenAi => write!(f, "openai"),
            ApiType::Claude => write!(f, "claude"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub keywords_path: PathBuf,
    pub log_level: String,
    pub api_type: ApiType,
    pub cross_validate: bool,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub dashboard_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    pub provider_pause_ms: u64,
    pub inter_keyword_delay_ms: u64,
    pub recent_window_hours: i64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("data_dir", &self.data_dir)
            .field("keywords_path", &self.keywords_path)
            .field("log_level", &self.log_level)
            .field("api_type", &self.api_type)
            .field("cross_validate", &self.cross_validate)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "slack_webhook_url",
                &self.slack_webhook_url.as_ref().map(|_| "[redacted]"),
            )
            .field("dashboard_url", &self.dashboard_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("provider_pause_ms", &self.provider_pause_ms)
            .field("inter_keyword_delay_ms", &self.inter_keyword_delay_ms)
            .field("recent_window_hours", &self.recent_window_hours)
            .finish()
    }
}
