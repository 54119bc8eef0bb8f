use crate::app_config::{ApiType, AppConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_type = parse_api_type("PMTN_API_TYPE", &or_default("PMTN_API_TYPE", "rss"))?;
    let cross_validate = parse_bool(
        "PMTN_CROSS_VALIDATE",
        &or_default("PMTN_CROSS_VALIDATE", "false"),
    )?;

    let data_dir = PathBuf::from(or_default("PMTN_DATA_DIR", "./data"));
    let keywords_path = PathBuf::from(or_default(
        "PMTN_KEYWORDS_PATH",
        "./config/keywords.yaml",
    ));
    let log_level = or_default("PMTN_LOG_LEVEL", "info");

    let openai_api_key = lookup("OPENAI_API_KEY").ok();
    let anthropic_api_key = lookup("ANTHROPIC_API_KEY").ok();
    let slack_webhook_url = lookup("SLACK_WEBHOOK_URL").ok();
    let dashboard_url = lookup("PMTN_DASHBOARD_URL").ok();

    let request_timeout_secs = parse_u64("PMTN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PMTN_USER_AGENT", "pmtn/0.1 (traffic-news)");
    let max_retries = parse_u32("PMTN_MAX_RETRIES", "3")?;
    let retry_delay_secs = parse_u64("PMTN_RETRY_DELAY_SECS", "5")?;
    let provider_pause_ms = parse_u64("PMTN_PROVIDER_PAUSE_MS", "1000")?;
    let inter_keyword_delay_ms = parse_u64("PMTN_INTER_KEYWORD_DELAY_MS", "2000")?;
    let recent_window_hours = parse_i64("PMTN_RECENT_WINDOW_HOURS", "24")?;

    Ok(AppConfig {
        data_dir,
        keywords_path,
        log_level,
        api_type,
        cross_validate,
        openai_api_key,
        anthropic_api_key,
        slack_webhook_url,
        dashboard_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_delay_secs,
        provider_pause_ms,
        inter_keyword_delay_ms,
        recent_window_hours,
    })
}

fn parse_api_type(var: &str, raw: &str) -> Result<ApiType, ConfigError> {
    match raw.to_lowercase().as_str() {
        "rss" => Ok(ApiType::Rss),
        "openai" => Ok(ApiType::OpenAi),
        "claude" => Ok(ApiType::Claude),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("unknown API type '{other}'; expected rss, openai, or claude"),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}
