//! Webhook delivery with a preview-file fallback.

use std::path::Path;

use serde_json::Value;

use crate::NotifyError;

/// How a digest left the building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Posted to the webhook.
    Sent,
    /// No webhook configured; written to the preview file at this path.
    Preview(String),
}

/// Post a digest to a Slack incoming webhook.
///
/// # Errors
///
/// Returns [`NotifyError::Http`] on network failure or
/// [`NotifyError::Status`] when the webhook answers non-2xx.
pub async fn send_digest(webhook_url: &str, message: &Value) -> Result<(), NotifyError> {
    let response = reqwest::Client::new()
        .post(webhook_url)
        .json(message)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("unknown error"));
        return Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        });
    }

    tracing::info!("digest posted to Slack webhook");
    Ok(())
}

/// Write the digest to a local preview file instead of sending it.
///
/// # Errors
///
/// Returns [`NotifyError::Preview`] when the file cannot be written.
pub fn write_preview(path: &Path, message: &Value) -> Result<Delivery, NotifyError> {
    let pretty = serde_json::to_string_pretty(message).unwrap_or_else(|_| message.to_string());
    std::fs::write(path, pretty).map_err(|e| NotifyError::Preview {
        path: path.display().to_string(),
        source: e,
    })?;
    tracing::info!(path = %path.display(), "no webhook configured — digest written to preview file");
    Ok(Delivery::Preview(path.display().to_string()))
}
