//! Slack digest for the daily traffic report.
//!
//! Builds a Block Kit message from the recent news window and posts it to the
//! configured incoming webhook. Without a webhook the message is written to a
//! preview file instead, so the digest can be inspected locally.

pub mod digest;
pub mod webhook;

use thiserror::Error;

pub use digest::{build_digest, recent_split};
pub use webhook::{send_digest, write_preview, Delivery};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook rejected message: status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to write preview {path}: {source}")]
    Preview {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
