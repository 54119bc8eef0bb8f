use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("API error: status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("missing API key: {0} is not set")]
    MissingApiKey(&'static str),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
