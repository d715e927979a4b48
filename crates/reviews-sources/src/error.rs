use thiserror::Error;

/// Failures that abort a feed run
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Cannot extract App ID from input: '{0}'")]
    InvalidAppId(String),

    #[error("Feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed request to {url} failed: {status} - {body}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("Feed document is not valid XML: {0}")]
    MalformedDocument(#[from] roxmltree::Error),

    #[error("Invalid rating '{value}' in feed entry")]
    InvalidRating {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

