use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the marketplace backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("network error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with HTTP status {status}")]
    Status { endpoint: String, status: StatusCode },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
