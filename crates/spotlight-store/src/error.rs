use spotlight_cluster::FetchError;
use thiserror::Error;

/// Errors returned by the event store client.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<StoreError> for FetchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Deserialize { .. } => FetchError::Malformed(err.to_string()),
            StoreError::Http(_)
            | StoreError::UnexpectedStatus { .. }
            | StoreError::InvalidBaseUrl { .. } => FetchError::Unavailable(err.to_string()),
        }
    }
}
