use std::future::Future;

use spotlight_core::Event;
use thiserror::Error;

/// Failure of the event fetch capability.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The backing store could not be reached or refused the request.
    #[error("event source unavailable: {0}")]
    Unavailable(String),

    /// The store answered with data that could not be decoded.
    #[error("event source returned malformed data: {0}")]
    Malformed(String),
}

/// Fetches every event that carries a location, optionally limited to one genre.
pub trait EventSource: Send + Sync {
    fn fetch_events(
        &self,
        genre: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Event>, FetchError>> + Send;
}
