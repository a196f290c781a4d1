//! HTTP client for the hosted backend's REST interface.
//!
//! Speaks the PostgREST dialect: filters are query parameters of the form
//! `column=op.value` and the API key travels in both the `apikey` and
//! `Authorization` headers.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use spotlight_cluster::{EventSource, FetchError};
use spotlight_core::{AppConfig, Event};

use crate::error::StoreError;
use crate::types::EventRow;

/// Client for the events resource of the backing store.
///
/// Use [`EventStoreClient::from_config`] in binaries or
/// [`EventStoreClient::new`] to point at a mock server in tests.
pub struct EventStoreClient {
    client: Client,
    api_key: String,
    events_url: Url,
}

impl EventStoreClient {
    /// Creates a client for `{base_url}/rest/v1/{table}`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(
        base_url: &str,
        api_key: &str,
        table: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let events_url = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("rest/v1/{}", table.trim_matches('/'))))
            .map_err(|e| StoreError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            events_url,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`EventStoreClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        Self::new(
            &config.data_api_url,
            &config.data_api_key,
            &config.events_table,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Lists every event that has both coordinates, oldest first, optionally
    /// restricted to one genre.
    ///
    /// Rows that fail to decode or carry an unusable coordinate are skipped.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Http`] on network failure.
    /// - [`StoreError::UnexpectedStatus`] on a non-2xx response.
    /// - [`StoreError::Deserialize`] if the body is not a JSON array.
    pub async fn list_located_events(
        &self,
        genre: Option<&str>,
    ) -> Result<Vec<Event>, StoreError> {
        let url = self.located_events_url(genre);
        let rows = self.request_rows(&url).await?;

        let total = rows.len();
        let events: Vec<Event> = rows
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<EventRow>(value) {
                Ok(row) => row.into_event(),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable event row");
                    None
                }
            })
            .collect();

        if events.len() < total {
            tracing::debug!(
                skipped = total - events.len(),
                total,
                "dropped event rows without a usable location"
            );
        }

        Ok(events)
    }

    /// Builds the filtered listing URL with percent-encoded query parameters.
    fn located_events_url(&self, genre: Option<&str>) -> Url {
        let mut url = self.events_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            pairs.append_pair("latitude", "not.is.null");
            pairs.append_pair("longitude", "not.is.null");
            if let Some(genre) = genre {
                pairs.append_pair("genre", &format!("eq.{genre}"));
            }
            pairs.append_pair("order", "created_at.asc");
        }
        url
    }

    /// Sends an authenticated GET, asserts a 2xx status, and parses the body
    /// as a JSON array of rows.
    async fn request_rows(&self, url: &Url) -> Result<Vec<serde_json::Value>, StoreError> {
        let response = self
            .client
            .get(url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

impl EventSource for EventStoreClient {
    async fn fetch_events(&self, genre: Option<&str>) -> Result<Vec<Event>, FetchError> {
        self.list_located_events(genre)
            .await
            .map_err(FetchError::from)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
