//! HTTP event source backed by reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::domain::{EventRecord, EventSource};
use crate::error::FeedError;

/// Client for the `GET /events` endpoint
#[derive(Clone)]
pub struct EventsClient {
    http: Client,
    base_url: String,
    events_path: String,
}

impl EventsClient {
    /// Create a client with explicit configuration
    pub fn new(
        base_url: &str,
        events_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, FeedError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FeedError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            events_path: events_path.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, FeedError> {
        Self::new(
            &config.base_url,
            &config.events_path,
            config.request_timeout,
        )
    }

    /// Full URL polled every cycle
    pub fn events_url(&self) -> String {
        format!("{}{}", self.base_url, self.events_path)
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<EventRecord>, FeedError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            let values: Vec<Value> = serde_json::from_str(&body)
                .map_err(|e| FeedError::Deserialization(e.to_string()))?;

            // Each element stands alone; a bad one must not sink the rest
            Ok(values.into_iter().map(EventRecord::from_value).collect())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FeedError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl EventSource for EventsClient {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FeedError> {
        let url = self.events_url();
        tracing::debug!(url = %url, "Fetching events");

        let response = self.http.get(&url).send().await?;
        self.handle_response(response).await
    }
}
