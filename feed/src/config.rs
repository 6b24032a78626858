use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_EVENTS_PATH: &str = "/events";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OUTPUT: &str = "events.html";

#[derive(Debug, Clone)]
pub struct Config {
    /// Server hosting the events endpoint
    pub base_url: String,
    pub events_path: String,
    pub poll_interval: Duration,
    /// Whole-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// HTML page the container is written to after every cycle
    pub output: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let poll_secs = non_empty("FEED_POLL_INTERVAL_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        let timeout_secs = non_empty("FEED_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let events_path = non_empty("FEED_EVENTS_PATH")
            .map(|p| {
                if p.starts_with('/') {
                    p
                } else {
                    format!("/{}", p)
                }
            })
            .unwrap_or_else(|| DEFAULT_EVENTS_PATH.to_string());

        Self {
            base_url: non_empty("FEED_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            events_path,
            poll_interval: Duration::from_secs(poll_secs),
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            output: non_empty("FEED_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        }
    }
}
