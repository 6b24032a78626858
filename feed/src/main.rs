//! Repository event feed
//!
//! Polls the events endpoint and keeps an HTML page with the latest
//! repository activity up to date. Configuration comes from the environment
//! (or a `.env` file); see `Config`.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use repo_events_feed::{spawn_polling, Config, EventsClient, HtmlFileTarget, Poller};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,repo_events_feed=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let client = EventsClient::from_config(&config).context("Failed to build events client")?;
    tracing::info!(
        url = %client.events_url(),
        output = %config.output.display(),
        "Starting repository event feed"
    );

    let target = Arc::new(Mutex::new(HtmlFileTarget::new(config.output.clone())));
    let poller = Poller::new(Arc::new(client), config.poll_interval);
    let handle = spawn_polling(poller, target);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    handle.cancel().await;

    Ok(())
}
