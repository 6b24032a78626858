//! Repository event feed
//!
//! Polls an events endpoint for repository activity (pushes, pull requests,
//! merges) and renders each record as an HTML fragment into a container
//! that is fully replaced on every cycle.
//!
//! - `domain`: event records and the source/target ports
//! - `render`: timestamp formatting and event messages
//! - `adapters`: reqwest event source, in-memory and HTML file containers
//! - `poller`: the poll cycle controller and its scheduled task

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod poller;
pub mod render;

#[cfg(test)]
mod test_utils;


pub use adapters::{Container, EventsClient, HtmlFileTarget, SharedContainer};
pub use config::Config;
pub use domain::{EventAction, EventRecord, EventSource, RenderTarget};
pub use error::FeedError;
pub use poller::{spawn_polling, CycleOutcome, CycleReport, PollHandle, PollState, Poller};
