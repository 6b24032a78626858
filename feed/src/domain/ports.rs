//! Port traits
//!
//! The poll controller only talks to these; adapters provide the HTTP source
//! and the concrete containers.

use async_trait::async_trait;

use super::event::EventRecord;
use crate::error::FeedError;

/// Source of event records, one call per poll cycle
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FeedError>;
}

/// Output region that is fully replaced every poll cycle
pub trait RenderTarget: Send {
    /// Remove everything rendered so far
    fn clear(&mut self);

    /// Append one HTML fragment after the existing ones
    fn append(&mut self, fragment: String);

    /// Called once the cycle has finished writing
    fn commit(&mut self) -> Result<(), FeedError> {
        Ok(())
    }

    /// Replace the whole content with a single fragment
    fn show(&mut self, fragment: String) {
        self.clear();
        self.append(fragment);
    }
}
