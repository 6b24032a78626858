//! Mock implementations of the port traits

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{EventRecord, EventSource, RenderTarget};
use crate::error::FeedError;

// ============================================================================
// Event Source
// ============================================================================

/// Replays queued responses, one per fetch
///
/// Once the queue is drained every fetch returns an empty list.
#[derive(Default)]
pub struct MockEventSource {
    responses: Mutex<VecDeque<Result<Vec<EventRecord>, FeedError>>>,
    calls: AtomicUsize,
    hang: bool,
}

impl MockEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(self, events: Vec<EventRecord>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(events));
        self
    }

    pub fn with_error(self, error: FeedError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Every fetch stays pending forever
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.hang {
            std::future::pending::<()>().await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ============================================================================
// Render Target
// ============================================================================

/// Target that records fragments and commits
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub fragments: Vec<String>,
    pub commits: usize,
    pub fail_commit: bool,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_commit: true,
            ..Self::default()
        }
    }
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self) {
        self.fragments.clear();
    }

    fn append(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    fn commit(&mut self) -> Result<(), FeedError> {
        self.commits += 1;
        if self.fail_commit {
            return Err(FeedError::Io(std::io::Error::other("disk full")));
        }
        Ok(())
    }
}
