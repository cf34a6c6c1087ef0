//! Crawl events
//!
//! The coordinator reports what it does through [`CrawlEvent`]s sent over
//! an unbounded channel. Subscribing is optional; logging happens either way.

use crate::crawler::fetcher::FetchError;
use crate::state::CrawlPhase;
use crate::url::Address;
use tokio::sync::mpsc;

/// Something observable that happened during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A frontier entry was discarded because it was already visited
    DuplicateSkipped { address: Address },

    /// A fetch is about to start
    Fetching { address: Address },

    /// A fetch failed; the address was skipped
    FetchFailed { address: Address, error: FetchError },

    /// A page was fetched and processed
    Processed {
        address: Address,
        relevant: bool,
        links_enqueued: usize,
    },

    /// A processed page matched the keywords
    RelevantFound { address: Address, keyword: String },

    /// The loop stopped
    Finished { reason: CrawlPhase, processed: usize },
}

/// Sending half held by the coordinator
///
/// Sends never block and never fail the crawl; a dropped receiver simply
/// turns every send into a no-op.
#[derive(Debug, Clone, Default)]
pub struct EventSender {
    tx: Option<mpsc::UnboundedSender<CrawlEvent>>,
}

impl EventSender {
    /// A sender that discards every event
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Creates a connected sender/receiver pair
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<CrawlEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn send(&self, event: CrawlEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
