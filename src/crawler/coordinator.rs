//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties everything together:
//! - Pulling addresses from the frontier and discarding duplicates
//! - Fetching pages through the injected [`Fetcher`]
//! - Classifying content against the keyword set
//! - Feeding extracted links back into the frontier
//! - Stopping on an empty frontier, a spent budget or cancellation

use crate::config::Config;
use crate::crawler::events::{CrawlEvent, EventSender};
use crate::crawler::fetcher::{FetchError, Fetcher, HttpFetcher};
use crate::crawler::parser::{HtmlLinkExtractor, LinkExtractor};
use crate::crawler::relevance::KeywordSet;
use crate::output::CrawlStats;
use crate::state::{CrawlPhase, CrawlState, Dequeued};
use crate::url::Address;
use crate::CrawlError;
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Everything a finished crawl hands back
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Relevant addresses, in the order they were processed
    pub results: Vec<Address>,

    /// Every address that was fetched successfully
    pub visited: HashSet<Address>,

    /// Counters and timing for the run
    pub stats: CrawlStats,
}

/// Drives a single focused crawl
///
/// A coordinator owns its collaborators and runs exactly once: the
/// frontier, visited set and results are created fresh inside [`run`] and
/// never shared, so independent coordinators can crawl side by side.
///
/// [`run`]: Coordinator::run
pub struct Coordinator<F = HttpFetcher, E = HtmlLinkExtractor> {
    fetcher: F,
    extractor: E,
    max_concurrent_fetches: usize,
    events: EventSender,
    cancel: CancellationToken,
    phase: CrawlPhase,
}

impl Coordinator<HttpFetcher, HtmlLinkExtractor> {
    /// Creates an HTTP-backed coordinator from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout),
        )?;

        Ok(Coordinator::new(fetcher, HtmlLinkExtractor)
            .with_concurrency(config.crawler.max_concurrent_fetches))
    }
}

impl<F, E> Coordinator<F, E>
where
    F: Fetcher,
    E: LinkExtractor,
{
    /// Creates a sequential coordinator with the given collaborators
    pub fn new(fetcher: F, extractor: E) -> Self {
        Self {
            fetcher,
            extractor,
            max_concurrent_fetches: 1,
            events: EventSender::disabled(),
            cancel: CancellationToken::new(),
            phase: CrawlPhase::Idle,
        }
    }

    /// Sets how many fetches may be in flight at once
    ///
    /// With more than one, results are recorded in fetch-completion order
    /// rather than strict breadth-first order. A frontier copy of an address
    /// that is still in flight is discarded, so if that fetch fails the
    /// address is only retried when a later page links to it again (a
    /// sequential crawl would retry it from the discarded copy). Zero is
    /// treated as one.
    pub fn with_concurrency(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches.max(1);
        self
    }

    /// Routes crawl events to the given sender
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Stops the crawl when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels this crawl
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    ///
    /// Starting from `seed`, repeatedly dequeues the next address, skips it
    /// if already visited, fetches it, classifies it against `keywords`, and
    /// enqueues its unvisited outbound links. Stops when the frontier is
    /// empty, `budget` pages have been processed, or the crawl is cancelled.
    /// A budget of zero returns immediately without fetching.
    ///
    /// Fetch failures are logged, reported as events and skipped; they
    /// neither consume budget nor mark the address visited.
    ///
    /// # Errors
    ///
    /// * `CrawlError::InvalidTransition` - This coordinator has already run
    pub async fn run(
        &mut self,
        seed: Address,
        keywords: &KeywordSet,
        budget: usize,
    ) -> Result<CrawlOutcome, CrawlError> {
        self.transition(CrawlPhase::Running)?;

        tracing::info!(
            "Starting crawl at {} (budget: {}, keywords: [{}])",
            seed,
            budget,
            keywords.joined()
        );

        let started_at = Utc::now();
        let start_time = Instant::now();
        let mut state = CrawlState::new(seed, budget);

        let reason = if self.max_concurrent_fetches > 1 {
            self.run_concurrent(&mut state, keywords).await
        } else {
            self.run_sequential(&mut state, keywords).await
        };

        self.transition(reason)?;
        self.events.send(CrawlEvent::Finished {
            reason,
            processed: state.processed(),
        });

        let stats = CrawlStats {
            pages_processed: state.processed(),
            relevant_pages: state.results().len(),
            fetch_failures: state.fetch_failures(),
            duplicates_skipped: state.duplicates_skipped(),
            links_enqueued: state.links_enqueued(),
            frontier_remaining: state.frontier_len(),
            budget,
            stop_reason: reason,
            started_at,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawling completed: {} pages processed, {} relevant, stopped on {} after {:?}",
            stats.pages_processed,
            stats.relevant_pages,
            reason,
            stats.elapsed
        );

        self.transition(CrawlPhase::Terminated)?;

        let (visited, results) = state.into_parts();
        Ok(CrawlOutcome {
            results,
            visited,
            stats,
        })
    }

    /// One fetch at a time, strictly in frontier order
    async fn run_sequential(&self, state: &mut CrawlState, keywords: &KeywordSet) -> CrawlPhase {
        loop {
            if self.cancel.is_cancelled() {
                return CrawlPhase::Cancelled;
            }

            if state.budget_spent() {
                return CrawlPhase::BudgetReached;
            }

            let address = match self.dequeue(state) {
                Some(address) => address,
                None if state.frontier_is_empty() => return CrawlPhase::ExhaustedFrontier,
                None => continue,
            };

            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    state.abandon_in_flight();
                    return CrawlPhase::Cancelled;
                }
                fetched = self.fetcher.fetch(&address) => fetched,
            };

            self.handle_fetch(state, address, fetched, keywords);
        }
    }

    /// Up to `max_concurrent_fetches` fetches in flight
    ///
    /// State is still mutated only by this task; the pool only runs the
    /// fetches themselves.
    async fn run_concurrent(&self, state: &mut CrawlState, keywords: &KeywordSet) -> CrawlPhase {
        let mut pending = FuturesUnordered::new();

        loop {
            if self.cancel.is_cancelled() {
                state.abandon_in_flight();
                return CrawlPhase::Cancelled;
            }

            while pending.len() < self.max_concurrent_fetches && state.has_budget() {
                if state.frontier_is_empty() {
                    break;
                }

                if let Some(address) = self.dequeue(state) {
                    let fetcher = &self.fetcher;
                    pending.push(async move {
                        let fetched = fetcher.fetch(&address).await;
                        (address, fetched)
                    });
                }
            }

            if pending.is_empty() {
                return if state.budget_spent() {
                    CrawlPhase::BudgetReached
                } else {
                    CrawlPhase::ExhaustedFrontier
                };
            }

            let completed = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    state.abandon_in_flight();
                    return CrawlPhase::Cancelled;
                }
                completed = pending.next() => completed,
            };

            if let Some((address, fetched)) = completed {
                self.handle_fetch(state, address, fetched, keywords);
            }
        }
    }

    /// Pulls the next fresh address, reporting skipped duplicates
    ///
    /// Returns None both for an empty frontier and for a discarded duplicate.
    fn dequeue(&self, state: &mut CrawlState) -> Option<Address> {
        match state.next() {
            Dequeued::Ready(address) => {
                tracing::info!("Crawling: {}", address);
                self.events.send(CrawlEvent::Fetching {
                    address: address.clone(),
                });
                Some(address)
            }
            Dequeued::Duplicate(address) => {
                tracing::debug!("Skipping already visited {}", address);
                self.events.send(CrawlEvent::DuplicateSkipped { address });
                None
            }
            Dequeued::Empty => None,
        }
    }

    /// Applies the result of one fetch to the crawl state
    fn handle_fetch(
        &self,
        state: &mut CrawlState,
        address: Address,
        fetched: Result<String, FetchError>,
        keywords: &KeywordSet,
    ) {
        let content = match fetched {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!("Failed to fetch {}: {}", address, error);
                state.record_failure(&address);
                self.events.send(CrawlEvent::FetchFailed { address, error });
                return;
            }
        };

        let matched = keywords.first_match(&content).map(str::to_string);
        let links = self.extractor.extract(&content, &address);
        let links_enqueued = state.record_success(address.clone(), matched.is_some(), links);

        tracing::debug!(
            "Processed {} ({} links enqueued, {} in frontier)",
            address,
            links_enqueued,
            state.frontier_len()
        );
        self.events.send(CrawlEvent::Processed {
            address: address.clone(),
            relevant: matched.is_some(),
            links_enqueued,
        });

        if let Some(keyword) = matched {
            tracing::info!("Relevant page found: {} (matched '{}')", address, keyword);
            self.events
                .send(CrawlEvent::RelevantFound { address, keyword });
        }
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), CrawlError> {
        if !self.phase.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}
