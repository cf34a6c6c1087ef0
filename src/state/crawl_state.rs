use crate::url::Address;
use std::collections::{HashSet, VecDeque};

/// Outcome of pulling the next entry off the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dequeued {
    /// A fresh address, now claimed for fetching
    Ready(Address),

    /// The address was already visited (or is being fetched); it was discarded
    Duplicate(Address),

    /// Nothing left in the frontier
    Empty,
}

/// Per-invocation crawl state
///
/// Holds the FIFO frontier, the visited set, the budget counter and the
/// ordered relevant results. One instance belongs to exactly one crawl and
/// is mutated only by the task driving that crawl.
///
/// Deduplication is lazy: the frontier may hold the same address several
/// times, and may hold addresses that were visited after they were
/// enqueued. Every dequeue re-checks membership, so only the first copy
/// that fetches successfully is ever processed.
#[derive(Debug)]
pub struct CrawlState {
    /// Addresses awaiting processing, in discovery order
    frontier: VecDeque<Address>,

    /// Addresses fetched successfully this run
    visited: HashSet<Address>,

    /// Addresses currently being fetched
    in_flight: HashSet<Address>,

    /// Relevant addresses in the order they were processed
    results: Vec<Address>,

    /// Maximum number of successfully processed addresses
    budget: usize,

    /// Number of successfully processed addresses so far
    processed: usize,

    /// Number of fetches that failed
    fetch_failures: usize,

    /// Number of frontier entries discarded at dequeue time
    duplicates_skipped: usize,

    /// Number of addresses pushed onto the frontier (seed excluded)
    links_enqueued: usize,
}

impl CrawlState {
    /// Creates the state for a crawl starting at `seed`
    pub fn new(seed: Address, budget: usize) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(seed);

        Self {
            frontier,
            visited: HashSet::new(),
            in_flight: HashSet::new(),
            results: Vec::new(),
            budget,
            processed: 0,
            fetch_failures: 0,
            duplicates_skipped: 0,
            links_enqueued: 0,
        }
    }

    /// Returns true if another fetch may be started without risking the budget
    ///
    /// Fetches already in flight hold a reservation, so `processed` can never
    /// overshoot the budget even if every one of them succeeds.
    pub fn has_budget(&self) -> bool {
        self.processed + self.in_flight.len() < self.budget
    }

    /// Returns true once `processed` has reached the budget
    pub fn budget_spent(&self) -> bool {
        self.processed >= self.budget
    }

    /// Pulls the head of the frontier
    ///
    /// A fresh address is moved into the in-flight set before it is
    /// returned, so the check and the claim happen in one step.
    pub fn next(&mut self) -> Dequeued {
        let Some(address) = self.frontier.pop_front() else {
            return Dequeued::Empty;
        };

        if self.visited.contains(&address) || self.in_flight.contains(&address) {
            self.duplicates_skipped += 1;
            return Dequeued::Duplicate(address);
        }

        self.in_flight.insert(address.clone());
        Dequeued::Ready(address)
    }

    /// Records a successful fetch of a claimed address
    ///
    /// Marks it visited, spends one unit of budget, appends it to the
    /// results if it was relevant, and enqueues every outbound link not yet
    /// visited, in extraction order. Returns how many links were enqueued.
    pub fn record_success(
        &mut self,
        address: Address,
        relevant: bool,
        links: Vec<Address>,
    ) -> usize {
        self.in_flight.remove(&address);
        self.visited.insert(address.clone());
        self.processed += 1;

        if relevant {
            self.results.push(address);
        }

        let mut enqueued = 0;
        for link in links {
            if !self.visited.contains(&link) {
                self.frontier.push_back(link);
                enqueued += 1;
            }
        }
        self.links_enqueued += enqueued;

        enqueued
    }

    /// Records a failed fetch of a claimed address
    ///
    /// The address is released without being marked visited, so a later
    /// copy in the frontier will be attempted again.
    pub fn record_failure(&mut self, address: &Address) {
        self.in_flight.remove(address);
        self.fetch_failures += 1;
    }

    /// Drops every in-flight claim (used when a crawl is cancelled)
    pub fn abandon_in_flight(&mut self) -> usize {
        let abandoned = self.in_flight.len();
        self.in_flight.clear();
        abandoned
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn frontier_is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_visited(&self, address: &Address) -> bool {
        self.visited.contains(address)
    }

    pub fn visited(&self) -> &HashSet<Address> {
        &self.visited
    }

    pub fn results(&self) -> &[Address] {
        &self.results
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures
    }

    pub fn duplicates_skipped(&self) -> usize {
        self.duplicates_skipped
    }

    pub fn links_enqueued(&self) -> usize {
        self.links_enqueued
    }

    /// Consumes the state, returning the visited set and the ordered results
    pub fn into_parts(self) -> (HashSet<Address>, Vec<Address>) {
        (self.visited, self.results)
    }
}
