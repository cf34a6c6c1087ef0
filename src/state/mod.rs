//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: lifecycle of a single crawl invocation
//! - `CrawlState`: the frontier, visited set, budget counter and results owned by one crawl

mod crawl_phase;
mod crawl_state;

pub use crawl_phase::CrawlPhase;
pub use crawl_state::{CrawlState, Dequeued};
