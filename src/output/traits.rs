//! Report sink trait and types
//!
//! A report sink renders the relevant addresses of a finished crawl into a
//! persisted artifact. It is invoked exactly once per crawl.

use crate::crawler::KeywordSet;
use crate::output::stats::CrawlStats;
use crate::url::Address;
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything a report can show
#[derive(Debug, Clone, Copy)]
pub struct CrawlReport<'a> {
    /// Relevant addresses, in crawl order
    pub results: &'a [Address],

    /// Keywords the crawl looked for
    pub keywords: &'a KeywordSet,

    /// Where the crawl started
    pub seed: &'a Address,

    /// Run counters, when available
    pub stats: Option<&'a CrawlStats>,

    /// Hash of the configuration file, when one was used
    pub config_hash: Option<&'a str>,
}

impl<'a> CrawlReport<'a> {
    pub fn new(results: &'a [Address], keywords: &'a KeywordSet, seed: &'a Address) -> Self {
        Self {
            results,
            keywords,
            seed,
            stats: None,
            config_hash: None,
        }
    }

    pub fn with_stats(mut self, stats: &'a CrawlStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_config_hash(mut self, hash: &'a str) -> Self {
        self.config_hash = Some(hash);
        self
    }
}

/// Trait for report sinks
pub trait ReportSink {
    /// Renders and persists the report
    fn write(&self, report: &CrawlReport<'_>) -> OutputResult<()>;

    /// Where the report ends up, for user-facing messages
    fn destination(&self) -> String;
}
