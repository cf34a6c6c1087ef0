//! Crawl statistics
//!
//! Counters collected by the coordinator over a single run, and a plain
//! text printer for the command line.

use crate::state::CrawlPhase;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counters and timing for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched successfully (the budget counter)
    pub pages_processed: usize,

    /// Pages that matched the keywords
    pub relevant_pages: usize,

    /// Fetch attempts that failed
    pub fetch_failures: usize,

    /// Frontier entries discarded because they were already visited
    pub duplicates_skipped: usize,

    /// Addresses pushed onto the frontier by link extraction
    pub links_enqueued: usize,

    /// Entries still waiting in the frontier when the crawl stopped
    pub frontier_remaining: usize,

    /// The page budget the crawl ran with
    pub budget: usize,

    /// Why the loop stopped
    pub stop_reason: CrawlPhase,

    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,

    /// How long the run took
    pub elapsed: Duration,
}

impl CrawlStats {
    /// Share of processed pages that were relevant, as a percentage
    pub fn relevance_rate(&self) -> f64 {
        if self.pages_processed == 0 {
            return 0.0;
        }
        (self.relevant_pages as f64 / self.pages_processed as f64) * 100.0
    }

    /// Share of fetch attempts that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempts = self.pages_processed + self.fetch_failures;
        if attempts == 0 {
            return 0.0;
        }
        (self.pages_processed as f64 / attempts as f64) * 100.0
    }

    /// Human-readable stop reason
    pub fn stop_reason_label(&self) -> &'static str {
        match self.stop_reason {
            CrawlPhase::BudgetReached => "page budget reached",
            CrawlPhase::ExhaustedFrontier => "no more pages to visit",
            CrawlPhase::Cancelled => "cancelled",
            _ => "unknown",
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!(
        "  Pages processed: {} (budget {})",
        stats.pages_processed, stats.budget
    );
    println!(
        "  Relevant pages: {} ({:.1}%)",
        stats.relevant_pages,
        stats.relevance_rate()
    );
    println!("  Fetch failures: {}", stats.fetch_failures);
    println!("  Duplicates skipped: {}", stats.duplicates_skipped);
    println!("  Links enqueued: {}", stats.links_enqueued);
    println!("  Left in frontier: {}", stats.frontier_remaining);
    println!();

    println!("Stopped: {}", stats.stop_reason_label());
    println!("Duration: {:.2}s", stats.elapsed.as_secs_f64());
    println!(
        "Success Rate: {:.1}% ({} / {} fetches succeeded)",
        stats.success_rate(),
        stats.pages_processed,
        stats.pages_processed + stats.fetch_failures
    );
}

#[cfg(test)]
pub(crate) fn sample_stats() -> CrawlStats {
    CrawlStats {
        pages_processed: 8,
        relevant_pages: 2,
        fetch_failures: 2,
        duplicates_skipped: 5,
        links_enqueued: 40,
        frontier_remaining: 27,
        budget: 8,
        stop_reason: CrawlPhase::BudgetReached,
        started_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
        elapsed: Duration::from_millis(1500),
    }
}
