//! Crawler module for focused page discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] trait
//! - HTML link extraction behind the [`LinkExtractor`] trait
//! - Keyword relevance classification
//! - The breadth-first crawl loop and its event stream

mod coordinator;
mod events;
mod fetcher;
mod parser;
mod relevance;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use events::{CrawlEvent, EventSender};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use parser::{extract_links, HtmlLinkExtractor, LinkExtractor};
pub use relevance::{is_relevant, KeywordSet};

use crate::config::{validate, Config};
use crate::url::Address;
use crate::{CrawlError, Result};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs a crawl with the given collaborators and returns the relevant addresses
///
/// This is the plain form of [`Coordinator::run`]: sequential, no events,
/// no cancellation.
pub async fn crawl<F, E>(
    fetcher: F,
    extractor: E,
    seed: Address,
    keywords: &KeywordSet,
    budget: usize,
) -> Result<Vec<Address>>
where
    F: Fetcher,
    E: LinkExtractor,
{
    let outcome = Coordinator::new(fetcher, extractor)
        .run(seed, keywords, budget)
        .await?;
    Ok(outcome.results)
}

/// Crawls the web over HTTP starting from a seed string
///
/// # Arguments
///
/// * `seed` - Absolute HTTP(S) address to start from
/// * `keywords` - Keywords a page must mention to be kept
/// * `budget` - Maximum number of pages to process
/// * `config` - Client and concurrency settings
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The crawl finished (possibly with skipped pages)
/// * `Err(CrawlError::Config)` - `config` fails validation
/// * `Err(CrawlError::InvalidInput)` - `seed` is not a valid address
pub async fn crawl_url(
    seed: &str,
    keywords: &KeywordSet,
    budget: usize,
    config: &Config,
) -> Result<CrawlOutcome> {
    validate(config)?;
    let seed = parse_seed(seed)?;
    Coordinator::from_config(config)?
        .run(seed, keywords, budget)
        .await
}

/// Validates a seed string, mapping failures to `CrawlError::InvalidInput`
pub fn parse_seed(seed: &str) -> Result<Address> {
    Address::parse(seed)
        .map_err(|e| CrawlError::InvalidInput(format!("malformed seed address: {}", e)))
}

/// Cancels `token` once `deadline` has elapsed
///
/// Must be called from within a Tokio runtime.
pub fn cancel_after(token: CancellationToken, deadline: Duration) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(deadline) => {
                tracing::warn!("Crawl deadline of {:?} reached, cancelling", deadline);
                token.cancel();
            }
        }
    });
}
