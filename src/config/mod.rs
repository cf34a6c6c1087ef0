//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use focused_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will process at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FocusConfig, OutputConfig, ReportFormat, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_keywords};

use crate::crawler::{parse_seed, KeywordSet};
use crate::url::Address;
use crate::CrawlError;

impl FocusConfig {
    /// Returns the seed address and keyword set, ready for a crawl
    ///
    /// # Errors
    ///
    /// * `CrawlError::InvalidInput` - No seed, a malformed seed, or no keywords
    pub fn resolve(&self) -> Result<(Address, KeywordSet), CrawlError> {
        let seed = self
            .seed
            .as_deref()
            .ok_or_else(|| CrawlError::InvalidInput("a seed address is required".to_string()))?;
        let seed = parse_seed(seed)?;

        if self.keywords.is_empty() {
            return Err(CrawlError::InvalidInput(
                "at least one keyword is required".to_string(),
            ));
        }
        validate_keywords(&self.keywords)
            .map_err(|e| CrawlError::InvalidInput(e.to_string()))?;

        Ok((seed, KeywordSet::new(self.keywords.iter().cloned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_complete_focus() {
        let focus = FocusConfig {
            seed: Some("https://example.com/".to_string()),
            keywords: vec!["course".to_string()],
        };
        let (seed, keywords) = focus.resolve().unwrap();
        assert_eq!(seed.as_str(), "https://example.com/");
        assert_eq!(keywords.len(), 1);
    }

    #[test]
    fn test_resolve_missing_seed() {
        let focus = FocusConfig {
            seed: None,
            keywords: vec!["course".to_string()],
        };
        assert!(matches!(focus.resolve(), Err(CrawlError::InvalidInput(_))));
    }

    #[test]
    fn test_resolve_malformed_seed() {
        let focus = FocusConfig {
            seed: Some("example dot com".to_string()),
            keywords: vec!["course".to_string()],
        };
        assert!(matches!(focus.resolve(), Err(CrawlError::InvalidInput(_))));
    }

    #[test]
    fn test_resolve_without_keywords() {
        let focus = FocusConfig {
            seed: Some("https://example.com/".to_string()),
            keywords: vec![],
        };
        assert!(matches!(focus.resolve(), Err(CrawlError::InvalidInput(_))));
    }
}
