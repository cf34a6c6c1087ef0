//! Output module for rendering crawl results
//!
//! This module handles:
//! - The [`ReportSink`] contract and the report data handed to it
//! - HTML and markdown report files
//! - Crawl statistics and their console summary

mod html;
mod markdown;
pub mod stats;
mod traits;

pub use html::{format_html_report, HtmlReport};
pub use markdown::{format_markdown_report, MarkdownReport};
pub use stats::{print_statistics, CrawlStats};
pub use traits::{CrawlReport, OutputError, OutputResult, ReportSink};

use crate::config::{OutputConfig, ReportFormat};
use crate::Result;

/// Builds the report sink described by the output configuration
pub fn report_sink(config: &OutputConfig) -> Box<dyn ReportSink> {
    match config.format {
        ReportFormat::Html => Box::new(HtmlReport::new(&config.report_path)),
        ReportFormat::Markdown => Box::new(MarkdownReport::new(&config.report_path)),
    }
}

/// Hands a finished crawl to `sink`
///
/// A failed write ends the invocation as `CrawlError::Write`.
pub fn write_report(sink: &dyn ReportSink, report: &CrawlReport<'_>) -> Result<()> {
    sink.write(report)?;
    tracing::debug!(
        "Report with {} result(s) written to {}",
        report.results.len(),
        sink.destination()
    );
    Ok(())
}
