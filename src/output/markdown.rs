//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of crawl results,
//! including the relevant pages and run statistics.

use crate::output::traits::{CrawlReport, OutputResult, ReportSink};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes the report as a markdown file
#[derive(Debug, Clone)]
pub struct MarkdownReport {
    path: PathBuf,
}

impl MarkdownReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for MarkdownReport {
    fn write(&self, report: &CrawlReport<'_>) -> OutputResult<()> {
        let markdown = format_markdown_report(report);

        let mut file = File::create(&self.path)?;
        file.write_all(markdown.as_bytes())?;

        tracing::info!("Results saved to {}", self.path.display());
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport<'_>) -> String {
    let mut md = String::new();

    md.push_str("# Focused Crawler Results\n\n");

    md.push_str(&format!("- **Seed URL**: <{}>\n", report.seed));
    md.push_str(&format!("- **Keywords**: {}\n", report.keywords.joined()));
    if let Some(hash) = report.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    md.push_str(&format!(
        "## Relevant Pages Found ({})\n\n",
        report.results.len()
    ));
    if report.results.is_empty() {
        md.push_str("_No relevant pages found._\n\n");
    } else {
        for (index, address) in report.results.iter().enumerate() {
            md.push_str(&format!("{}. <{}>\n", index + 1, address));
        }
        md.push('\n');
    }

    if let Some(stats) = report.stats {
        md.push_str("## Crawl Statistics\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!(
            "| Started | {} |\n",
            stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!(
            "| Duration | {:.2}s |\n",
            stats.elapsed.as_secs_f64()
        ));
        md.push_str(&format!("| Stopped | {} |\n", stats.stop_reason_label()));
        md.push_str(&format!(
            "| Pages Processed | {} / {} |\n",
            stats.pages_processed, stats.budget
        ));
        md.push_str(&format!(
            "| Relevant Pages | {} ({:.1}%) |\n",
            stats.relevant_pages,
            stats.relevance_rate()
        ));
        md.push_str(&format!("| Fetch Failures | {} |\n", stats.fetch_failures));
        md.push_str(&format!(
            "| Duplicates Skipped | {} |\n",
            stats.duplicates_skipped
        ));
        md.push_str(&format!("| Links Enqueued | {} |\n", stats.links_enqueued));
        md.push_str(&format!(
            "| Left in Frontier | {} |\n\n",
            stats.frontier_remaining
        ));
    }

    md
}
