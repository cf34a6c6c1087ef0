//! HTML results page
//!
//! Renders the relevant pages as a standalone HTML document with a link
//! per result, the seed address and the keywords searched for.

use crate::output::traits::{CrawlReport, OutputResult, ReportSink};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const STYLE: &str = r#"    body { font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; }
    h1 { color: #333; }
    ul { list-style: none; padding: 0; }
    li { margin-bottom: 10px; }
    a { color: #007BFF; text-decoration: none; }
    a:hover { text-decoration: underline; }
"#;

/// Writes the report as an HTML file
#[derive(Debug, Clone)]
pub struct HtmlReport {
    path: PathBuf,
}

impl HtmlReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for HtmlReport {
    fn write(&self, report: &CrawlReport<'_>) -> OutputResult<()> {
        let html = format_html_report(report);

        let mut file = File::create(&self.path)?;
        file.write_all(html.as_bytes())?;

        tracing::info!("Results saved to {}", self.path.display());
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Formats a crawl report as an HTML document
pub fn format_html_report(report: &CrawlReport<'_>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("  <title>Focused Crawler Results</title>\n");
    html.push_str("  <style>\n");
    html.push_str(STYLE);
    html.push_str("  </style>\n</head>\n<body>\n");

    html.push_str("  <h1>Focused Crawler Results</h1>\n");
    html.push_str(&format!(
        "  <p><strong>Seed URL:</strong> {}</p>\n",
        link(report.seed.as_str())
    ));
    html.push_str(&format!(
        "  <p><strong>Keywords:</strong> {}</p>\n",
        encode_text(&report.keywords.joined())
    ));

    if let Some(stats) = report.stats {
        html.push_str(&format!(
            "  <p><strong>Pages crawled:</strong> {} of {} ({}, {:.1}s)</p>\n",
            stats.pages_processed,
            stats.budget,
            stats.stop_reason_label(),
            stats.elapsed.as_secs_f64()
        ));
    }

    if let Some(hash) = report.config_hash {
        html.push_str(&format!(
            "  <p><strong>Config hash:</strong> <code>{}</code></p>\n",
            encode_text(hash)
        ));
    }

    html.push_str("  <h2>Relevant Pages Found:</h2>\n  <ul>\n");
    for address in report.results {
        html.push_str(&format!("    <li>{}</li>\n", link(address.as_str())));
    }
    html.push_str("  </ul>\n</body>\n</html>\n");

    html
}

/// An anchor opening in a new tab
fn link(url: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\">{}</a>",
        encode_double_quoted_attribute(url),
        encode_text(url)
    )
}
