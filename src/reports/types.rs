//! Report type definitions.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Navigable HTML report with the changes-only toggle contract
    #[default]
    Html,
    /// Structured JSON output
    Json,
    /// Brief plain-text summary for terminals and CI logs
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Summary => write!(f, "summary"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Pre-formatted generation timestamp, injected by the caller.
    ///
    /// `None` omits the timestamp line entirely so that rendering the same
    /// diff twice produces byte-identical output.
    pub generated_at: Option<String>,
    /// Omit unchanged rows instead of marking them hideable
    pub only_changes: bool,
}

impl ReportConfig {
    /// Title to render, falling back to the default.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or("Configuration Drift Report")
    }
}
