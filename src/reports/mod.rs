//! Report generation for diff results.
//!
//! Three output formats:
//! - HTML: the primary deliverable, a navigable document implementing the
//!   hideable/toggle contract consumed by the external view script
//! - JSON: structured data for programmatic integration
//! - Summary: compact plain text for terminals and CI logs
//!
//! Rendering is deterministic and never mutates the diff report: the same
//! [`DiffReport`] and [`ReportConfig`] always produce byte-identical
//! output.

pub mod escape;
mod html;
mod json;
mod summary;
mod types;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{ReportConfig, ReportFormat};

use crate::diff::DiffReport;
use std::io::Write;
use thiserror::Error;

/// Class marking a row the changes-only view may hide. Part of the
/// external contract with the view script.
pub const HIDEABLE_CLASS: &str = "hideable";

/// Element id of the single changes-only toggle control. Part of the
/// external contract with the view script.
pub const TOGGLE_CONTROL_ID: &str = "toggle-unchanged";

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report from a diff result
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError>;

    /// Write a report to a writer
    fn write_to(
        &self,
        report: &DiffReport,
        config: &ReportConfig,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rendered = self.generate(report, config)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Summary => Box::new(SummaryReporter::new()),
    }
}
