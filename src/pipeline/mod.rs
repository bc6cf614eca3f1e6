//! Pipeline orchestration for drift comparison runs.
//!
//! Shared orchestration for the load -> match -> diff -> render workflow,
//! so the CLI handler stays a thin argument-mapping layer.

mod output;
mod run;

pub use output::{write_output, OutputTarget};
pub use run::{compare_folders, run_pipeline, DomainSelection, PipelineConfig, PipelineOutcome};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Report generation failed
    #[error("report generation failed: {source}")]
    ReportFailed {
        #[source]
        source: crate::reports::ReportError,
    },

    /// Writing the rendered report failed
    #[error("output failed: {source}")]
    OutputFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// The snapshots are equivalent
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// Comparison completed but was degraded (schema mismatches)
    pub const DEGRADED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
