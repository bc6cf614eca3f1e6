//! **Configuration drift comparison for identity-management deployments.**
//!
//! `idm-config-diff` compares two exported configuration folders, a pilot
//! candidate against a production baseline, and reports every structural
//! difference between them. It powers a command-line tool for change review
//! and a Rust library for programmatic integration.
//!
//! Exports from the platform's two configuration domains are supported:
//! the synchronization engine (`sync-*.xml`) and the service tier
//! (`service-*.xml`). Entities are matched by stable identity, compared
//! attribute by attribute, and rendered into a navigable HTML report whose
//! unchanged rows can be hidden by the companion view script.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The domain catalog and the [`ConfigEntity`] tree that
//!   every export file is parsed into.
//! - **[`parsers`]**: Export folder loading, file classification, and the
//!   XML parsers for both domains.
//! - **[`matching`]**: Identity-based pairing of pilot and baseline
//!   entities into a match tree.
//! - **[`diff`]**: The [`Differ`], which classifies every matched pair and
//!   produces a [`DiffReport`].
//! - **[`reports`]**: HTML, JSON, and plain-text renderers for diff
//!   reports.
//! - **[`pipeline`]**: End-to-end orchestration of a comparison run,
//!   including exit-code mapping for CI.
//!
//! ## Getting Started
//!
//! ```no_run
//! use idm_config_diff::pipeline::{compare_folders, DomainSelection};
//! use std::path::Path;
//!
//! let report = compare_folders(
//!     Path::new("exports/pilot"),
//!     Path::new("exports/production"),
//!     DomainSelection::Full,
//! );
//! println!("{} changes", report.summary.total_changes());
//! ```

#![warn(clippy::pedantic)]
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod diff;
pub mod matching;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

pub use diff::{DiffReport, Differ};
pub use matching::EntityMatcher;
pub use model::{ConfigEntity, ConfigurationSnapshot, Domain, EntityKind};
pub use parsers::{load_domain, load_snapshot};
pub use reports::{create_reporter, ReportConfig, ReportFormat};
