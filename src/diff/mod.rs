//! Structural diff between two configuration snapshots.
//!
//! The [`Differ`] consumes the match tree produced by
//! [`crate::matching::EntityMatcher`] and classifies every pair as Added,
//! Deleted, Modified, Unchanged, or Unable to Compare. Results are plain
//! data ([`DiffRecord`] trees inside a [`DiffReport`]) that renderers
//! consume without further computation.

mod engine;
mod result;

pub use engine::Differ;
pub use result::{
    AttributeChange, ChangeKind, DiffRecord, DiffReport, DiffSummary, DomainDiff, DomainFailure,
};
