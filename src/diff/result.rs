//! Diff result structures.

use crate::matching::MatchWarning;
use crate::model::{AttrValue, Domain, EntityKind};
use serde::{Deserialize, Serialize};

/// Classification of one entity or attribute comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    /// Present only in the pilot snapshot.
    Added,
    /// Present only in the baseline snapshot.
    Deleted,
    /// Present in both with differing attributes or descendants.
    Modified,
    /// Structurally equal on both sides.
    Unchanged,
    /// Comparison degraded: the two sides declare incompatible schema
    /// versions for this entity.
    UnableToCompare,
}

impl ChangeKind {
    /// Report label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Deleted => "Deleted",
            Self::Modified => "Modified",
            Self::Unchanged => "Unchanged",
            Self::UnableToCompare => "Unable to Compare",
        }
    }

    /// Whether this classification represents a difference a reviewer
    /// should look at. Only `Unchanged` rows are safe to hide.
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One changed attribute within a modified entity.
///
/// `old` is the baseline value, `new` the pilot value. An attribute present
/// on only one side carries `None` on the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub name: String,
    pub old: Option<AttrValue>,
    pub new: Option<AttrValue>,
}

/// Outcome of comparing one matched entity pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRecord {
    pub kind: EntityKind,
    pub id: String,
    pub change: ChangeKind,
    /// Changed attributes; empty for Added/Deleted/Unchanged and for
    /// UnableToCompare (there is nothing trustworthy to compare).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeChange>,
    /// Child records; empty for Added/Deleted (the subtree is subsumed).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiffRecord>,
    /// Human-readable detail for degraded comparisons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DiffRecord {
    fn tally(&self, summary: &mut DiffSummary) {
        match self.change {
            ChangeKind::Added => summary.added += 1,
            ChangeKind::Deleted => summary.deleted += 1,
            ChangeKind::Modified => summary.modified += 1,
            ChangeKind::Unchanged => summary.unchanged += 1,
            ChangeKind::UnableToCompare => summary.unable_to_compare += 1,
        }
        for child in &self.children {
            child.tally(summary);
        }
    }
}

/// Summary statistics over every record in the report, children included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub unable_to_compare: usize,
}

impl DiffSummary {
    /// Count of records a reviewer must look at.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added + self.deleted + self.modified
    }

    /// Whether anything differs between the snapshots.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.total_changes() > 0
    }

    /// Whether any comparison was degraded by a schema mismatch.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.unable_to_compare > 0
    }
}

/// Diff outcome for one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainDiff {
    pub domain: Domain,
    /// Whether the pilot export contained files for this domain.
    pub present_in_pilot: bool,
    /// Whether the baseline export contained files for this domain.
    pub present_in_baseline: bool,
    pub records: Vec<DiffRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<MatchWarning>,
}

/// A domain whose pipeline aborted before producing a diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainFailure {
    pub domain: Domain,
    pub message: String,
}

/// Complete result of one pilot/baseline comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct DiffReport {
    /// Pilot (candidate) export folder as given on the command line.
    pub pilot_source: String,
    /// Baseline (reference) export folder as given on the command line.
    pub baseline_source: String,
    pub domains: Vec<DomainDiff>,
    /// Domains whose load failed; the rest of the run still completed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DomainFailure>,
    pub summary: DiffSummary,
}

impl DiffReport {
    /// Create an empty report for the given source folders.
    pub fn new(pilot_source: impl Into<String>, baseline_source: impl Into<String>) -> Self {
        Self {
            pilot_source: pilot_source.into(),
            baseline_source: baseline_source.into(),
            domains: Vec::new(),
            failures: Vec::new(),
            summary: DiffSummary::default(),
        }
    }

    /// Recompute summary statistics from the current records.
    pub fn calculate_summary(&mut self) {
        let mut summary = DiffSummary::default();
        for domain in &self.domains {
            for record in &domain.records {
                record.tally(&mut summary);
            }
        }
        self.summary = summary;
    }

    /// Whether anything differs between the snapshots.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.summary.has_changes()
    }

    /// Total matcher warnings across all domains.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.domains.iter().map(|d| d.warnings.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(change: ChangeKind, children: Vec<DiffRecord>) -> DiffRecord {
        DiffRecord {
            kind: EntityKind::SyncRule,
            id: "SR1".to_string(),
            change,
            attributes: Vec::new(),
            children,
            note: None,
        }
    }

    #[test]
    fn summary_counts_nested_records() {
        let mut report = DiffReport::new("pilot", "baseline");
        report.domains.push(DomainDiff {
            domain: Domain::SyncEngine,
            present_in_pilot: true,
            present_in_baseline: true,
            records: vec![record(
                ChangeKind::Modified,
                vec![
                    record(ChangeKind::Unchanged, vec![]),
                    record(ChangeKind::Added, vec![]),
                ],
            )],
            warnings: Vec::new(),
        });
        report.calculate_summary();

        assert_eq!(report.summary.modified, 1);
        assert_eq!(report.summary.unchanged, 1);
        assert_eq!(report.summary.added, 1);
        assert_eq!(report.summary.total_changes(), 2);
        assert!(report.has_changes());
    }

    #[test]
    fn unable_to_compare_is_degraded_not_changed() {
        let mut report = DiffReport::new("pilot", "baseline");
        report.domains.push(DomainDiff {
            domain: Domain::ServiceTier,
            present_in_pilot: true,
            present_in_baseline: true,
            records: vec![record(ChangeKind::UnableToCompare, vec![])],
            warnings: Vec::new(),
        });
        report.calculate_summary();

        assert!(!report.has_changes());
        assert!(report.summary.is_degraded());
    }

    #[test]
    fn only_unchanged_is_hideable() {
        assert!(!ChangeKind::Unchanged.is_change());
        for kind in [
            ChangeKind::Added,
            ChangeKind::Deleted,
            ChangeKind::Modified,
            ChangeKind::UnableToCompare,
        ] {
            assert!(kind.is_change());
        }
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = DiffReport::new("pilot", "baseline");
        report.domains.push(DomainDiff {
            domain: Domain::SyncEngine,
            present_in_pilot: true,
            present_in_baseline: false,
            records: vec![record(ChangeKind::Added, vec![])],
            warnings: Vec::new(),
        });
        report.calculate_summary();

        let json = serde_json::to_string(&report).expect("serialize");
        let back: DiffReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.summary, report.summary);
        assert_eq!(back.domains.len(), 1);
    }
}
