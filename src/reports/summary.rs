//! Plain-text summary report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{ChangeKind, DiffRecord, DiffReport};
use std::fmt::Write;

/// Compact text summary for terminals and CI logs
pub struct SummaryReporter;

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError> {
        let mut out = String::new();

        writeln!(out, "{}", config.title_or_default())?;
        writeln!(out, "Pilot:    {}", report.pilot_source)?;
        writeln!(out, "Baseline: {}", report.baseline_source)?;
        writeln!(out)?;

        let s = &report.summary;
        writeln!(
            out,
            "Added: {}  Deleted: {}  Modified: {}  Unchanged: {}  Unable to compare: {}",
            s.added, s.deleted, s.modified, s.unchanged, s.unable_to_compare
        )?;

        for failure in &report.failures {
            writeln!(out, "FAILED {}: {}", failure.domain.name(), failure.message)?;
        }

        for domain_diff in &report.domains {
            writeln!(out)?;
            writeln!(out, "{}:", domain_diff.domain.name())?;
            match (domain_diff.present_in_pilot, domain_diff.present_in_baseline) {
                (false, false) => {
                    writeln!(out, "  (not present in either export)")?;
                    continue;
                }
                (false, true) => writeln!(out, "  (not present in the pilot export)")?,
                (true, false) => writeln!(out, "  (not present in the baseline export)")?,
                (true, true) => {}
            }

            let mut lines = 0usize;
            for record in &domain_diff.records {
                write_record_lines(&mut out, record, 1, &mut lines)?;
            }
            if lines == 0 {
                writeln!(out, "  (no differences)")?;
            }

            for warning in &domain_diff.warnings {
                writeln!(out, "  warning: {warning}")?;
            }
        }

        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

fn write_record_lines(
    out: &mut String,
    record: &DiffRecord,
    depth: usize,
    lines: &mut usize,
) -> Result<(), ReportError> {
    // The text format only ever lists changes; unchanged rows would drown
    // the signal it exists for.
    if record.change.is_change() {
        let indent = "  ".repeat(depth);
        match record.change {
            ChangeKind::UnableToCompare => {
                let note = record.note.as_deref().unwrap_or("schema version mismatch");
                writeln!(
                    out,
                    "{indent}{} {} `{}` ({note})",
                    record.change.label(),
                    record.kind.tag(),
                    record.id
                )?;
            }
            _ => {
                writeln!(
                    out,
                    "{indent}{} {} `{}`",
                    record.change.label(),
                    record.kind.tag(),
                    record.id
                )?;
            }
        }
        for change in &record.attributes {
            writeln!(out, "{indent}  {}", change.name)?;
        }
        *lines += 1;
    }
    for child in &record.children {
        write_record_lines(out, child, depth + 1, lines)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffRecord, DomainDiff, DomainFailure};
    use crate::model::{Domain, EntityKind};

    fn record(kind: EntityKind, id: &str, change: ChangeKind) -> DiffRecord {
        DiffRecord {
            kind,
            id: id.to_string(),
            change,
            attributes: Vec::new(),
            children: Vec::new(),
            note: None,
        }
    }

    #[test]
    fn lists_changes_and_counts() {
        let mut report = DiffReport::new("exports/pilot", "exports/prod");
        report.domains.push(DomainDiff {
            domain: Domain::SyncEngine,
            present_in_pilot: true,
            present_in_baseline: true,
            records: vec![
                record(EntityKind::ManagementAgent, "AD MA", ChangeKind::Unchanged),
                record(EntityKind::SyncRule, "Inbound Users", ChangeKind::Modified),
            ],
            warnings: Vec::new(),
        });
        report.calculate_summary();

        let text = SummaryReporter::new()
            .generate(&report, &ReportConfig::default())
            .expect("render");
        assert!(text.contains("Added: 0  Deleted: 0  Modified: 1  Unchanged: 1"));
        assert!(text.contains("Modified sync-rule `Inbound Users`"));
        assert!(!text.contains("AD MA"));
    }

    #[test]
    fn reports_no_differences_for_identical_domains() {
        let mut report = DiffReport::new("a", "b");
        report.domains.push(DomainDiff {
            domain: Domain::ServiceTier,
            present_in_pilot: true,
            present_in_baseline: true,
            records: vec![record(EntityKind::Set, "All People", ChangeKind::Unchanged)],
            warnings: Vec::new(),
        });
        report.calculate_summary();

        let text = SummaryReporter::new()
            .generate(&report, &ReportConfig::default())
            .expect("render");
        assert!(text.contains("(no differences)"));
    }

    #[test]
    fn failures_appear_with_domain_name() {
        let mut report = DiffReport::new("a", "b");
        report.failures.push(DomainFailure {
            domain: Domain::SyncEngine,
            message: "sync-rules.xml: XML parse error".to_string(),
        });
        let text = SummaryReporter::new()
            .generate(&report, &ReportConfig::default())
            .expect("render");
        assert!(text.contains("FAILED Synchronization Engine: sync-rules.xml"));
    }
}
