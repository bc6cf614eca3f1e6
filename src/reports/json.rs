//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffRecord, DiffReport, DomainDiff};

/// JSON report generator
pub struct JsonReporter {
    /// Pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact (single-line) JSON reporter
    #[must_use]
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError> {
        let payload;
        let source: &DiffReport = if config.only_changes {
            payload = changes_only_view(report);
            &payload
        } else {
            report
        };

        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(source)
        } else {
            serde_json::to_string(source)
        }
        .map_err(|e| ReportError::Serialization(e.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

/// Clone of the report with unchanged subtrees removed. The summary is
/// left intact so consumers still see the full counts.
fn changes_only_view(report: &DiffReport) -> DiffReport {
    DiffReport {
        pilot_source: report.pilot_source.clone(),
        baseline_source: report.baseline_source.clone(),
        domains: report
            .domains
            .iter()
            .map(|d| DomainDiff {
                domain: d.domain,
                present_in_pilot: d.present_in_pilot,
                present_in_baseline: d.present_in_baseline,
                records: filter_changed(&d.records),
                warnings: d.warnings.clone(),
            })
            .collect(),
        failures: report.failures.clone(),
        summary: report.summary,
    }
}

fn filter_changed(records: &[DiffRecord]) -> Vec<DiffRecord> {
    records
        .iter()
        .filter(|r| r.change.is_change())
        .map(|r| DiffRecord {
            kind: r.kind,
            id: r.id.clone(),
            change: r.change,
            attributes: r.attributes.clone(),
            children: filter_changed(&r.children),
            note: r.note.clone(),
        })
        .collect()
}
