//! The comparison run itself: load, match, diff, render, emit.

use super::{exit_codes, write_output, OutputTarget, PipelineError};
use crate::diff::{Differ, DiffReport, DomainDiff, DomainFailure};
use crate::matching::{EntityMatcher, Side};
use crate::model::{ConfigEntity, Domain};
use crate::parsers::load_domain;
use crate::reports::{create_reporter, ReportConfig, ReportFormat};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Which domains a run compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DomainSelection {
    /// Compare every domain found in the exports
    #[default]
    Full,
    /// Synchronization engine configuration only
    SyncOnly,
    /// Service tier configuration only
    ServiceOnly,
}

impl DomainSelection {
    /// Domains covered by this selection, in comparison order.
    #[must_use]
    pub fn domains(&self) -> &'static [Domain] {
        match self {
            Self::Full => &Domain::ALL,
            Self::SyncOnly => &[Domain::SyncEngine],
            Self::ServiceOnly => &[Domain::ServiceTier],
        }
    }
}

/// Everything one comparison run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Pilot (candidate) export folder
    pub pilot: PathBuf,
    /// Baseline (reference) export folder
    pub baseline: PathBuf,
    pub selection: DomainSelection,
    pub format: ReportFormat,
    pub report: ReportConfig,
    pub target: OutputTarget,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub report: DiffReport,
    /// Process exit code per the CI contract.
    pub exit_code: i32,
}

/// Execute one full comparison run and emit the rendered report.
///
/// Domain load failures do not abort the run: the failing domain is
/// recorded in the report and the remaining domains are still compared.
/// They do force the error exit code.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutcome, PipelineError> {
    let report = compare_folders(&config.pilot, &config.baseline, config.selection);

    let reporter = create_reporter(config.format);
    let rendered = reporter
        .generate(&report, &config.report)
        .map_err(|source| PipelineError::ReportFailed { source })?;
    write_output(&rendered, &config.target)
        .map_err(|source| PipelineError::OutputFailed { source })?;

    let exit_code = exit_code_for(&report);
    tracing::debug!(exit_code, "comparison run complete");
    Ok(PipelineOutcome { report, exit_code })
}

/// Load both export folders and diff every selected domain.
pub fn compare_folders(pilot: &Path, baseline: &Path, selection: DomainSelection) -> DiffReport {
    let mut report = DiffReport::new(
        pilot.display().to_string(),
        baseline.display().to_string(),
    );

    for &domain in selection.domains() {
        match (load_domain(pilot, domain), load_domain(baseline, domain)) {
            (Ok(pilot_entities), Ok(baseline_entities)) => {
                report
                    .domains
                    .push(diff_domain(domain, pilot_entities, baseline_entities));
            }
            (pilot_result, baseline_result) => {
                for (side, result) in [
                    (Side::Pilot, pilot_result),
                    (Side::Baseline, baseline_result),
                ] {
                    if let Err(e) = result {
                        tracing::error!(domain = %domain, %side, error = %e, "domain load failed");
                        report.failures.push(DomainFailure {
                            domain,
                            message: format!("{side} snapshot: {e}"),
                        });
                    }
                }
            }
        }
    }

    report.calculate_summary();
    report
}

fn diff_domain(
    domain: Domain,
    pilot_entities: Option<Vec<ConfigEntity>>,
    baseline_entities: Option<Vec<ConfigEntity>>,
) -> DomainDiff {
    let present_in_pilot = pilot_entities.is_some();
    let present_in_baseline = baseline_entities.is_some();
    let pilot_entities = pilot_entities.unwrap_or_default();
    let baseline_entities = baseline_entities.unwrap_or_default();

    let matcher = EntityMatcher::new(domain);
    let outcome = matcher.match_entities(&pilot_entities, &baseline_entities);
    let records = Differ::new().diff_nodes(&outcome.nodes);

    DomainDiff {
        domain,
        present_in_pilot,
        present_in_baseline,
        records,
        warnings: outcome.warnings,
    }
}

fn exit_code_for(report: &DiffReport) -> i32 {
    if !report.failures.is_empty() {
        exit_codes::ERROR
    } else if report.summary.is_degraded() {
        exit_codes::DEGRADED
    } else if report.has_changes() {
        exit_codes::CHANGES_DETECTED
    } else {
        exit_codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeKind;

    fn write_export(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("write export file");
    }

    fn folder_with(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, content) in files {
            write_export(dir.path(), name, content);
        }
        dir
    }

    const SYNC_ONE_MA: &str = r#"<sync-config schema-version="1">
        <entity type="management-agent" id="AD MA">
            <attribute name="server"><value>dc01</value></attribute>
        </entity>
    </sync-config>"#;

    #[test]
    fn identical_folders_exit_success() {
        let pilot = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);
        let baseline = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);

        let report = compare_folders(pilot.path(), baseline.path(), DomainSelection::Full);
        assert!(!report.has_changes());
        assert_eq!(exit_code_for(&report), exit_codes::SUCCESS);
    }

    #[test]
    fn detected_changes_exit_one() {
        let pilot = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);
        let baseline = folder_with(&[(
            "sync-ma.xml",
            r#"<sync-config schema-version="1">
                <entity type="management-agent" id="AD MA">
                    <attribute name="server"><value>dc02</value></attribute>
                </entity>
            </sync-config>"#,
        )]);

        let report = compare_folders(pilot.path(), baseline.path(), DomainSelection::Full);
        assert_eq!(report.summary.modified, 1);
        assert_eq!(exit_code_for(&report), exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn schema_mismatch_exits_degraded() {
        let pilot = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);
        let baseline = folder_with(&[(
            "sync-ma.xml",
            SYNC_ONE_MA.replace("schema-version=\"1\"", "schema-version=\"2\"").as_str(),
        )]);

        let report = compare_folders(pilot.path(), baseline.path(), DomainSelection::Full);
        assert!(report.summary.is_degraded());
        assert_eq!(exit_code_for(&report), exit_codes::DEGRADED);
    }

    #[test]
    fn one_domains_failure_does_not_stop_the_other() {
        let pilot = folder_with(&[
            ("sync-ma.xml", SYNC_ONE_MA),
            ("service-broken.xml", "<service-config"),
        ]);
        let baseline = folder_with(&[
            ("sync-ma.xml", SYNC_ONE_MA),
            (
                "service-sets.xml",
                r#"<service-config schema-version="1">
                    <entity type="set" id="All People"/>
                </service-config>"#,
            ),
        ]);

        let report = compare_folders(pilot.path(), baseline.path(), DomainSelection::Full);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].domain, Domain::ServiceTier);
        assert!(report.failures[0].message.contains("pilot snapshot"));
        // The sync engine still compared cleanly.
        assert_eq!(report.domains.len(), 1);
        assert_eq!(report.domains[0].domain, Domain::SyncEngine);
        assert_eq!(exit_code_for(&report), exit_codes::ERROR);
    }

    #[test]
    fn domain_absent_on_one_side_reports_additions() {
        let pilot = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);
        let baseline = folder_with(&[(
            "service-sets.xml",
            r#"<service-config schema-version="1">
                <entity type="set" id="All People"/>
            </service-config>"#,
        )]);

        let report = compare_folders(pilot.path(), baseline.path(), DomainSelection::Full);
        let sync = &report.domains[0];
        assert!(sync.present_in_pilot && !sync.present_in_baseline);
        assert_eq!(sync.records[0].change, ChangeKind::Added);
        let service = &report.domains[1];
        assert!(!service.present_in_pilot && service.present_in_baseline);
        assert_eq!(service.records[0].change, ChangeKind::Deleted);
    }

    #[test]
    fn selection_limits_the_compared_domains() {
        let pilot = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);
        let baseline = folder_with(&[("service-broken.xml", "<service-config")]);

        let report = compare_folders(pilot.path(), baseline.path(), DomainSelection::SyncOnly);
        assert!(report.failures.is_empty());
        assert_eq!(report.domains.len(), 1);
        assert_eq!(report.domains[0].domain, Domain::SyncEngine);
    }

    #[test]
    fn run_pipeline_writes_the_report_file() {
        let pilot = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);
        let baseline = folder_with(&[("sync-ma.xml", SYNC_ONE_MA)]);
        let out_dir = tempfile::tempdir().expect("tempdir");
        let out_path = out_dir.path().join("report.html");

        let outcome = run_pipeline(&PipelineConfig {
            pilot: pilot.path().to_path_buf(),
            baseline: baseline.path().to_path_buf(),
            selection: DomainSelection::Full,
            format: ReportFormat::Html,
            report: ReportConfig::default(),
            target: OutputTarget::File(out_path.clone()),
        })
        .expect("pipeline");

        assert_eq!(outcome.exit_code, exit_codes::SUCCESS);
        let html = std::fs::read_to_string(out_path).expect("read report");
        assert!(html.contains("<!DOCTYPE html>"));
    }
}
