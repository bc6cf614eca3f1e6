//! HTML report generator.
//!
//! Emits the document consumed by the external changes-only view script:
//! every unchanged row carries the `hideable` class and the header holds
//! exactly one toggle checkbox with the well-known id. The renderer itself
//! ships no script; the control stays inert until the external script
//! binds to it.

use super::escape::{anchor_slug, escape_html};
use super::{
    ReportConfig, ReportError, ReportFormat, ReportGenerator, HIDEABLE_CLASS, TOGGLE_CONTROL_ID,
};
use crate::diff::{ChangeKind, DiffRecord, DiffReport, DomainDiff};
use crate::model::{AttrValue, Domain, EntityKind};
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    fn get_styles(&self) -> &'static str {
        r#"
        <style>
            :root {
                --bg-color: #1e1e2e;
                --text-color: #cdd6f4;
                --accent-color: #89b4fa;
                --added-color: #a6e3a1;
                --deleted-color: #f38ba8;
                --modified-color: #f9e2af;
                --degraded-color: #fab387;
                --muted-color: #a6adc8;
                --border-color: #45475a;
                --card-bg: #313244;
            }

            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                background-color: var(--bg-color);
                color: var(--text-color);
                margin: 0;
                padding: 20px;
                line-height: 1.6;
            }

            .container {
                max-width: 1200px;
                margin: 0 auto;
            }

            h1, h2, h3 {
                color: var(--accent-color);
            }

            .header {
                border-bottom: 2px solid var(--border-color);
                padding-bottom: 20px;
                margin-bottom: 30px;
            }

            .sources {
                color: var(--muted-color);
                font-size: 0.9em;
            }

            .controls {
                margin: 20px 0;
            }

            .summary-cards {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
                gap: 20px;
                margin-bottom: 30px;
            }

            .card {
                background-color: var(--card-bg);
                border-radius: 8px;
                padding: 20px;
                border: 1px solid var(--border-color);
            }

            .card-title {
                font-size: 0.9em;
                color: var(--muted-color);
                margin-bottom: 10px;
            }

            .card-value {
                font-size: 2em;
                font-weight: bold;
            }

            .card-value.added { color: var(--added-color); }
            .card-value.deleted { color: var(--deleted-color); }
            .card-value.modified { color: var(--modified-color); }
            .card-value.degraded { color: var(--degraded-color); }

            table {
                width: 100%;
                border-collapse: collapse;
                margin-bottom: 30px;
                background-color: var(--card-bg);
                border-radius: 8px;
                overflow: hidden;
            }

            th, td {
                padding: 10px 15px;
                text-align: left;
                border-bottom: 1px solid var(--border-color);
                vertical-align: top;
            }

            th {
                background-color: #45475a;
                font-weight: 600;
            }

            .badge {
                display: inline-block;
                padding: 2px 8px;
                border-radius: 4px;
                font-size: 0.85em;
                font-weight: 500;
                white-space: nowrap;
            }

            .badge-added { background-color: rgba(166, 227, 161, 0.2); color: var(--added-color); }
            .badge-deleted { background-color: rgba(243, 139, 168, 0.2); color: var(--deleted-color); }
            .badge-modified { background-color: rgba(249, 226, 175, 0.2); color: var(--modified-color); }
            .badge-unchanged { background-color: rgba(166, 173, 200, 0.15); color: var(--muted-color); }
            .badge-unable { background-color: rgba(250, 179, 135, 0.25); color: var(--degraded-color); }

            .entity-kind {
                color: var(--muted-color);
                font-size: 0.85em;
            }

            .attr-changes {
                margin: 0;
                padding-left: 18px;
            }

            .attr-changes code {
                color: var(--accent-color);
            }

            .failure, .warnings {
                background-color: rgba(243, 139, 168, 0.1);
                border: 1px solid var(--deleted-color);
                border-radius: 8px;
                padding: 12px 20px;
                margin-bottom: 20px;
            }

            .warnings {
                background-color: rgba(249, 226, 175, 0.1);
                border-color: var(--modified-color);
            }

            .domain-note {
                color: var(--muted-color);
                font-style: italic;
            }

            .toc {
                background-color: var(--card-bg);
                border: 1px solid var(--border-color);
                border-radius: 8px;
                padding: 12px 20px;
                margin-bottom: 30px;
            }

            .section {
                margin-bottom: 40px;
            }

            .footer {
                margin-top: 40px;
                padding-top: 20px;
                border-top: 1px solid var(--border-color);
                font-size: 0.9em;
                color: var(--muted-color);
            }
        </style>
        "#
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, report: &DiffReport, config: &ReportConfig) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = config.title_or_default();

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>{}</title>", escape_html(title))?;
        if self.include_styles {
            writeln!(html, "{}", self.get_styles())?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div class=\"container\">")?;

        // Header
        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "    <h1>{}</h1>", escape_html(title))?;
        writeln!(
            html,
            "    <p class=\"sources\">Pilot: {} &middot; Baseline: {}</p>",
            escape_html(&report.pilot_source),
            escape_html(&report.baseline_source)
        )?;
        if let Some(generated_at) = &config.generated_at {
            writeln!(
                html,
                "    <p class=\"sources\">Generated by idm-config-diff v{} on {}</p>",
                env!("CARGO_PKG_VERSION"),
                escape_html(generated_at)
            )?;
        }
        writeln!(html, "</div>")?;

        // Changes-only toggle: the single binding point for the external
        // view script.
        if !config.only_changes {
            writeln!(html, "<div class=\"controls\">")?;
            writeln!(
                html,
                "    <label><input type=\"checkbox\" id=\"{TOGGLE_CONTROL_ID}\"> Show changes only</label>"
            )?;
            writeln!(html, "</div>")?;
        }

        self.write_summary_cards(&mut html, report)?;

        for failure in &report.failures {
            writeln!(
                html,
                "<div class=\"failure\">{}: load failed &mdash; {}</div>",
                escape_html(failure.domain.name()),
                escape_html(&failure.message)
            )?;
        }

        self.write_toc(&mut html, report, config)?;

        for domain_diff in &report.domains {
            self.write_domain(&mut html, domain_diff, config)?;
        }

        writeln!(html, "<div class=\"footer\">")?;
        writeln!(html, "    <p>Generated by idm-config-diff</p>")?;
        writeln!(html, "</div>")?;

        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}

impl HtmlReporter {
    fn write_summary_cards(
        &self,
        html: &mut String,
        report: &DiffReport,
    ) -> Result<(), ReportError> {
        let summary = &report.summary;
        let cards = [
            ("Added", summary.added, "added"),
            ("Deleted", summary.deleted, "deleted"),
            ("Modified", summary.modified, "modified"),
            ("Unchanged", summary.unchanged, ""),
            ("Unable to Compare", summary.unable_to_compare, "degraded"),
        ];

        writeln!(html, "<div class=\"summary-cards\">")?;
        for (label, value, class) in cards {
            writeln!(html, "    <div class=\"card\">")?;
            writeln!(html, "        <div class=\"card-title\">{label}</div>")?;
            if class.is_empty() {
                writeln!(html, "        <div class=\"card-value\">{value}</div>")?;
            } else {
                writeln!(
                    html,
                    "        <div class=\"card-value {class}\">{value}</div>"
                )?;
            }
            writeln!(html, "    </div>")?;
        }
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_toc(
        &self,
        html: &mut String,
        report: &DiffReport,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        writeln!(html, "<nav class=\"toc\">")?;
        writeln!(html, "    <h2>Contents</h2>")?;
        writeln!(html, "    <ul>")?;
        for domain_diff in &report.domains {
            let domain = domain_diff.domain;
            writeln!(
                html,
                "        <li><a href=\"#{}\">{}</a>",
                domain.anchor(),
                escape_html(domain.name())
            )?;
            let groups = group_by_kind(domain, &domain_diff.records, config);
            if !groups.is_empty() {
                writeln!(html, "            <ul>")?;
                for (kind, _) in &groups {
                    writeln!(
                        html,
                        "                <li><a href=\"#{}-{}\">{}</a></li>",
                        domain.anchor(),
                        kind.tag(),
                        escape_html(kind.display_name())
                    )?;
                }
                writeln!(html, "            </ul>")?;
            }
            writeln!(html, "        </li>")?;
        }
        writeln!(html, "    </ul>")?;
        writeln!(html, "</nav>")?;
        Ok(())
    }

    fn write_domain(
        &self,
        html: &mut String,
        domain_diff: &DomainDiff,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        let domain = domain_diff.domain;
        writeln!(html, "<div class=\"section\">")?;
        writeln!(
            html,
            "    <h2 id=\"{}\">{}</h2>",
            domain.anchor(),
            escape_html(domain.name())
        )?;

        match (domain_diff.present_in_pilot, domain_diff.present_in_baseline) {
            (false, false) => {
                writeln!(
                    html,
                    "    <p class=\"domain-note\">Not present in either export.</p>"
                )?;
            }
            (false, true) => {
                writeln!(
                    html,
                    "    <p class=\"domain-note\">Not present in the pilot export.</p>"
                )?;
            }
            (true, false) => {
                writeln!(
                    html,
                    "    <p class=\"domain-note\">Not present in the baseline export.</p>"
                )?;
            }
            (true, true) => {}
        }

        if !domain_diff.warnings.is_empty() {
            writeln!(html, "    <div class=\"warnings\">")?;
            writeln!(html, "        <ul>")?;
            for warning in &domain_diff.warnings {
                writeln!(
                    html,
                    "            <li>{}</li>",
                    escape_html(&warning.to_string())
                )?;
            }
            writeln!(html, "        </ul>")?;
            writeln!(html, "    </div>")?;
        }

        for (kind, records) in group_by_kind(domain, &domain_diff.records, config) {
            writeln!(
                html,
                "    <h3 id=\"{}-{}\">{}</h3>",
                domain.anchor(),
                kind.tag(),
                escape_html(kind.display_name())
            )?;
            writeln!(html, "    <table>")?;
            writeln!(html, "        <thead>")?;
            writeln!(html, "            <tr>")?;
            writeln!(html, "                <th>Status</th>")?;
            writeln!(html, "                <th>Entity</th>")?;
            writeln!(html, "                <th>Details</th>")?;
            writeln!(html, "            </tr>")?;
            writeln!(html, "        </thead>")?;
            writeln!(html, "        <tbody>")?;
            for record in records {
                self.write_record_rows(html, record, domain.anchor(), 0, config)?;
            }
            writeln!(html, "        </tbody>")?;
            writeln!(html, "    </table>")?;
        }

        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_record_rows(
        &self,
        html: &mut String,
        record: &DiffRecord,
        parent_anchor: &str,
        depth: usize,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        if config.only_changes && !record.change.is_change() {
            // An unchanged subtree is unchanged all the way down.
            return Ok(());
        }

        let anchor = row_anchor(parent_anchor, record);
        let (badge, row_class) = badge_classes(record.change);
        if row_class.is_empty() {
            writeln!(html, "            <tr id=\"{anchor}\">")?;
        } else {
            writeln!(html, "            <tr id=\"{anchor}\" class=\"{row_class}\">")?;
        }
        writeln!(
            html,
            "                <td><span class=\"badge {badge}\">{}</span></td>",
            record.change.label()
        )?;
        writeln!(
            html,
            "                <td style=\"padding-left: {}px\"><span class=\"entity-kind\">{}</span> {}</td>",
            15 + depth * 24,
            record.kind.tag(),
            escape_html(&record.id)
        )?;
        writeln!(
            html,
            "                <td>{}</td>",
            record_details(record)
        )?;
        writeln!(html, "            </tr>")?;

        for child in &record.children {
            self.write_record_rows(html, child, &anchor, depth + 1, config)?;
        }
        Ok(())
    }
}

/// Group top-level records by entity kind in catalog priority order,
/// dropping kinds with no visible records.
fn group_by_kind<'a>(
    domain: Domain,
    records: &'a [DiffRecord],
    config: &ReportConfig,
) -> Vec<(EntityKind, Vec<&'a DiffRecord>)> {
    domain
        .entity_kinds()
        .iter()
        .filter_map(|kind| {
            let group: Vec<&DiffRecord> = records
                .iter()
                .filter(|r| r.kind == *kind)
                .filter(|r| !config.only_changes || r.change.is_change())
                .collect();
            if group.is_empty() {
                None
            } else {
                Some((*kind, group))
            }
        })
        .collect()
}

fn badge_classes(change: ChangeKind) -> (&'static str, &'static str) {
    match change {
        ChangeKind::Added => ("badge-added", ""),
        ChangeKind::Deleted => ("badge-deleted", ""),
        ChangeKind::Modified => ("badge-modified", ""),
        ChangeKind::Unchanged => ("badge-unchanged", HIDEABLE_CLASS),
        ChangeKind::UnableToCompare => ("badge-unable", ""),
    }
}

fn row_anchor(parent_anchor: &str, record: &DiffRecord) -> String {
    // Anchors chain through the parent scope, matching the uniqueness of
    // (kind, id) within a sibling set. Same-named children under different
    // parents get distinct anchors.
    format!(
        "{parent_anchor}-{}-{}",
        record.kind.tag(),
        anchor_slug(&record.id)
    )
}

fn record_details(record: &DiffRecord) -> String {
    match record.change {
        ChangeKind::UnableToCompare => {
            let note = record.note.as_deref().unwrap_or("schema version mismatch");
            format!(
                "<span class=\"badge badge-unable\">&#9888;</span> {}",
                escape_html(note)
            )
        }
        ChangeKind::Modified if !record.attributes.is_empty() => {
            let mut details = String::from("<ul class=\"attr-changes\">");
            for change in &record.attributes {
                details.push_str(&format!(
                    "<li><code>{}</code>: {} &rarr; {}</li>",
                    escape_html(&change.name),
                    format_value(change.old.as_ref()),
                    format_value(change.new.as_ref())
                ));
            }
            details.push_str("</ul>");
            details
        }
        _ => "&ndash;".to_string(),
    }
}

fn format_value(value: Option<&AttrValue>) -> String {
    match value {
        Some(AttrValue::Single(v)) => escape_html(v),
        Some(AttrValue::Multi(vs)) => {
            if vs.is_empty() {
                "(empty)".to_string()
            } else {
                let escaped: Vec<String> = vs.iter().map(|v| escape_html(v)).collect();
                format!("[{}]", escaped.join(", "))
            }
        }
        None => "(absent)".to_string(),
    }
}
