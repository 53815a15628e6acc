// # Renderers
//
// Text and JSON output for findings of one or more linted files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::finding::{DirectiveRef, Finding, Severity};

/// Findings of one linted file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path of the linted file
    pub path: String,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Findings at or above the configured severity
    pub findings: Vec<Finding>,
}

impl FileReport {
    /// Build a report keeping findings at or above `min_severity`
    pub fn new(
        path: impl Into<String>,
        findings: impl IntoIterator<Item = Finding>,
        min_severity: Severity,
    ) -> Self {
        Self {
            path: path.into(),
            generated_at: Utc::now(),
            findings: findings
                .into_iter()
                .filter(|finding| finding.severity >= min_severity)
                .collect(),
        }
    }

    /// Highest severity among the findings
    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|finding| finding.severity).max()
    }
}

/// Render a report as human readable text
pub fn render_text(report: &FileReport) -> String {
    let mut out = String::new();

    if report.findings.is_empty() {
        let _ = writeln!(out, "{}: no issues found", report.path);
        return out;
    }

    for finding in &report.findings {
        let _ = writeln!(
            out,
            "{}: [{}] {}: {}",
            location(&report.path, &finding.primary),
            finding.severity,
            finding.rule,
            finding.summary
        );
        let _ = writeln!(out, "    {}", finding.primary.text);
        let _ = writeln!(out, "    reason: {}", finding.message);
        for evidence in &finding.evidence {
            let _ = writeln!(
                out,
                "    evidence: {}: {}",
                location(&report.path, evidence),
                evidence.text
            );
        }
    }

    out
}

/// Render reports as a pretty-printed JSON array
pub fn render_json(reports: &[FileReport]) -> Result<String, crate::Error> {
    Ok(serde_json::to_string_pretty(reports)?)
}

fn location(path: &str, directive: &DirectiveRef) -> String {
    match directive.line {
        Some(line) => format!("{}:{}", path, line),
        None => path.to_string(),
    }
}
