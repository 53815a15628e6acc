// # Memory Reporter
//
// In-memory implementation of Reporter.
//
// ## Purpose
//
// Collects findings for one lint pass so the caller can filter, count and
// render them afterwards. Findings keep the order in which rules reported
// them.

use std::collections::BTreeMap;

use crate::finding::{Finding, Severity};
use crate::traits::Reporter;

/// In-memory reporter implementation
///
/// # Example
///
/// ```rust,no_run
/// use resolvelint_core::{ConfigTree, LintEngine, MemoryReporter};
///
/// let tree = ConfigTree::new();
/// let engine = LintEngine::new(Vec::new());
///
/// let mut reporter = MemoryReporter::new();
/// engine.lint(&tree, &mut reporter);
/// assert!(reporter.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    findings: Vec<Finding>,
}

impl MemoryReporter {
    /// Create a new empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Findings in report order
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consume the reporter, returning its findings
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Number of findings
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether no finding was reported
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings at or above `min_severity`
    pub fn at_least(&self, min_severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |finding| finding.severity >= min_severity)
    }

    /// Number of findings per severity
    pub fn count_by_severity(&self) -> BTreeMap<Severity, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.severity).or_insert(0) += 1;
        }
        counts
    }
}

impl Reporter for MemoryReporter {
    fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}
