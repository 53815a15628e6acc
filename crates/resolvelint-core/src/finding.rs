//! Findings produced by rules
//!
//! A [`Finding`] is the unit handed to a [`Reporter`](crate::traits::Reporter).
//! It snapshots the directives it refers to so it can outlive the tree.

use crate::tree::{Directive, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Likely misconfiguration
    Medium,
    /// Misconfiguration that breaks traffic in practice
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => f.write_str("MEDIUM"),
            Severity::High => f.write_str("HIGH"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(crate::Error::config(format!(
                "Unknown severity '{}'. Valid severities: medium, high",
                other
            ))),
        }
    }
}

/// Snapshot of a directive referenced by a finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveRef {
    /// Node in the originating tree
    pub node: NodeId,
    /// Source line, when known
    pub line: Option<usize>,
    /// Rendered directive (`proxy_pass http://backend;`)
    pub text: String,
}

impl From<Directive<'_>> for DirectiveRef {
    fn from(directive: Directive<'_>) -> Self {
        Self {
            node: directive.id(),
            line: directive.line(),
            text: directive.to_string(),
        }
    }
}

/// A single problem reported by a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Name of the rule that produced the finding
    pub rule: String,
    /// Severity
    pub severity: Severity,
    /// One-line rule summary
    pub summary: String,
    /// Explanation and remediation for this occurrence
    pub message: String,
    /// Directive the finding is about
    pub primary: DirectiveRef,
    /// Further directives supporting the finding
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<DirectiveRef>,
}

impl Finding {
    /// Create a finding about `primary`
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        summary: impl Into<String>,
        message: impl Into<String>,
        primary: Directive<'_>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            summary: summary.into(),
            message: message.into(),
            primary: primary.into(),
            evidence: Vec::new(),
        }
    }

    /// Attach supporting directives
    pub fn with_evidence<'a>(mut self, evidence: impl IntoIterator<Item = Directive<'a>>) -> Self {
        self.evidence.extend(evidence.into_iter().map(DirectiveRef::from));
        self
    }
}
