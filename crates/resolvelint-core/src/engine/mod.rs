//! Lint engine
//!
//! The LintEngine is responsible for:
//! - Walking a directive tree in document order
//! - Dispatching each directive to the rules that audit it
//! - Forwarding findings to the reporter
//! - Isolating failing audits from the rest of the scan
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ ConfigTree  │─── Directive ───┐
//! └─────────────┘                 │
//!                                 ▼
//!                        ┌──────────────┐
//!                        │  LintEngine  │
//!                        └──────────────┘
//!                                 │
//!              ┌──────────────────┴──────────────────┐
//!              │                                     │
//!              ▼                                     ▼
//!      ┌──────────────┐                     ┌──────────────┐
//!      │    Rule      │──── Finding ───────▶│   Reporter   │
//!      │   (audit)    │                     │   (record)   │
//!      └──────────────┘                     └──────────────┘
//! ```
//!
//! ## Fault Isolation
//!
//! An audit that returns an error is logged and counted in
//! [`LintSummary::audits_failed`]; the engine then continues with the next
//! rule and directive. One malformed directive never halts a scan.

use crate::config::LintConfig;
use crate::error::Result;
use crate::finding::Finding;
use crate::registry::RuleRegistry;
use crate::traits::{Reporter, Rule};
use crate::tree::ConfigTree;
use tracing::{debug, warn};

/// Counters describing one lint pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LintSummary {
    /// Directives visited
    pub directives_visited: usize,
    /// Rule audits performed
    pub audits_run: usize,
    /// Rule audits that returned an error
    pub audits_failed: usize,
    /// Findings forwarded to the reporter
    pub findings: usize,
}

/// Core lint engine
///
/// The engine holds the configured rules and no other state, so a single
/// instance can lint many trees, including concurrently from several threads.
pub struct LintEngine {
    /// Rules to run
    rules: Vec<Box<dyn Rule>>,
}

impl LintEngine {
    /// Create an engine running the given rules
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Create an engine from configuration using registered rule factories
    pub fn from_config(registry: &RuleRegistry, config: &LintConfig) -> Result<Self> {
        Ok(Self::new(registry.create_rules(config)?))
    }

    /// Names of the configured rules
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Lint a tree, forwarding findings to `reporter`
    pub fn lint(&self, tree: &ConfigTree, reporter: &mut dyn Reporter) -> LintSummary {
        let mut summary = LintSummary::default();
        let mut counting = CountingReporter {
            inner: reporter,
            count: 0,
        };

        for directive in tree.walk() {
            summary.directives_visited += 1;

            for rule in &self.rules {
                if !rule.directives().iter().any(|name| name == directive.name()) {
                    continue;
                }

                summary.audits_run += 1;
                if let Err(e) = rule.audit(directive, &mut counting) {
                    summary.audits_failed += 1;
                    warn!(
                        "Rule {} failed on '{}' (line {:?}), skipping directive: {}",
                        rule.name(),
                        directive,
                        directive.line(),
                        e
                    );
                }
            }
        }

        summary.findings = counting.count;
        debug!(
            "Lint pass finished: {} directive(s), {} audit(s), {} finding(s)",
            summary.directives_visited, summary.audits_run, summary.findings
        );

        summary
    }
}

/// Reporter adapter counting forwarded findings
struct CountingReporter<'r> {
    inner: &'r mut dyn Reporter,
    count: usize,
}

impl Reporter for CountingReporter<'_> {
    fn report(&mut self, finding: Finding) {
        self.count += 1;
        self.inner.report(finding);
    }
}
