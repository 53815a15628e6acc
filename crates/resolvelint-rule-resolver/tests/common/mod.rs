//! Shared helpers for missing resolver contract tests

#![allow(dead_code)]

use resolvelint_core::{Finding, LintEngine, MemoryReporter, Severity};
use resolvelint_rule_resolver::MissingResolverRule;

/// Parse `conf` and lint it with the missing resolver rule
pub fn lint(conf: &str) -> Vec<Finding> {
    let tree = resolvelint_conf::parse_str(conf).expect("test configuration parses");
    let engine = LintEngine::new(vec![Box::new(MissingResolverRule::new())]);
    let mut reporter = MemoryReporter::new();
    engine.lint(&tree, &mut reporter);
    reporter.into_findings()
}

/// Lint a single `proxy_pass` inside `http { server { location / { ... } } }`
pub fn lint_proxy_pass(target: &str) -> Vec<Finding> {
    lint(&format!(
        "http {{ server {{ location / {{ proxy_pass {}; }} }} }}",
        target
    ))
}

/// Severities of `findings`, in report order
pub fn severities(findings: &[Finding]) -> Vec<Severity> {
    findings.iter().map(|f| f.severity).collect()
}
