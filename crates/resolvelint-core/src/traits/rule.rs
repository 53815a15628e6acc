// # Rule Trait
//
// Defines the interface every lint rule implements.
//
// ## Implementations
//
// - Missing resolver: `resolvelint-rule-resolver` crate
//
// ## Usage
//
// ```rust,ignore
// use resolvelint_core::{LintEngine, MemoryReporter};
//
// let rule = /* Rule implementation */;
// let engine = LintEngine::new(vec![rule]);
//
// let mut reporter = MemoryReporter::new();
// engine.lint(&tree, &mut reporter);
// ```

use crate::config::RuleConfig;
use crate::traits::Reporter;
use crate::tree::Directive;

/// Trait for lint rule implementations
///
/// The engine calls [`Rule::audit`] once for every directive whose name is
/// listed by [`Rule::directives`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one engine may lint several files
/// concurrently.
///
/// # Contract
///
/// ## Allowed
/// - Read the audited directive and any part of its tree
/// - Report zero or more findings
/// - Return an error for an unexpected failure (the engine logs it and moves on)
///
/// ## Forbidden
/// - Perform I/O of any kind (no DNS lookups, no files)
/// - Keep mutable state between audits
/// - Panic on malformed input: a directive the rule cannot judge is skipped
///   by returning `Ok(())` without reporting
pub trait Rule: Send + Sync {
    /// Rule name used in configuration and reports (e.g., "missing_resolver")
    fn name(&self) -> &'static str;

    /// One-line summary of the problem the rule detects
    fn summary(&self) -> &'static str;

    /// Longer description with background and remediation
    fn description(&self) -> &'static str;

    /// Documentation link
    fn help_url(&self) -> &'static str;

    /// Directive names this rule wants to audit
    fn directives(&self) -> &[String];

    /// Audit a single directive occurrence
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Audit finished (with or without findings)
    /// - `Err(Error)`: Audit failed; the engine counts the failure and continues
    fn audit(&self, directive: Directive<'_>, reporter: &mut dyn Reporter) -> crate::Result<()>;
}

/// Helper trait for constructing rules from configuration
pub trait RuleFactory: Send + Sync {
    /// Create a Rule instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this rule
    ///
    /// # Returns
    ///
    /// A boxed Rule trait object
    fn create(&self, config: &RuleConfig) -> crate::Result<Box<dyn Rule>>;
}
