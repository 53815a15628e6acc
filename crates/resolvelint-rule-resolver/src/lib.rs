// # Missing Resolver Rule
//
// Flags proxy-type directives whose backend hostname nginx resolves only
// once, at startup. When the backend's address changes (cloud load
// balancers, CDNs, failover) traffic keeps going to the old address until
// the next restart.
//
// ## What Is Reported
//
// - Static public hostnames (MEDIUM)
// - Cloud provider endpoints such as AWS ELB or Google Cloud Run (HIGH)
// - Upstream servers without the `resolve` parameter (HIGH for cloud
//   endpoints, MEDIUM otherwise)
// - Variable targets without a `resolver` directive in scope (MEDIUM)
//
// IP literals, unix sockets, internal names and targets built from request
// data are never reported.
//
// ## Usage
//
// ```rust,ignore
// use resolvelint_core::RuleRegistry;
//
// let registry = RuleRegistry::new();
// resolvelint_rule_resolver::register(&registry);
// ```

pub mod analyzer;
pub mod scope;
pub mod target;
pub mod taxonomy;
pub mod variables;

use resolvelint_core::config::RuleConfig;
use resolvelint_core::registry::RuleRegistry;
use resolvelint_core::traits::{Reporter, Rule, RuleFactory};
use resolvelint_core::{Directive, Error, Result};
use tracing::info;

pub use taxonomy::{HostClass, classify, classify_host};
pub use variables::ResolvedHost;

/// Rule name used in configuration and reports
pub const RULE_NAME: &str = "missing_resolver";

/// Directives audited when the configuration names none
pub const DEFAULT_DIRECTIVES: &[&str] = &[
    "proxy_pass",
    "fastcgi_pass",
    "uwsgi_pass",
    "scgi_pass",
    "grpc_pass",
];

const SUMMARY: &str = "Proxy target uses static DNS resolution (resolved only at startup).";

const DESCRIPTION: &str = "A proxy target with a static hostname is resolved once when nginx \
starts, so traffic may keep going to stale addresses. Cloud load balancers and CDNs change \
addresses frequently. Use a variable together with a 'resolver' directive, or an upstream \
whose servers carry the 'resolve' parameter (nginx 1.27.3+).";

const HELP_URL: &str = "https://gixy.getpagespeed.com/en/plugins/missing_resolver/";

/// Missing resolver rule
pub struct MissingResolverRule {
    directives: Vec<String>,
}

impl MissingResolverRule {
    /// Create the rule auditing [`DEFAULT_DIRECTIVES`]
    pub fn new() -> Self {
        Self::with_directives(DEFAULT_DIRECTIVES.iter().map(|d| d.to_string()).collect())
    }

    /// Create the rule auditing the given directives
    pub fn with_directives(directives: Vec<String>) -> Self {
        Self { directives }
    }
}

impl Default for MissingResolverRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MissingResolverRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn summary(&self) -> &'static str {
        SUMMARY
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn help_url(&self) -> &'static str {
        HELP_URL
    }

    fn directives(&self) -> &[String] {
        &self.directives
    }

    fn audit(&self, directive: Directive<'_>, reporter: &mut dyn Reporter) -> Result<()> {
        for finding in analyzer::analyze(directive) {
            reporter.report(finding);
        }
        Ok(())
    }
}

/// Factory for creating the missing resolver rule from configuration
pub struct MissingResolverFactory;

impl RuleFactory for MissingResolverFactory {
    fn create(&self, config: &RuleConfig) -> Result<Box<dyn Rule>> {
        match config {
            RuleConfig::MissingResolver { directives } if directives.is_empty() => {
                Ok(Box::new(MissingResolverRule::new()))
            }
            RuleConfig::MissingResolver { directives } => {
                Ok(Box::new(MissingResolverRule::with_directives(directives.clone())))
            }
            other => Err(Error::config(format!(
                "Invalid config for missing_resolver rule: {}",
                other.type_name()
            ))),
        }
    }
}

/// Register the rule with a registry
pub fn register(registry: &RuleRegistry) {
    registry.register_rule(RULE_NAME, Box::new(MissingResolverFactory));
    info!("Registered rule: {}", RULE_NAME);
}
