//! Plugin-based rule registry
//!
//! The registry allows lint rules to be registered dynamically at runtime,
//! avoiding hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use resolvelint_core::registry::RuleRegistry;
//! use resolvelint_core::config::RuleConfig;
//!
//! // Create a registry
//! let registry = RuleRegistry::new();
//!
//! // Register rules
//! resolvelint_rule_resolver::register(&registry);
//!
//! // Create rule from config
//! let rule = registry.create_rule(&RuleConfig::default())?;
//! ```
//!
//! ## Registration
//!
//! Rule crates should register themselves during initialization:
//!
//! ```rust,ignore
//! // In resolvelint-rule-resolver crate
//! pub fn register(registry: &RuleRegistry) {
//!     registry.register_rule("missing_resolver", Box::new(MissingResolverFactory));
//! }
//! ```

use crate::config::{LintConfig, RuleConfig};
use crate::error::{Error, Result};
use crate::traits::{Rule, RuleFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Rule registry for plugin-based rule creation
///
/// The registry maintains a map of rule type names to factory objects,
/// allowing dynamic instantiation of rules based on configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes. A lock poisoned by a panicking writer is
/// recovered rather than propagated.
#[derive(Default)]
pub struct RuleRegistry {
    /// Registered rule factories
    rules: RwLock<HashMap<String, Box<dyn RuleFactory>>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule factory
    ///
    /// # Parameters
    ///
    /// - `name`: Rule type name (e.g., "missing_resolver")
    /// - `factory`: Factory object for creating rule instances
    pub fn register_rule(&self, name: impl Into<String>, factory: Box<dyn RuleFactory>) {
        let name = name.into();
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        rules.insert(name, factory);
    }

    /// Create a rule from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Rule>)`: Created rule instance
    /// - `Err(Error)`: If rule type is not registered or creation fails
    pub fn create_rule(&self, config: &RuleConfig) -> Result<Box<dyn Rule>> {
        let rule_type = config.type_name();
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);

        let factory = rules
            .get(rule_type)
            .ok_or_else(|| Error::config(format!("Unknown rule type: {}", rule_type)))?;

        factory.create(config)
    }

    /// Create every rule listed in a lint configuration
    pub fn create_rules(&self, config: &LintConfig) -> Result<Vec<Box<dyn Rule>>> {
        config.validate()?;
        config.rules.iter().map(|rule| self.create_rule(rule)).collect()
    }

    /// List all registered rule types, sorted by name
    pub fn list_rules(&self) -> Vec<String> {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = rules.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a rule type is registered
    pub fn has_rule(&self, name: &str) -> bool {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        rules.contains_key(name)
    }
}
