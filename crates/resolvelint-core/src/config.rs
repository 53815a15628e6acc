//! Configuration types for resolvelint
//!
//! This module defines all configuration structures used throughout the crate.

use crate::finding::Severity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main lint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Rules to run
    pub rules: Vec<RuleConfig>,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

impl LintConfig {
    /// Create a configuration running the given rules with default reporting
    pub fn new(rules: Vec<RuleConfig>) -> Self {
        Self {
            rules,
            report: ReportConfig::default(),
        }
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.rules.is_empty() {
            return Err(crate::Error::config("No rules configured"));
        }

        for rule in &self.rules {
            rule.validate()?;
        }

        Ok(())
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self::new(vec![RuleConfig::default()])
    }
}

/// Rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// Static DNS resolution of proxy targets
    MissingResolver {
        /// Directives to audit (empty = rule defaults)
        #[serde(default)]
        directives: Vec<String>,
    },

    /// Custom rule
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl RuleConfig {
    /// Validate the rule configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            RuleConfig::MissingResolver { directives } => {
                if directives.iter().any(|d| d.trim().is_empty()) {
                    return Err(crate::Error::config(
                        "missing_resolver directive names cannot be empty",
                    ));
                }
                Ok(())
            }
            RuleConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config("Custom rule factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom rule config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the rule type name
    pub fn type_name(&self) -> &str {
        match self {
            RuleConfig::MissingResolver { .. } => "missing_resolver",
            RuleConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig::MissingResolver {
            directives: Vec::new(),
        }
    }
}

/// Report configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Findings below this severity are not reported
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            min_severity: default_min_severity(),
            format: OutputFormat::default(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(crate::Error::config(format!(
                "Unknown output format '{}'. Valid formats: text, json",
                other
            ))),
        }
    }
}

fn default_min_severity() -> Severity {
    Severity::Medium
}
