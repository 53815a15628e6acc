//! Test doubles and common utilities for engine contract tests
//!
//! This module provides minimal rules that verify engine behaviour without
//! implementing real lint logic.

#![allow(dead_code)]

use resolvelint_core::error::{Error, Result};
use resolvelint_core::{ConfigTree, Directive, Finding, NodeId, Reporter, Rule, Severity};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A rule that reports one MEDIUM finding per audited directive
pub struct RecordingRule {
    name: &'static str,
    directives: Vec<String>,
    audit_count: Arc<AtomicUsize>,
    audited: Arc<Mutex<Vec<String>>>,
}

impl RecordingRule {
    pub fn new(name: &'static str, directives: &[&str]) -> Self {
        Self {
            name,
            directives: directives.iter().map(|d| d.to_string()).collect(),
            audit_count: Arc::new(AtomicUsize::new(0)),
            audited: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a new RecordingRule that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            name: other.name,
            directives: other.directives.clone(),
            audit_count: Arc::clone(&other.audit_count),
            audited: Arc::clone(&other.audited),
        }
    }

    /// Get the number of times audit() was called
    pub fn audit_count(&self) -> usize {
        self.audit_count.load(Ordering::SeqCst)
    }

    /// Rendered directives in audit order
    pub fn audited(&self) -> Vec<String> {
        self.audited.lock().unwrap().clone()
    }
}

impl Rule for RecordingRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn summary(&self) -> &'static str {
        "recording rule"
    }

    fn description(&self) -> &'static str {
        "Reports every audited directive"
    }

    fn help_url(&self) -> &'static str {
        "https://example.invalid/recording"
    }

    fn directives(&self) -> &[String] {
        &self.directives
    }

    fn audit(&self, directive: Directive<'_>, reporter: &mut dyn Reporter) -> Result<()> {
        self.audit_count.fetch_add(1, Ordering::SeqCst);
        self.audited.lock().unwrap().push(directive.to_string());
        reporter.report(Finding::new(
            self.name,
            Severity::Medium,
            self.summary(),
            "recorded",
            directive,
        ));
        Ok(())
    }
}

/// A rule that fails on directives whose first argument is "broken"
pub struct FailingRule {
    directives: Vec<String>,
}

impl FailingRule {
    pub fn new(directives: &[&str]) -> Self {
        Self {
            directives: directives.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl Rule for FailingRule {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn summary(&self) -> &'static str {
        "failing rule"
    }

    fn description(&self) -> &'static str {
        "Fails on broken directives"
    }

    fn help_url(&self) -> &'static str {
        "https://example.invalid/failing"
    }

    fn directives(&self) -> &[String] {
        &self.directives
    }

    fn audit(&self, directive: Directive<'_>, reporter: &mut dyn Reporter) -> Result<()> {
        if directive.first_arg() == Some("broken") {
            return Err(Error::rule(self.name(), "cannot audit broken directive"));
        }
        reporter.report(Finding::new(
            self.name(),
            Severity::High,
            self.summary(),
            "audited",
            directive,
        ));
        Ok(())
    }
}

/// http { server { location / { proxy_pass <a>; } location /b { proxy_pass <b>; } } }
pub fn two_location_tree(first: &str, second: &str) -> ConfigTree {
    let no_args: [&str; 0] = [];
    let mut tree = ConfigTree::new();
    let http = tree.push_block(NodeId::ROOT, "http", no_args);
    let server = tree.push_block(http, "server", no_args);
    tree.push(server, "listen", ["80"]);
    let a = tree.push_block(server, "location", ["/"]);
    tree.push(a, "proxy_pass", [first]);
    let b = tree.push_block(server, "location", ["/b"]);
    tree.push(b, "proxy_pass", [second]);
    tree
}
