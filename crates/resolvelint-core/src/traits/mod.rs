//! Core traits for resolvelint
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`Rule`]: Audit directives and report findings
//! - [`Reporter`]: Receive findings

pub mod reporter;
pub mod rule;

pub use reporter::Reporter;
pub use rule::{Rule, RuleFactory};
