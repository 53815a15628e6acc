// # resolvelint-core
//
// Core library for the resolvelint configuration linter.
//
// ## Architecture Overview
//
// This library provides everything a lint rule needs apart from the rule itself:
// - **ConfigTree / Directive**: Arena-backed directive tree with scope queries
// - **compile_script**: Static folding of `$variable` interpolation
// - **Rule**: Trait implemented by every lint rule
// - **Reporter**: Sink that receives findings
// - **RuleRegistry**: Plugin-based registry for rules
// - **LintEngine**: Walks a tree and dispatches directives to rules
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Tree, scripts and reporting are independent of any rule
// 2. **Plugin-Based**: Rules are registered dynamically, no hard-coded if-else
// 3. **Library-First**: All functionality can be used without the CLI
// 4. **Fault Isolation**: A failing audit never halts the scan of the rest of a file

pub mod config;
pub mod engine;
pub mod error;
pub mod finding;
pub mod net;
pub mod registry;
pub mod report;
pub mod script;
pub mod traits;
pub mod tree;

// Re-export core types for convenience
pub use config::{LintConfig, OutputFormat, ReportConfig, RuleConfig};
pub use engine::{LintEngine, LintSummary};
pub use error::{Error, Result};
pub use finding::{DirectiveRef, Finding, Severity};
pub use registry::RuleRegistry;
pub use report::MemoryReporter;
pub use traits::{Reporter, Rule, RuleFactory};
pub use tree::{ConfigTree, Directive, NodeId};
