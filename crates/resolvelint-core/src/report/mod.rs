// # Reporting
//
// Concrete reporter and renderers used by the CLI.
//
// - `MemoryReporter`: collects findings in the order they are reported
// - `render_text` / `render_json`: severity-filtered output

pub mod memory;
pub mod render;

pub use memory::MemoryReporter;
pub use render::{FileReport, render_json, render_text};
