// # Reporter Trait
//
// Sink for findings. Aggregation, formatting and severity filtering belong
// to the reporter, never to the rules.

use crate::finding::Finding;

/// Trait for finding sinks
pub trait Reporter {
    /// Record a finding
    fn report(&mut self, finding: Finding);
}

impl Reporter for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}
