//! Search metrics.
//!
//! Counters collected while walking the derivation tree. They are cheap
//! integer bumps, so every search collects them; only the verbose entry point
//! hands them back to the caller.

use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchMetrics {
    /// Search nodes entered (including pruned ones).
    pub nodes_visited: usize,
    /// Dictionary probes.
    pub lookups: usize,
    /// Candidate rules tested with `is_applicable`.
    pub rules_tested: usize,
    /// Rules that passed the test and were applied.
    pub rules_applied: usize,
    /// Nodes dropped because their triple was already on the current path.
    pub cycles_pruned: usize,
    /// Nodes not expanded because the chain reached `Options::max_depth`.
    pub depth_cutoffs: usize,
    /// Deepest chain length explored.
    pub max_depth_reached: usize,
    /// Wall time of the search.
    pub elapsed: Duration,
}
