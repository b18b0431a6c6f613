//! Derivation search engine.
//!
//! The engine turns a surface form into the shortest chain of grammar rules
//! that reaches a dictionary entry.
//!
//! ## How the parts work together
//!
//! ```text
//! Grammar rules ──┐
//!                 │  CompiledRules::new           (compiled_rules.rs)
//!                 └───────────────┬──────────────
//!                                 │  suffix index + per-rule flags
//!                                 v
//! input ──── Search::run ─────────┤                (search.rs)
//!              - lookup form in the dictionary
//!              - on miss, try candidate rules in file order
//!              - recurse on each rewritten triple
//!              - guard cycles (cycle.rs) and depth (Options)
//!                                 │
//!                                 v
//!                 SearchOutcome { found, metrics }  (metrics.rs)
//! ```
//!
//! The engine keeps only rule ids and dictionary references while it runs.
//! Turning a result into an owned `GuessResult` happens in `api.rs`.
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: per-grammar index (rules by last suffix character)
//!   and flags.
//! - `search.rs`: recursive backtracking search with shortest-chain selection.
//! - `cycle.rs`: the set of triples on the current path.
//! - `metrics.rs`: counters and timing for one search.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=deinflect=trace` to see every lookup and applied rule.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/cycle.rs"]
mod cycle;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/search.rs"]
mod search;

pub(crate) use compiled_rules::{CompiledRules, RuleFlags};
pub use metrics::SearchMetrics;
pub(crate) use search::{Found, Search};
