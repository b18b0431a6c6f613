//! Backward derivation search.
//!
//! Starting from the user's form, the search alternates two steps until a
//! dictionary lookup hits:
//!
//! ```text
//! (form, *, "")
//!     │ lookup hit? ──yes──▶ candidate: chain so far + entry
//!     │ no
//!     ▼
//! for rule in candidates(form)       (file order)
//!     if rule.is_applicable(triple)
//!         child = rule.apply(triple)
//!         recurse(child, chain + rule)
//!     │
//!     ▼
//! keep the candidate with the fewest rules; ties keep the first found
//! ```
//!
//! A hit ends a branch immediately: nothing below a hit can be shorter.
//! Recursion is bounded by `Options::max_depth` and by the cycle guard in
//! `cycle.rs`. Hitting either bound is a dead end, never an error.
//!
//! The search only holds ids into the rule slice and references into the
//! dictionary; the public API copies them into an owned `GuessResult`.

use super::compiled_rules::{CompiledRules, RuleId};
use super::cycle::ActivePath;
use super::metrics::SearchMetrics;
use crate::dictionary::{DictionaryEntry, Lookup};
use crate::grammar::Rule;
use crate::{Options, Triple};
use std::time::Instant;

/// One applied rule on the current path and the form it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AppliedRule {
    pub rule: RuleId,
    pub form: String,
}

/// A successful derivation: chain from the input to `entry`.
#[derive(Debug, Clone)]
pub(crate) struct Found<'a> {
    pub chain: Vec<AppliedRule>,
    pub entry: &'a DictionaryEntry,
}

/// Search output bundled with its counters.
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome<'a> {
    pub found: Option<Found<'a>>,
    pub metrics: SearchMetrics,
}

/// State for one query.
///
/// Usage: `Search::new(rules, &compiled, &dictionary, &options).run(input)`.
pub(crate) struct Search<'a, D: Lookup + ?Sized> {
    rules: &'a [Rule],
    compiled: &'a CompiledRules,
    dictionary: &'a D,
    options: &'a Options,
    path: ActivePath,
    metrics: SearchMetrics,
}

impl<'a, D: Lookup + ?Sized> Search<'a, D> {
    pub fn new(rules: &'a [Rule], compiled: &'a CompiledRules, dictionary: &'a D, options: &'a Options) -> Self {
        Search { rules, compiled, dictionary, options, path: ActivePath::default(), metrics: SearchMetrics::default() }
    }

    pub fn run(mut self, input: &str) -> SearchOutcome<'a> {
        let start = Instant::now();
        let mut chain = Vec::new();
        let found = self.visit(&Triple::initial(input), &mut chain);
        self.metrics.elapsed = start.elapsed();

        match &found {
            Some(f) => tracing::debug!(input, rules = f.chain.len(), "derivation found"),
            None if self.metrics.depth_cutoffs > 0 => tracing::warn!(
                input,
                max_depth = self.options.max_depth,
                cutoffs = self.metrics.depth_cutoffs,
                "no derivation found within the depth limit"
            ),
            None => tracing::debug!(input, "no derivation found"),
        }

        SearchOutcome { found, metrics: self.metrics }
    }

    /// Rule ids to try for `form`, in file order.
    fn candidates(&self, form: &str) -> Vec<RuleId> {
        if self.options.indexed { self.compiled.candidates(form) } else { (0..self.rules.len()).collect() }
    }

    fn visit(&mut self, triple: &Triple, chain: &mut Vec<AppliedRule>) -> Option<Found<'a>> {
        self.metrics.nodes_visited += 1;
        self.metrics.max_depth_reached = self.metrics.max_depth_reached.max(chain.len());

        if !self.path.enter(triple) {
            tracing::trace!(%triple, "cycle pruned");
            self.metrics.cycles_pruned += 1;
            return None;
        }
        let best = self.expand(triple, chain);
        self.path.leave(triple);
        best
    }

    fn expand(&mut self, triple: &Triple, chain: &mut Vec<AppliedRule>) -> Option<Found<'a>> {
        self.metrics.lookups += 1;
        let dictionary: &'a D = self.dictionary;
        if let Some(entry) = dictionary.lookup(&triple.form) {
            tracing::trace!(%triple, depth = chain.len(), "dictionary hit");
            return Some(Found { chain: chain.clone(), entry });
        }

        if chain.len() >= self.options.max_depth {
            self.metrics.depth_cutoffs += 1;
            return None;
        }

        let mut best: Option<Found<'a>> = None;
        for id in self.candidates(&triple.form) {
            let rule = &self.rules[id];
            self.metrics.rules_tested += 1;
            if !rule.is_applicable(triple) {
                continue;
            }
            let child = match rule.apply(triple) {
                Ok(child) => child,
                Err(err) => {
                    tracing::error!(%err, %triple, "applicable rule failed to apply");
                    debug_assert!(false, "{err}");
                    continue;
                }
            };
            self.metrics.rules_applied += 1;
            tracing::trace!(from = %triple, to = %child, rule = %rule.name, "applying rule");

            chain.push(AppliedRule { rule: id, form: child.form.clone() });
            let found = self.visit(&child, chain);
            chain.pop();

            if let Some(found) = found {
                if best.as_ref().is_none_or(|b| found.chain.len() < b.chain.len()) {
                    best = Some(found);
                }
            }
        }
        best
    }
}
