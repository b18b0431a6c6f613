//! Cycle control for the backward search.
//!
//! Nothing in the rule format forbids a chain of rules that leads back to a
//! state already being explored (`A --r1--> B --r2--> A`). Without a guard
//! such a grammar recurses forever.
//!
//! The search keeps the triples of the current root-to-node path in an
//! [`ActivePath`]. A child whose triple is already on the path is pruned.
//!
//! ## What counts as "the same state"
//!
//! The whole triple: form, POS glob and role. Two nodes with the same form
//! but different roles accept different rules, so they are distinct states.
//!
//! Only the current path is tracked, not every triple ever seen. A triple
//! reached again through a sibling branch is searched again, which keeps the
//! shortest-chain result identical to the unguarded search on acyclic
//! grammars.

use crate::Triple;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub(crate) struct ActivePath {
    triples: HashSet<Triple>,
}

impl ActivePath {
    /// Push `triple`. Returns false if it is already on the path.
    pub(crate) fn enter(&mut self, triple: &Triple) -> bool {
        if self.triples.contains(triple) {
            return false;
        }
        self.triples.insert(triple.clone());
        true
    }

    pub(crate) fn leave(&mut self, triple: &Triple) {
        self.triples.remove(triple);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.triples.len()
    }
}
