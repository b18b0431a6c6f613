//! Rule indexing.
//!
//! Every search node has to find the rules whose source suffix ends the
//! current form. Scanning the whole list works, but almost every rule fails
//! the suffix test, so the list is pre-indexed once per grammar:
//!
//! - **Buckets by last character**: a rule whose source suffix ends in `て`
//!   can only fire on forms ending in `て`.
//! - **Always-on list**: rules with an empty source suffix fire on any form.
//!
//! ```text
//! form "書いている" ──last char──▶ by_last_char['る'] ─┐
//!                                  always_on ─────────┴─ merge (ascending id)
//! ```
//!
//! ## Invariants
//!
//! - `RuleId` is an index into the grammar's rule slice and into
//!   `CompiledRules::metas`; both stay aligned.
//! - Candidate lists come back in ascending id order, i.e. rule-file order, so
//!   the indexed search visits rules in exactly the order the linear scan does.

use crate::grammar::Rule;
use std::collections::HashMap;

/// Rule identifier (index into the rules slice).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse per-rule features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RuleFlags: u8 {
        /// Source suffix is empty; the rule is a candidate for every form.
        const EMPTY_SOURCE = 1 << 0;
        /// Rule declares an explicit trigger role.
        const ROLE_GATED   = 1 << 1;
        /// Rule declares a POS gate.
        const POS_GATED    = 1 << 2;
        /// Rule was produced by sound-table expansion.
        const EXPANDED     = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RuleMeta {
    pub flags: RuleFlags,
    pub last_char: Option<char>,
}

impl RuleMeta {
    fn from_rule(rule: &Rule) -> Self {
        let mut flags = RuleFlags::empty();
        flags.set(RuleFlags::EMPTY_SOURCE, rule.source_suffix.is_empty());
        flags.set(RuleFlags::ROLE_GATED, rule.trigger_role.is_some());
        flags.set(RuleFlags::POS_GATED, rule.pos_gate.is_some());
        flags.set(RuleFlags::EXPANDED, rule.origin.row.is_some());
        RuleMeta { flags, last_char: rule.source_suffix.chars().next_back() }
    }
}

#[derive(Default, Debug)]
pub struct RuleIndex {
    pub always_on: Vec<RuleId>,
    pub by_last_char: HashMap<char, Vec<RuleId>>,
}

/// Per-grammar metadata and index. Holds ids only, never rule references.
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub metas: Vec<RuleMeta>,
    pub index: RuleIndex,
}

impl CompiledRules {
    pub fn new(rules: &[Rule]) -> Self {
        let metas: Vec<RuleMeta> = rules.iter().map(RuleMeta::from_rule).collect();

        let mut index = RuleIndex::default();
        for (id, meta) in metas.iter().enumerate() {
            match meta.last_char {
                None => index.always_on.push(id),
                Some(c) => index.by_last_char.entry(c).or_default().push(id),
            }
        }

        CompiledRules { metas, index }
    }

    /// Ids of rules whose suffix could end `form`, in ascending order.
    pub fn candidates(&self, form: &str) -> Vec<RuleId> {
        let bucket: &[RuleId] = form
            .chars()
            .next_back()
            .and_then(|c| self.index.by_last_char.get(&c))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        merge_sorted(&self.index.always_on, bucket)
    }

    /// Number of rules carrying all of `flags`.
    pub fn count_with(&self, flags: RuleFlags) -> usize {
        self.metas.iter().filter(|m| m.flags.contains(flags)).count()
    }

    pub fn len(&self) -> usize {
        self.metas.len()
    }
}

fn merge_sorted(a: &[RuleId], b: &[RuleId]) -> Vec<RuleId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] <= b[j] {
            out.push(a[i]);
            i += 1;
        } else {
            out.push(b[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}
