//! Rule records: parsing one rule line, the applicability test, and the
//! suffix rewrite.
//!
//! A rule line reads as "a NAME form ending in SOURCE is the TARGET form
//! ending in TARGET_SUFFIX, whose part of speech is one of TAG...":
//!
//! ```text
//! continuous plain 〜いる v1 for て-form 〜 v[15]* vk vs-*
//! ^name      ^role  ^src  ^gate  ^target ^tgt ^result tags
//! ```
//!
//! `ROLE` and the POS gate are optional.

use super::glob::PosGlob;
use crate::Triple;
use crate::error::{ApplyError, RuleError};

/// Where a rule came from in its rule file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOrigin {
    /// 1-based line number, or 0 for rules parsed outside a file.
    pub line_no: usize,
    /// Sound-table row for rules produced by placeholder expansion.
    pub row: Option<usize>,
}

/// One reversible suffix rewrite plus its applicability gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Name of the grammatical form (`past`, `て-form`, ...). Doubles as the
    /// role this rule fires on when `trigger_role` is absent.
    pub name: String,
    /// Explicit role this rule also fires on.
    pub trigger_role: Option<String>,
    pub source_suffix: String,
    /// A POS tag that the incoming triple's glob must accept.
    pub pos_gate: Option<String>,
    /// Role assigned to the rewritten triple.
    pub target_role: String,
    pub target_suffix: String,
    /// POS constraint assigned to the rewritten triple.
    pub result_pos: PosGlob,
    pub origin: RuleOrigin,
}

/// Parse one rule line without sound-change expansion.
pub(crate) fn parse_line(line: &str) -> Result<Rule, RuleError> {
    // \S is used for every field because fields are whitespace separated and
    // contain kana/kanji.
    let re = crate::static_regex!(
        r"^(\S+)\s*(\S*)\s+〜(\S*)\s*(\S*)\s+for\s+(\S*)\s+〜(\S*)[ \t]+((?:[ \t]*\S+)+)\s*$"
    );
    let trimmed = line.trim();
    let caps = re.captures(trimmed).ok_or_else(|| RuleError::MalformedRule { line: line.to_string() })?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
    let optional = |i: usize| Some(group(i)).filter(|s| !s.is_empty()).map(str::to_string);

    Ok(Rule {
        name: group(1).to_string(),
        trigger_role: optional(2),
        source_suffix: group(3).to_string(),
        pos_gate: optional(4),
        target_role: group(5).to_string(),
        target_suffix: group(6).to_string(),
        result_pos: PosGlob::from_tag_list(group(7))?,
        origin: RuleOrigin::default(),
    })
}

impl Rule {
    /// Whether this rule may be applied (backwards) to `triple`.
    ///
    /// 1. A non-empty triple role must equal `name` or `trigger_role`.
    /// 2. The form must end with `source_suffix`.
    /// 3. If the rule has a POS gate, the triple's glob must accept it.
    pub fn is_applicable(&self, triple: &Triple) -> bool {
        if !triple.role.is_empty()
            && triple.role != self.name
            && self.trigger_role.as_deref() != Some(triple.role.as_str())
        {
            return false;
        }
        if !triple.form.ends_with(self.source_suffix.as_str()) {
            return false;
        }
        match &self.pos_gate {
            Some(gate) => triple.pos.matches(gate),
            None => true,
        }
    }

    /// Replace the trailing `source_suffix` of `form` with `target_suffix`.
    pub fn apply_to_form(&self, form: &str) -> Result<String, ApplyError> {
        let stem = form.strip_suffix(self.source_suffix.as_str()).ok_or_else(|| {
            ApplyError::PreconditionViolated { rule: self.name.clone(), form: form.to_string() }
        })?;
        let mut out = String::with_capacity(stem.len() + self.target_suffix.len());
        out.push_str(stem);
        out.push_str(&self.target_suffix);
        Ok(out)
    }

    /// Rewrite `triple` into the form this rule derives it from.
    ///
    /// Callers are expected to check [`Rule::is_applicable`] first; only the
    /// suffix precondition is re-checked here.
    pub fn apply(&self, triple: &Triple) -> Result<Triple, ApplyError> {
        Ok(Triple {
            form: self.apply_to_form(&triple.form)?,
            pos: self.result_pos.clone(),
            role: self.target_role.clone(),
        })
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule[name: {}, ", self.name)?;
        if let Some(role) = &self.trigger_role {
            write!(f, "role: {role}, ")?;
        }
        write!(f, "source: 〜{}, ", self.source_suffix)?;
        if let Some(gate) = &self.pos_gate {
            write!(f, "pos: {gate}, ")?;
        }
        write!(f, "target: {}, target_suffix: 〜{}, result_pos: {}]", self.target_role, self.target_suffix, self.result_pos)
    }
}
