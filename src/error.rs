//! Error types.
//!
//! Load-time errors (`RuleError`, `GrammarError`, `DictionaryError`) mean the
//! configuration is corrupt and startup should stop. `ApplyError` is an
//! internal invariant violation: the engine only applies rules it has already
//! tested with `Rule::is_applicable`.
//!
//! A dictionary miss or an exhausted search is not an error; those surface as
//! `GuessResult { success: false, .. }`.

use std::path::PathBuf;

/// A single rule line could not be turned into rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The line does not have the `NAME [ROLE] 〜SUFFIX [POS] for TARGET 〜SUFFIX TAG...` shape.
    #[error("could not parse grammar rule: {line}")]
    MalformedRule { line: String },

    /// A sound-change placeholder appears in one suffix but not in the other.
    #[error("sound-change placeholder on only one side of rule: {line}")]
    UnbalancedPhonologyPlaceholder { line: String },

    /// A suffix contains more than one sound-change placeholder.
    #[error("more than one sound-change placeholder in the {side} suffix of rule: {line}")]
    RepeatedPhonologyPlaceholder { line: String, side: SuffixSide },

    /// A POS glob could not be compiled.
    #[error("invalid part-of-speech glob `{glob}`: {reason}")]
    InvalidPosGlob { glob: String, reason: String },
}

/// Which suffix of a rule an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixSide {
    Source,
    Target,
}

impl std::fmt::Display for SuffixSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuffixSide::Source => f.write_str("source"),
            SuffixSide::Target => f.write_str("target"),
        }
    }
}

/// Loading a whole rule file failed.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("failed to read grammar file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("grammar line {line_no}: {source}")]
    Rule {
        line_no: usize,
        #[source]
        source: RuleError,
    },
}

/// `Rule::apply` was called on a form that does not end with the rule's source suffix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("rule `{rule}` is not applicable to `{form}`")]
    PreconditionViolated { rule: String, form: String },
}

/// Loading dictionary data failed.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dictionary XML: {reason}")]
    Xml { reason: String },
}
