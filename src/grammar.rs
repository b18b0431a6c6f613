//! Rule sets.
//!
//! A [`Grammar`] is the flat, ordered list of concrete rules the search runs
//! over. It is built once from rule-file text:
//!
//! ```text
//! text ──lines──▶ skip blanks / `#` comments
//!                   │
//!                   ▼
//!             parse_line (rule.rs)        one Rule per line
//!                   │
//!                   ▼
//!             SoundTable::expand          1 or 9 Rules (phonology.rs)
//!                   │
//!                   ▼
//!             Grammar { rules }           file order, immutable
//! ```
//!
//! Any malformed line aborts the load; a half-loaded rule set is never
//! returned.

#[path = "grammar/glob.rs"]
mod glob;
#[path = "grammar/phonology.rs"]
mod phonology;
#[path = "grammar/rule.rs"]
mod rule;
#[cfg(test)]
#[path = "grammar/tests.rs"]
mod tests;

pub use glob::PosGlob;
pub use phonology::{ROW_COUNT, SoundTable};
pub use rule::{Rule, RuleOrigin};

use crate::error::{GrammarError, RuleError};
use std::path::Path;

const EMBEDDED_RULES: &str = include_str!("../data/grammar.rules");

/// Parse one rule line and expand it with the built-in sound table.
pub fn parse_rule(line: &str) -> Result<Vec<Rule>, RuleError> {
    parse_rule_with_table(line, &SoundTable::gojuon())
}

/// Parse one rule line and expand it with `table`.
pub fn parse_rule_with_table(line: &str, table: &SoundTable) -> Result<Vec<Rule>, RuleError> {
    let parsed = rule::parse_line(line)?;
    table.expand(parsed, line)
}

/// An immutable, ordered list of concrete rules.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    /// Wrap an already built rule list, keeping its order.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Grammar { rules }
    }

    /// Parse rule-file text with the built-in sound table.
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        Self::parse_with_table(text, &SoundTable::gojuon())
    }

    /// Parse rule-file text with a custom sound table.
    pub fn parse_with_table(text: &str, table: &SoundTable) -> Result<Self, GrammarError> {
        let mut rules = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let line_no = idx + 1;
            let expanded =
                parse_rule_with_table(line, table).map_err(|source| GrammarError::Rule { line_no, source })?;
            rules.extend(expanded.into_iter().map(|mut r| {
                r.origin.line_no = line_no;
                r
            }));
        }
        tracing::debug!(rules = rules.len(), "loaded grammar rules");
        Ok(Grammar { rules })
    }

    /// Read and parse a rule file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| GrammarError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }

    /// The rule set shipped with the crate (`data/grammar.rules`).
    pub fn embedded() -> Result<Self, GrammarError> {
        Self::parse(EMBEDDED_RULES)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::str::FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::parse(s)
    }
}
