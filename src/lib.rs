//! Rule-driven deinflection.
//!
//! Given a conjugated surface form such as `書いている`, find the dictionary
//! form (`書く`) together with the chain of grammar rules that connects the
//! two. Rules are reversible suffix rewrites loaded from a small text format
//! (see [`grammar`]); the search walks them backwards until a dictionary
//! lookup hits, keeping the shortest chain.
//!
//! ```
//! use deinflect::{Dictionary, DictionaryEntry, FormGuesser, Grammar};
//!
//! let grammar = Grammar::parse(
//!     "continuous 〜いる for て-form 〜 v5k\n\
//!      て-form 〜いて for plain 〜く v5k\n",
//! )
//! .unwrap();
//! let dictionary = Dictionary::from_entries(vec![DictionaryEntry::with_writing("書く")]);
//!
//! let guesser = FormGuesser::new(grammar, dictionary);
//! let result = guesser.guess("書いている");
//! assert!(result.success);
//! assert_eq!(result.chain.len(), 2);
//! ```

extern crate self as deinflect;

#[macro_use]
mod macros;
mod api;
pub mod dictionary;
mod engine;
pub mod error;
pub mod grammar;

pub use api::{DEFAULT_MAX_DEPTH, DerivationStep, FormGuesser, GuessDetails, GuessResult, GuessResultVerbose, Options};
pub use dictionary::{Dictionary, DictionaryEntry, Lookup, Sense};
pub use engine::SearchMetrics;
pub use error::{ApplyError, DictionaryError, GrammarError, RuleError};
pub use grammar::{Grammar, PosGlob, Rule};

// --- Search state -------------------------------------------------------------

/// The unit the search works on: a form, the POS glob it must be compatible
/// with, and the grammatical role it currently occupies.
///
/// An empty `role` is unconstrained. Triples are plain values; equality and
/// hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub form: String,
    pub pos: PosGlob,
    pub role: String,
}

impl Triple {
    pub fn new(form: impl Into<String>, pos: PosGlob, role: impl Into<String>) -> Self {
        Triple { form: form.into(), pos, role: role.into() }
    }

    /// Start state for a user query: any POS, no role.
    pub fn initial(form: impl Into<String>) -> Self {
        Triple { form: form.into(), pos: PosGlob::any(), role: String::new() }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.form, self.pos, self.role)
    }
}
