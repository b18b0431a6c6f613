use crate::dictionary::{Dictionary, DictionaryEntry, Lookup};
use crate::engine::{CompiledRules, Found, RuleFlags, Search, SearchMetrics};
use crate::grammar::{Grammar, RuleOrigin};

/// Default bound on chain length.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Options that affect a search.
#[derive(Debug, Clone)]
pub struct Options {
    /// Longest rule chain explored. Deeper branches are dead ends.
    pub max_depth: usize,
    /// Use the suffix index instead of testing every rule at every node.
    /// Results are identical; only the amount of work differs.
    pub indexed: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, indexed: true }
    }
}

/// One rule application in a derivation, copied out of the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationStep {
    /// Name of the rule (the grammatical form `from` is in).
    pub rule: String,
    pub source_suffix: String,
    pub target_suffix: String,
    /// Role of `to`.
    pub target_role: String,
    /// Form before the rewrite.
    pub from: String,
    /// Form after the rewrite.
    pub to: String,
    pub origin: RuleOrigin,
}

/// Result from [`FormGuesser::guess`] and [`FormGuesser::guess_with`].
///
/// Fully owned: it does not borrow from the guesser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub success: bool,
    /// Rules from the query towards the dictionary form. Empty when the query
    /// is itself a dictionary form.
    pub chain: Vec<DerivationStep>,
    pub entry: Option<DictionaryEntry>,
    pub original_query: String,
}

impl GuessResult {
    fn failure(query: &str) -> Self {
        GuessResult { success: false, chain: Vec::new(), entry: None, original_query: query.to_string() }
    }

    /// The dictionary form reached, i.e. the last form of the chain.
    pub fn dictionary_form(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        Some(self.chain.last().map(|s| s.to.as_str()).unwrap_or(&self.original_query))
    }
}

/// Additional details returned by [`FormGuesser::guess_verbose_with`].
#[derive(Debug, Clone)]
pub struct GuessDetails {
    pub metrics: SearchMetrics,
    /// Concrete rules in the grammar.
    pub rule_count: usize,
    /// How many of them came from sound-table expansion.
    pub expanded_rules: usize,
    pub max_depth: usize,
}

/// Result from [`FormGuesser::guess_verbose_with`].
#[derive(Debug, Clone)]
pub struct GuessResultVerbose {
    pub result: GuessResult,
    pub details: GuessDetails,
}

/// A grammar and a dictionary, ready to answer queries.
///
/// Both are read-only after construction, so a guesser can be shared between
/// threads when the dictionary type allows it.
#[derive(Debug)]
pub struct FormGuesser<D = Dictionary> {
    grammar: Grammar,
    dictionary: D,
    compiled: CompiledRules,
    options: Options,
}

impl<D: Lookup> FormGuesser<D> {
    pub fn new(grammar: Grammar, dictionary: D) -> Self {
        let compiled = CompiledRules::new(grammar.rules());
        tracing::debug!(
            rules = compiled.len(),
            expanded = compiled.count_with(RuleFlags::EXPANDED),
            always_on = compiled.index.always_on.len(),
            "compiled grammar"
        );
        FormGuesser { grammar, dictionary, compiled, options: Options::default() }
    }

    /// Replace the options used by [`FormGuesser::guess`].
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Find the dictionary form of `input` with the guesser's options.
    pub fn guess(&self, input: &str) -> GuessResult {
        self.guess_with(input, &self.options)
    }

    /// Find the dictionary form of `input` with explicit `options`.
    pub fn guess_with(&self, input: &str, options: &Options) -> GuessResult {
        self.guess_verbose_with(input, options).result
    }

    /// Like [`FormGuesser::guess_with`], also returning search counters.
    pub fn guess_verbose_with(&self, input: &str, options: &Options) -> GuessResultVerbose {
        let outcome = Search::new(self.grammar.rules(), &self.compiled, &self.dictionary, options).run(input);
        let result = match outcome.found {
            Some(found) => self.snapshot(input, found),
            None => GuessResult::failure(input),
        };
        let details = GuessDetails {
            metrics: outcome.metrics,
            rule_count: self.compiled.len(),
            expanded_rules: self.compiled.count_with(RuleFlags::EXPANDED),
            max_depth: options.max_depth,
        };
        GuessResultVerbose { result, details }
    }

    /// Copy a borrowed search result into an owned `GuessResult`.
    fn snapshot(&self, input: &str, found: Found<'_>) -> GuessResult {
        let mut from = input.to_string();
        let chain = found
            .chain
            .into_iter()
            .map(|applied| {
                let rule = &self.grammar.rules()[applied.rule];
                DerivationStep {
                    rule: rule.name.clone(),
                    source_suffix: rule.source_suffix.clone(),
                    target_suffix: rule.target_suffix.clone(),
                    target_role: rule.target_role.clone(),
                    from: std::mem::replace(&mut from, applied.form.clone()),
                    to: applied.form,
                    origin: rule.origin,
                }
            })
            .collect();
        GuessResult { success: true, chain, entry: Some(found.entry.clone()), original_query: input.to_string() }
    }
}

impl std::fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is {} for {}", self.from, self.rule, self.to)
    }
}

/// One line per step, indented by depth, then the entry:
///
/// ```text
/// 書いている is continuous for 書いて
///   書いて is て-form for 書く
/// 書く [かく]: (v5k vt) to write
/// ```
impl std::fmt::Display for GuessResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.success {
            return write!(f, "no dictionary form found for {}", self.original_query);
        }
        for (depth, step) in self.chain.iter().enumerate() {
            writeln!(f, "{}{step}", "  ".repeat(depth))?;
        }
        match &self.entry {
            Some(entry) => write!(f, "{entry}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guesser(rules: &str, entries: Vec<DictionaryEntry>) -> FormGuesser {
        FormGuesser::new(Grammar::parse(rules).unwrap(), Dictionary::from_entries(entries))
    }

    fn kaku() -> DictionaryEntry {
        DictionaryEntry::with_writing("書く").reading("かく").sense(&["v5k", "vt"], &["to write"])
    }

    const CONTINUOUS: &str = "continuous plain 〜いる v1 for て-form 〜 v[15]* vk vs-*\n\
                              て-form 〜いて for plain 〜く v5k\n";

    #[test]
    fn guesses_two_rule_chain() {
        let g = guesser(CONTINUOUS, vec![kaku()]);
        let result = g.guess("書いている");

        assert!(result.success);
        assert_eq!(result.original_query, "書いている");
        assert_eq!(result.entry, Some(kaku()));

        let steps: Vec<(&str, &str, &str)> =
            result.chain.iter().map(|s| (s.rule.as_str(), s.from.as_str(), s.to.as_str())).collect();
        assert_eq!(steps, vec![("continuous", "書いている", "書いて"), ("て-form", "書いて", "書く")]);
        assert_eq!(result.chain[0].source_suffix, "いる");
        assert_eq!(result.chain[0].target_suffix, "");
        assert_eq!(result.chain[1].target_role, "plain");
        assert_eq!(result.dictionary_form(), Some("書く"));
    }

    #[test]
    fn dictionary_form_is_returned_unchanged() {
        let g = guesser(CONTINUOUS, vec![kaku()]);
        let result = g.guess("書く");
        assert!(result.success);
        assert!(result.chain.is_empty());
        assert_eq!(result.dictionary_form(), Some("書く"));
    }

    #[test]
    fn unknown_word_is_a_failure_value() {
        let g = guesser(CONTINUOUS, vec![kaku()]);
        let result = g.guess("読んでいる");
        assert!(!result.success);
        assert!(result.chain.is_empty());
        assert_eq!(result.entry, None);
        assert_eq!(result.dictionary_form(), None);
        assert_eq!(result.to_string(), "no dictionary form found for 読んでいる");
    }

    #[test]
    fn chain_replays_to_the_dictionary_form() {
        let g = FormGuesser::new(
            Grammar::embedded().unwrap(),
            Dictionary::from_entries(vec![DictionaryEntry::with_writing("食べる")]),
        );
        let result = g.guess("食べませんでした");
        assert!(result.success);

        let mut form = result.original_query.clone();
        for step in &result.chain {
            assert_eq!(step.from, form);
            form = form.strip_suffix(step.source_suffix.as_str()).unwrap().to_string() + &step.target_suffix;
            assert_eq!(step.to, form);
        }
        assert_eq!(form, "食べる");
    }

    #[test]
    fn display_matches_derivation_layout() {
        let g = guesser(CONTINUOUS, vec![kaku()]);
        assert_eq!(
            g.guess("書いている").to_string(),
            "書いている is continuous for 書いて\n  書いて is て-form for 書く\n書く [かく]: (v5k vt) to write"
        );
    }

    #[test]
    fn verbose_reports_metrics() {
        let g = guesser(CONTINUOUS, vec![kaku()]);
        let verbose = g.guess_verbose_with("書いている", &Options::default());
        assert!(verbose.result.success);
        assert_eq!(verbose.details.rule_count, 2);
        assert_eq!(verbose.details.expanded_rules, 0);
        assert_eq!(verbose.details.metrics.rules_applied, 2);
        assert_eq!(verbose.details.metrics.lookups, 3);
        assert_eq!(verbose.details.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn max_depth_option_is_honoured() {
        let g = guesser(CONTINUOUS, vec![kaku()]).with_options(Options { max_depth: 1, ..Options::default() });
        assert!(!g.guess("書いている").success);
        assert!(g.guess("書いて").success);
        assert!(g.guess_with("書いている", &Options::default()).success);
    }

    #[test]
    fn concurrent_guesses_share_one_guesser() {
        let g = FormGuesser::new(
            Grammar::embedded().unwrap(),
            Dictionary::from_entries(vec![kaku(), DictionaryEntry::with_writing("食べる")]),
        );
        let inputs = ["書いている", "書きました", "食べたい", "書かない"];
        std::thread::scope(|scope| {
            let handles: Vec<_> = inputs.iter().map(|input| scope.spawn(|| g.guess(input))).collect();
            for handle in handles {
                assert!(handle.join().unwrap().success);
            }
        });
    }
}
