//! Sound-change expansion.
//!
//! Godan verbs conjugate by moving the final kana along its consonant row
//! (書か・書き・書く・書け・書こ). Rule files abstract over that with a katakana
//! vowel placeholder: `〜イます for 〜ウ` stands for nine rules, one per
//! consonant row:
//!
//! ```text
//! row:  0   1   2   3   4   5   6   7   8
//! ア    さ  か  が  ま  ば  な  ら  わ  た
//! イ    し  き  ぎ  み  び  に  り  い  ち
//! ウ    す  く  ぐ  む  ぶ  ぬ  る  う  つ
//! エ    せ  け  げ  め  べ  ね  れ  え  て
//! オ    そ  こ  ご  も  ぼ  の  ろ  お  と
//! ```
//!
//! Both suffixes are substituted from the same row index, so `〜イます` /
//! `〜ウ` yields `〜きます → 〜く`, `〜みます → 〜む`, and so on.

use super::rule::Rule;
use crate::error::{RuleError, SuffixSide};

/// Number of consonant rows every placeholder maps onto.
pub const ROW_COUNT: usize = 9;

/// Placeholder → row substitution table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundTable {
    rows: Vec<(String, [String; ROW_COUNT])>,
}

impl SoundTable {
    /// Build a table from `(placeholder, row entries)` pairs.
    pub fn new<P, E>(rows: impl IntoIterator<Item = (P, [E; ROW_COUNT])>) -> Self
    where
        P: Into<String>,
        E: Into<String>,
    {
        SoundTable { rows: rows.into_iter().map(|(p, entries)| (p.into(), entries.map(Into::into))).collect() }
    }

    /// The five-vowel table used for Japanese verb rows.
    pub fn gojuon() -> Self {
        SoundTable::new([
            ("ア", ["さ", "か", "が", "ま", "ば", "な", "ら", "わ", "た"]),
            ("イ", ["し", "き", "ぎ", "み", "び", "に", "り", "い", "ち"]),
            ("ウ", ["す", "く", "ぐ", "む", "ぶ", "ぬ", "る", "う", "つ"]),
            ("エ", ["せ", "け", "げ", "め", "べ", "ね", "れ", "え", "て"]),
            ("オ", ["そ", "こ", "ご", "も", "ぼ", "の", "ろ", "お", "と"]),
        ])
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(p, _)| p.as_str())
    }

    fn row(&self, placeholder_idx: usize) -> &[String; ROW_COUNT] {
        &self.rows[placeholder_idx].1
    }

    /// Locate the single placeholder in `suffix`.
    ///
    /// Returns `(byte offset, placeholder index)`, `None` when there is none,
    /// or an error when more than one occurrence exists.
    fn locate(&self, suffix: &str, side: SuffixSide, line: &str) -> Result<Option<(usize, usize)>, RuleError> {
        let mut found: Option<(usize, usize)> = None;
        for (idx, (placeholder, _)) in self.rows.iter().enumerate() {
            for (offset, _) in suffix.match_indices(placeholder.as_str()) {
                if found.is_some() {
                    return Err(RuleError::RepeatedPhonologyPlaceholder { line: line.to_string(), side });
                }
                found = Some((offset, idx));
            }
        }
        Ok(found)
    }

    /// Expand `rule` into its concrete variants.
    ///
    /// - no placeholder on either side: the rule itself
    /// - one placeholder on each side: [`ROW_COUNT`] rules
    /// - a placeholder on one side only, or several on one side: error
    pub fn expand(&self, rule: Rule, line: &str) -> Result<Vec<Rule>, RuleError> {
        let source = self.locate(&rule.source_suffix, SuffixSide::Source, line)?;
        let target = self.locate(&rule.target_suffix, SuffixSide::Target, line)?;

        match (source, target) {
            (None, None) => Ok(vec![rule]),
            (Some((src_at, src_idx)), Some((tgt_at, tgt_idx))) => {
                let src_len = self.rows[src_idx].0.len();
                let tgt_len = self.rows[tgt_idx].0.len();
                let expanded = (0..ROW_COUNT)
                    .map(|row| {
                        let mut variant = rule.clone();
                        variant.source_suffix.replace_range(src_at..src_at + src_len, &self.row(src_idx)[row]);
                        variant.target_suffix.replace_range(tgt_at..tgt_at + tgt_len, &self.row(tgt_idx)[row]);
                        variant.origin.row = Some(row);
                        variant
                    })
                    .collect();
                Ok(expanded)
            }
            _ => Err(RuleError::UnbalancedPhonologyPlaceholder { line: line.to_string() }),
        }
    }
}

impl Default for SoundTable {
    fn default() -> Self {
        SoundTable::gojuon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::rule::parse_line;

    fn parsed(line: &str) -> Rule {
        parse_line(line).unwrap()
    }

    #[test]
    fn gojuon_has_five_placeholders() {
        let table = SoundTable::gojuon();
        assert_eq!(table.placeholders().collect::<Vec<_>>(), vec!["ア", "イ", "ウ", "エ", "オ"]);
    }

    #[test]
    fn no_placeholder_yields_the_rule_itself() {
        let line = "past 〜た for plain 〜る v1*";
        let rules = SoundTable::gojuon().expand(parsed(line), line).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].source_suffix, "た");
        assert_eq!(rules[0].origin.row, None);
    }

    #[test]
    fn one_placeholder_per_side_yields_nine_rows() {
        let line = "polite 〜イます for plain 〜ウ v5*";
        let rules = SoundTable::gojuon().expand(parsed(line), line).unwrap();
        assert_eq!(rules.len(), ROW_COUNT);

        let pairs: Vec<(&str, &str)> =
            rules.iter().map(|r| (r.source_suffix.as_str(), r.target_suffix.as_str())).collect();
        assert_eq!(pairs[0], ("します", "す"));
        assert_eq!(pairs[1], ("きます", "く"));
        assert_eq!(pairs[7], ("います", "う"));
        assert_eq!(pairs[8], ("ちます", "つ"));

        for (i, rule) in rules.iter().enumerate() {
            assert_eq!(rule.name, "polite");
            assert_eq!(rule.target_role, "plain");
            assert_eq!(rule.result_pos.as_str(), "@(v5*)");
            assert_eq!(rule.origin.row, Some(i));
        }
    }

    #[test]
    fn placeholder_in_middle_of_suffix() {
        let line = "volitional 〜オう for plain 〜ウ v5*";
        let rules = SoundTable::gojuon().expand(parsed(line), line).unwrap();
        assert_eq!(rules[1].source_suffix, "こう");
        assert_eq!(rules[1].target_suffix, "く");
    }

    #[test]
    fn placeholder_on_one_side_is_rejected() {
        let line = "broken 〜アない for plain 〜る v5*";
        let err = SoundTable::gojuon().expand(parsed(line), line).unwrap_err();
        assert_eq!(err, RuleError::UnbalancedPhonologyPlaceholder { line: line.to_string() });

        let line = "broken 〜ない for plain 〜ウ v5*";
        assert!(matches!(
            SoundTable::gojuon().expand(parsed(line), line),
            Err(RuleError::UnbalancedPhonologyPlaceholder { .. })
        ));
    }

    #[test]
    fn repeated_placeholder_is_rejected() {
        let line = "broken 〜アア for plain 〜ウ v5*";
        let err = SoundTable::gojuon().expand(parsed(line), line).unwrap_err();
        assert_eq!(err, RuleError::RepeatedPhonologyPlaceholder { line: line.to_string(), side: SuffixSide::Source });

        let line = "broken 〜ア for plain 〜ウエ v5*";
        assert!(matches!(
            SoundTable::gojuon().expand(parsed(line), line),
            Err(RuleError::RepeatedPhonologyPlaceholder { side: SuffixSide::Target, .. })
        ));
    }

    #[test]
    fn custom_table_is_used() {
        let table = SoundTable::new([("V", ["a", "b", "c", "d", "e", "f", "g", "h", "i"])]);
        let line = "x 〜V for y 〜zV n";
        let rules = table.expand(parsed(line), line).unwrap();
        assert_eq!(rules.len(), ROW_COUNT);
        assert_eq!(rules[2].source_suffix, "c");
        assert_eq!(rules[2].target_suffix, "zc");
    }
}
