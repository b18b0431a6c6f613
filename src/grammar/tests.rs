use super::{Grammar, PosGlob, ROW_COUNT, Rule, parse_rule};
use crate::Triple;
use crate::error::{ApplyError, GrammarError, RuleError};
use proptest::prelude::*;

fn rule(line: &str) -> Rule {
    parse_rule(line).unwrap().remove(0)
}

fn triple(form: &str, glob: &str, role: &str) -> Triple {
    Triple::new(form, PosGlob::new(glob).unwrap(), role)
}

#[test]
fn parses_all_fields() {
    let r = rule("continuous plain 〜いる v1 for て-form 〜 v[15]* vk vs-*");
    assert_eq!(r.name, "continuous");
    assert_eq!(r.trigger_role.as_deref(), Some("plain"));
    assert_eq!(r.source_suffix, "いる");
    assert_eq!(r.pos_gate.as_deref(), Some("v1"));
    assert_eq!(r.target_role, "て-form");
    assert_eq!(r.target_suffix, "");
    assert_eq!(r.result_pos.as_str(), "@(v[15]*|vk|vs-*)");
}

#[test]
fn optional_fields_may_be_omitted() {
    let cases: Vec<(&str, Option<&str>, Option<&str>)> = vec![
        ("て-form 〜て for past 〜た v[15]* vk vs-*", None, None),
        ("colloquial plain 〜る for continuous 〜いる v1", Some("plain"), None),
        ("negative 〜ない adj-i for plain 〜る v1", None, Some("adj-i")),
        ("past 〜かった for negative 〜い *", None, None),
    ];
    for (line, role, gate) in cases {
        let r = rule(line);
        assert_eq!(r.trigger_role.as_deref(), role, "role of `{line}`");
        assert_eq!(r.pos_gate.as_deref(), gate, "gate of `{line}`");
    }
}

#[test]
fn tabs_separate_result_tags() {
    let r = rule("past 〜た for plain 〜る v1\tvk");
    assert_eq!(r.result_pos.as_str(), "@(v1|vk)");
}

#[test]
fn malformed_lines_are_rejected() {
    let lines = [
        "past 〜た plain 〜る v1",
        "past た for plain 〜る v1",
        "past 〜た for plain 〜る",
        "past",
        "〜た for plain 〜る v1",
    ];
    for line in lines {
        assert_eq!(
            parse_rule(line).unwrap_err(),
            RuleError::MalformedRule { line: line.to_string() },
            "`{line}` should not parse"
        );
    }
}

#[test]
fn placeholder_rules_expand_through_parse() {
    assert_eq!(parse_rule("polite 〜イます for plain 〜ウ v5*").unwrap().len(), ROW_COUNT);
    assert_eq!(parse_rule("past 〜た for plain 〜る v1").unwrap().len(), 1);
    assert!(matches!(
        parse_rule("negative 〜アない for plain 〜る v5*"),
        Err(RuleError::UnbalancedPhonologyPlaceholder { .. })
    ));
}

#[test]
fn apply_to_form_rewrites_suffix() {
    let te = rule("て-form 〜て for past 〜た v[15]* vk vs-*");
    assert_eq!(te.apply_to_form("書いて").unwrap(), "書いた");

    let cont = rule("continuous plain 〜いる v1 for て-form 〜 v[15]* vk vs-*");
    assert_eq!(cont.apply_to_form("書いている").unwrap(), "書いて");

    assert_eq!(
        cont.apply_to_form("書いて").unwrap_err(),
        ApplyError::PreconditionViolated { rule: "continuous".to_string(), form: "書いて".to_string() }
    );

    let past = rule("past 〜た for plain 〜る v1*");
    assert!(past.apply_to_form("良くない").is_err());
}

#[test]
fn apply_requires_suffix_at_end() {
    // `る` occurs in the form, but not at the end.
    let r = rule("plain 〜る for stem 〜 v1");
    assert!(r.apply_to_form("るい").is_err());
    assert_eq!(r.apply_to_form("いる").unwrap(), "い");
}

#[test]
fn is_applicable_checks_role_suffix_and_gate() {
    let colloquial = rule("colloquial plain 〜る for continuous 〜いる v1");
    assert!(colloquial.is_applicable(&triple("書いてる", "@(v1*)", "plain")));

    let cont = rule("continuous plain 〜いる v1 for て-form 〜 v[15]* vk vs-*");
    assert!(cont.is_applicable(&triple("書いている", "@(v1)", "continuous")));
    assert!(!cont.is_applicable(&triple("書いた", "@(v[15]*|vk|vs-*)", "past")));

    let past = rule("past 〜た for plain 〜る v1*");
    assert!(!past.is_applicable(&triple("良くない", "@(adj-i)", "plain")));
}

#[test]
fn is_applicable_to_initial_triple() {
    let past = rule("past 〜た for plain 〜る v1*");
    assert!(past.is_applicable(&Triple::initial("書いてた")));

    let past_negative = rule("past 〜かった for negative 〜い *");
    assert!(past_negative.is_applicable(&Triple::initial("良くなかった")));
}

#[test]
fn trigger_role_does_not_fall_back_on_mismatch() {
    // Without a trigger role the rule fires on its own name.
    let named = rule("past 〜た for plain 〜る v1");
    assert!(named.is_applicable(&triple("食べた", "*", "past")));
    assert!(!named.is_applicable(&triple("食べた", "*", "plain")));

    // With one it fires on that role, and on its own name.
    let triggered = rule("continuous plain 〜いる for て-form 〜 v1");
    assert!(triggered.is_applicable(&triple("書いている", "*", "plain")));
    assert!(triggered.is_applicable(&triple("書いている", "*", "continuous")));
    assert!(!triggered.is_applicable(&triple("書いている", "*", "polite")));
}

#[test]
fn pos_gate_is_tested_against_triple_glob() {
    let gated = rule("negative plain 〜ない adj-i for plain 〜る v1");
    assert!(gated.is_applicable(&triple("食べない", "*", "")));
    assert!(gated.is_applicable(&triple("食べない", "@(adj-i)", "plain")));
    assert!(!gated.is_applicable(&triple("食べない", "@(v1)", "plain")));
}

#[test]
fn apply_produces_new_triple() {
    let colloquial = rule("colloquial plain 〜る for continuous 〜いる v1");
    assert_eq!(
        colloquial.apply(&triple("書いてる", "@(v1*)", "plain")).unwrap(),
        triple("書いている", "@(v1)", "continuous")
    );

    let past = rule("past 〜かった for plain 〜い adj-i");
    assert_eq!(past.apply(&triple("良くなかった", "*", "")).unwrap(), triple("良くない", "@(adj-i)", "plain"));
}

#[test]
fn grammar_skips_comments_and_blank_lines() {
    let text = "# header\n\n   \npast 〜た for plain 〜る v1\n  # indented comment\npolite 〜イます for plain 〜ウ v5*\n";
    let grammar = Grammar::parse(text).unwrap();
    assert_eq!(grammar.len(), 1 + ROW_COUNT);
    assert_eq!(grammar.rules()[0].origin.line_no, 4);
    assert!(grammar.rules()[1..].iter().all(|r| r.origin.line_no == 6));
}

#[test]
fn grammar_reports_failing_line() {
    let text = "past 〜た for plain 〜る v1\nthis is not a rule\n";
    match Grammar::parse(text) {
        Err(GrammarError::Rule { line_no, source: RuleError::MalformedRule { line } }) => {
            assert_eq!(line_no, 2);
            assert_eq!(line, "this is not a rule");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn grammar_from_path_reads_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "past 〜た for plain 〜る v1").unwrap();
    let grammar = Grammar::from_path(file.path()).unwrap();
    assert_eq!(grammar.len(), 1);

    let missing = file.path().with_extension("missing");
    assert!(matches!(Grammar::from_path(&missing), Err(GrammarError::Io { .. })));
}

#[test]
fn embedded_grammar_loads() {
    let grammar = Grammar::embedded().unwrap();
    assert!(grammar.len() > 100, "expected expanded rules, got {}", grammar.len());
    assert!(grammar.rules().iter().any(|r| r.name == "continuous" && r.trigger_role.as_deref() == Some("plain")));
    assert!(grammar.rules().iter().any(|r| r.source_suffix == "きます" && r.target_suffix == "く"));
}

proptest! {
    #[test]
    fn apply_replaces_exactly_the_suffix(
        stem in "[あ-ん]{0,6}",
        source in "[あ-ん]{0,3}",
        target in "[あ-ん]{0,3}",
    ) {
        let r = rule(&format!("r 〜{source} for t 〜{target} v1"));
        let form = format!("{stem}{source}");
        let out = r.apply_to_form(&form).unwrap();
        prop_assert!(out.ends_with(target.as_str()));
        prop_assert_eq!(out.chars().count(), form.chars().count() - source.chars().count() + target.chars().count());
    }
}
