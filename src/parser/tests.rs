use std::collections::HashSet;

use super::resolve::{resolve, Resolution, ResolveContext};
use super::*;
use crate::config::{FormatFlags, Settings};
use crate::tag::TagBehavior;

struct Named(&'static str);

impl TagBehavior for Named {
    fn name(&self) -> &str {
        self.0
    }

    fn display_name(&self) -> &str {
        self.0
    }
}

struct Item;

impl TagBehavior for Item {
    fn name(&self) -> &str {
        "*"
    }

    fn display_name(&self) -> &str {
        "*"
    }

    fn auto_close_on_open(&self) -> Option<&str> {
        Some("*")
    }
}

struct List;

impl TagBehavior for List {
    fn name(&self) -> &str {
        "list"
    }

    fn display_name(&self) -> &str {
        "list"
    }

    fn auto_close_on_close(&self) -> Option<&str> {
        Some("*")
    }
}

fn registry() -> TagRegistry {
    let mut reg = TagRegistry::new();
    reg.insert(Box::new(Named("b")));
    reg.insert(Box::new(Named("i")));
    reg.insert(Box::new(Named("url")));
    reg.insert(Box::new(List));
    reg.insert(Box::new(Item));
    reg
}

fn classified<'a>(input: &'a str, reg: &TagRegistry) -> Vec<Token<'a>> {
    let ctx = ClassifyContext {
        registry: reg,
        allowed: None,
        start: "[",
        end: "]",
    };
    classify(split_delimited(input, "[", "]"), &ctx)
}

fn resolved<'a>(input: &'a str, reg: &TagRegistry, flags: FormatFlags) -> (Vec<Token<'a>>, Resolution) {
    let mut tokens = classified(input, reg);
    let settings = Settings::new();
    let outcome = resolve(
        &mut tokens,
        &ResolveContext {
            registry: reg,
            settings: &settings,
            flags,
        },
    );
    (tokens, outcome)
}

const BEST_EFFORT: FormatFlags = FormatFlags::ESCAPE_CONTENT;

#[test]
fn splits_text_and_tags() {
    let spans = split_delimited("a[b]c[/b]d", "[", "]");
    assert_eq!(
        spans,
        vec![
            RawSpan::Text("a"),
            RawSpan::Tag { span: "[b]", body: "b" },
            RawSpan::Text("c"),
            RawSpan::Tag { span: "[/b]", body: "/b" },
            RawSpan::Text("d"),
        ]
    );
}

#[test]
fn unmatched_start_delimiter_is_literal() {
    let spans = split_delimited("a[bc", "[", "]");
    assert_eq!(spans, vec![RawSpan::Text("a[bc")]);
}

#[test]
fn empty_bracket_body_is_literal() {
    let spans = split_delimited("[]x[]", "[", "]");
    assert_eq!(
        spans,
        vec![RawSpan::Text("[]"), RawSpan::Text("x"), RawSpan::Text("[]")]
    );
}

#[test]
fn multi_character_delimiters() {
    let spans = split_delimited("{{b}}x{{/b}}", "{{", "}}");
    assert_eq!(
        spans,
        vec![
            RawSpan::Tag { span: "{{b}}", body: "b" },
            RawSpan::Text("x"),
            RawSpan::Tag { span: "{{/b}}", body: "/b" },
        ]
    );
}

#[test]
fn argument_splits_on_the_first_equals() {
    let reg = registry();
    let tokens = classified("[url=http://x?a=b]t[/url]", &reg);
    assert!(tokens[0].is_open("url"));
    assert_eq!(tokens[0].argument.as_deref(), Some("http://x?a=b"));
    assert!(tokens[2].is_close("url"));
    assert_eq!(tokens[2].argument, None);
}

#[test]
fn classifier_statuses() {
    let reg = registry();
    let tokens = classified("[b][nosuch]", &reg);
    assert_eq!(tokens[0].status, TokenStatus::Undetermined);
    assert_eq!(tokens[1].status, TokenStatus::NoImplementation);

    let allowed: HashSet<String> = ["i".to_owned()].into();
    let ctx = ClassifyContext {
        registry: &reg,
        allowed: Some(&allowed),
        start: "[",
        end: "]",
    };
    let tokens = classify(split_delimited("[b][i]", "[", "]"), &ctx);
    assert_eq!(tokens[0].status, TokenStatus::NotAllowed);
    assert_eq!(tokens[1].status, TokenStatus::Undetermined);
}

#[test]
fn auto_close_is_synthesized_for_siblings_and_container_close() {
    let reg = registry();
    let tokens = classified("[list][*]a[*]b[/list]", &reg);
    let spans: Vec<&str> = tokens.iter().map(|t| t.span.as_ref()).collect();
    // One synthesized [/*] before the second [*] and one before [/list].
    assert_eq!(
        spans,
        vec!["[list]", "[*]", "a", "[/*]", "[*]", "b", "[/*]", "[/list]"]
    );
    assert_eq!(tokens[3].kind, TokenKind::TagClose);
    assert_eq!(tokens[3].status, TokenStatus::Undetermined);
}

#[test]
fn auto_close_skips_when_nothing_is_open() {
    let reg = registry();
    let tokens = classified("[*]a[/*]", &reg);
    let spans: Vec<&str> = tokens.iter().map(|t| t.span.as_ref()).collect();
    assert_eq!(spans, vec!["[*]", "a", "[/*]"]);
}

#[test]
fn strict_matching_links_a_proper_pair() {
    let reg = registry();
    let (tokens, outcome) = resolved("[b]x[/b]", &reg, FormatFlags::default());
    assert_eq!(outcome, Resolution::Completed);
    assert_eq!(tokens[0].status, TokenStatus::Valid);
    assert_eq!(tokens[0].matched, Some(2));
    assert_eq!(tokens[2].status, TokenStatus::Valid);
    assert_eq!(tokens[2].matched, Some(0));
}

#[test]
fn strict_matching_rejects_an_interleaved_close() {
    let reg = registry();
    let (tokens, _) = resolved("[b][i]x[/b][/i]", &reg, BEST_EFFORT);
    // [/b] targets the innermost open, which is [i]; the mismatch invalidates
    // the close and leaves [i] free to pair with [/i].
    assert_eq!(tokens[3].status, TokenStatus::Invalid);
    assert_eq!(tokens[1].status, TokenStatus::Valid);
    assert_eq!(tokens[1].matched, Some(4));
    // [b] never finds a close and fails the constraint sweep.
    assert_eq!(tokens[0].status, TokenStatus::Invalid);
}

#[test]
fn overlapping_matching_pairs_by_name() {
    let reg = registry();
    let flags = FormatFlags::ESCAPE_CONTENT | FormatFlags::HANDLE_OVERLAPPING;
    let (tokens, outcome) = resolved("[b][i]x[/b][/i]", &reg, flags);
    assert_eq!(outcome, Resolution::Completed);
    assert_eq!(tokens[0].matched, Some(3));
    assert_eq!(tokens[1].matched, Some(4));
    assert_eq!(tokens[3].matched, Some(0));
    assert_eq!(tokens[4].matched, Some(1));
}

#[test]
fn stray_close_aborts_all_or_nothing() {
    let reg = registry();
    let (_, outcome) = resolved("x[/b]", &reg, FormatFlags::default());
    assert_eq!(outcome, Resolution::Aborted);

    let (tokens, outcome) = resolved("x[/b]", &reg, BEST_EFFORT);
    assert_eq!(outcome, Resolution::Completed);
    assert_eq!(tokens[1].status, TokenStatus::Invalid);
}

#[test]
fn unclosed_open_aborts_all_or_nothing() {
    let reg = registry();
    let (_, outcome) = resolved("[b]x", &reg, FormatFlags::default());
    assert_eq!(outcome, Resolution::Aborted);

    let (tokens, outcome) = resolved("[b]x", &reg, BEST_EFFORT);
    assert_eq!(outcome, Resolution::Completed);
    assert_eq!(tokens[0].status, TokenStatus::Invalid);
}

#[test]
fn unexpected_argument_invalidates_the_pair() {
    let reg = registry();
    let (tokens, _) = resolved("[b=loud]x[/b]", &reg, BEST_EFFORT);
    assert_eq!(tokens[0].status, TokenStatus::Invalid);
    assert_eq!(tokens[2].status, TokenStatus::Invalid);
}

#[test]
fn enclosing_open_requires_a_matched_close_beyond() {
    let reg = registry();
    let (tokens, _) = resolved("[b]x[/b]y", &reg, FormatFlags::default());
    // "x" at index 1 is inside the pair, "y" at index 3 is not.
    assert_eq!(enclosing_valid_open(&tokens, 1), Some(0));
    assert_eq!(enclosing_valid_open(&tokens, 3), None);
}
