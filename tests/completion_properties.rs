//! Property-based tests for the completion engine
//!
//! Inputs come from two generators: arbitrary concatenations of language
//! fragments, and truncations of well-formed definitions over the built-in
//! catalog.

use std::collections::HashSet;

use pipeline_complete::{Catalog, CompletionEngine, Lookups, Parser};
use proptest::prelude::*;

fn engine() -> CompletionEngine {
    CompletionEngine::standard(Lookups::from_catalog(Catalog::builtin().unwrap()), false).unwrap()
}

/// Arbitrary text built from the tokens and names of the language
fn fragment_soup() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("http"),
        Just("fil"),
        Just("log"),
        Just("format"),
        Just("type"),
        Just("--"),
        Just("-"),
        Just("|"),
        Just("."),
        Just("="),
        Just(" "),
        Just("'x'"),
        Just("\"a b"),
        Just("@"),
    ];
    prop::collection::vec(fragment, 0..12).prop_map(|parts| parts.concat())
}

fn option_text() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just("port"),
            Just("format.type"),
            Just("format.encoding"),
            Just("server.ssl.enabled"),
            Just("expression"),
            Just("level"),
        ],
        prop_oneof![Just("8080"), Just("text"), Just("'a b'"), Just("INFO")],
    )
        .prop_map(|(name, value)| format!(" --{name}={value}"))
}

fn stage(names: &'static [&'static str]) -> impl Strategy<Value = String> {
    (
        prop::sample::select(names),
        prop::collection::vec(option_text(), 0..3),
    )
        .prop_map(|(name, options)| format!("{name}{}", options.concat()))
}

/// Every prefix of a well-formed definition
fn truncated_definition() -> impl Strategy<Value = String> {
    (
        stage(&["http", "time", "file"]),
        prop::collection::vec(stage(&["filter", "transform"]), 0..2),
        prop::option::of(stage(&["log", "file"])),
    )
        .prop_flat_map(|(source, processors, sink)| {
            let mut text = source;
            for processor in processors {
                text.push_str(" | ");
                text.push_str(&processor);
            }
            if let Some(sink) = sink {
                text.push_str(" | ");
                text.push_str(&sink);
            }
            let len = text.len();
            (Just(text), 0..=len)
        })
        .prop_map(|(text, cut)| text[..cut].to_string())
}

fn expected_prefix(input: &str) -> String {
    match Parser::parse(input) {
        Ok(_) => input.trim_end().to_string(),
        Err(fault) => fault.safe_prefix().to_string(),
    }
}

proptest! {
    #[test]
    fn prop_proposals_extend_safe_prefix(input in fragment_soup()) {
        let prefix = expected_prefix(&input);
        for proposal in engine().complete(&input, 0) {
            prop_assert!(
                proposal.text.starts_with(&prefix),
                "{:?} does not extend {:?}",
                proposal.text,
                prefix
            );
        }
    }

    #[test]
    fn prop_completion_is_idempotent_and_unique(input in fragment_soup()) {
        let engine = engine();
        let first = engine.complete(&input, 0);
        prop_assert_eq!(&first, &engine.complete(&input, 0));

        let unique: HashSet<&str> = first.iter().map(|p| p.text.as_str()).collect();
        prop_assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn prop_detail_level_caps_and_keeps_order(input in fragment_soup(), cap in 1usize..4) {
        let engine = engine();
        let all = engine.complete(&input, 0);
        let capped = engine.complete(&input, cap);
        prop_assert!(capped.len() <= cap);
        prop_assert_eq!(&all[..capped.len()], &capped[..]);
    }

    #[test]
    fn prop_truncated_definitions_make_progress(input in truncated_definition()) {
        let engine = engine();
        let prefix = expected_prefix(&input);
        let fault = Parser::parse(&input).err();

        for proposal in engine.complete(&input, 0) {
            prop_assert!(proposal.text.starts_with(&prefix));
            if proposal.text.ends_with(" |") || proposal.text.ends_with(" --") {
                prop_assert!(
                    Parser::parse_finished(&proposal.text).is_err(),
                    "{:?} was absorbed into a value",
                    proposal.text
                );
            }
            if let (Some(fault), Err(next)) = (&fault, Parser::parse(&proposal.text)) {
                prop_assert!(
                    !next.is_same_fault(fault),
                    "{:?} reproduces the fault of {:?}",
                    proposal.text,
                    input
                );
            }
        }
    }
}
