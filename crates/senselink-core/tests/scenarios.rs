//! End-to-end scenarios S1-S6, run through the full `Parser` pipeline
//! rather than against any single stage in isolation. Mirrors the teacher
//! workspace's separate integration-test crate, scaled down to one
//! `tests/` directory for this smaller workspace (see `DESIGN.md`).

use std::sync::Arc;

use indexmap::IndexMap;
use senselink_core::config::ParserConfig;
use senselink_core::event::{NullEventSink, RecordingEventSink};
use senselink_core::fixtures::FixtureRuleSource;
use senselink_core::parser::Parser;
use senselink_core::rule::{AttrBag, Binding, Rule, RuleSet, RuleSource};
use senselink_lexicon::runtime::{load_fixture, LexiconFixture};
use senselink_lexicon::{hash_id, InMemoryLexicalStore, LexicalData, LexicalStore};

fn english_parser() -> (Parser, InMemoryLexicalStore) {
    let parser = Parser::new(Arc::new(FixtureRuleSource::with_builtin_fixtures()), ParserConfig::new("en"));
    let store = InMemoryLexicalStore::new();
    load_fixture(&store, &LexiconFixture::english());
    (parser, store)
}

/// S1: "We are boys." expands to 8 paths (4 senses of "We" x 2 senses of
/// "are" x 1 sense of "boys") and every returned meaning's base link has a
/// source whose symbol is "We" or "are".
#[test]
fn s1_we_are_boys_expands_and_reduces_to_a_plausible_base() {
    let (parser, store) = english_parser();
    let result = parser.parse_simple("We are boys.", "en", &store).unwrap();
    assert_eq!(result.len(), 1);
    let meanings = &result[0];
    assert!(!meanings.is_empty());
    for meaning in meanings {
        let base = meaning.base();
        assert!(base.source().symbol() == "We" || base.source().symbol() == "are");
    }
}

/// S2: the tokenizer expands "name's" into separate `name`/`'s` tokens via
/// the registered full-suffix expansion, and the reducer binds them at
/// level 1.
#[test]
fn s2_my_names_tom_expands_the_contraction_and_binds_it_at_level_one() {
    let (parser, store) = english_parser();
    let result = parser.parse_simple("My name's Tom.", "en", &store).unwrap();
    assert_eq!(result.len(), 1);
    let meanings = &result[0];
    assert!(!meanings.is_empty());
    let has_name_apostrophe_s_bind = meanings.iter().any(|m| {
        m.siblings().iter().any(|l| l.level() == 1 && l.source().symbol() == "name" && l.dest().symbol() == "'s")
    });
    assert!(has_name_apostrophe_s_bind, "expected a level-1 bind between 'name' and ''s'");
}

/// S3: an unrecognized Italian symbol resolves to exactly one pseudo-node
/// (id = hash_id of the case-folded symbol, flags = {"-1": "Bz"}), and the
/// sentence contributes an empty meaning set rather than an error.
#[test]
fn s3_unknown_italian_symbol_yields_one_pseudo_node_and_an_empty_meaning_set() {
    let store = InMemoryLexicalStore::new();
    load_fixture(&store, &LexiconFixture::italian());
    let parser = Parser::new(Arc::new(FixtureRuleSource::with_builtin_fixtures()), ParserConfig::new("it"));
    let sink = RecordingEventSink::new();
    let result = parser.parse("Libro", "it", &store, &sink, None).unwrap();

    assert_eq!(result.len(), 1);
    assert!(result[0].is_empty());

    let events = sink.events();
    assert_eq!(events.pseudo_nodes.len(), 1);
    let (locale, symbol, id) = &events.pseudo_nodes[0];
    assert_eq!(locale, "it");
    assert_eq!(symbol, "Libro");
    assert_eq!(id, &hash_id("libro"));
}

/// S4: empty input returns an empty result and emits no events at all.
#[test]
fn s4_empty_input_returns_an_empty_result_with_no_events() {
    let (parser, store) = english_parser();
    let sink = RecordingEventSink::new();
    let result = parser.parse("", "en", &store, &sink, None).unwrap();
    assert!(result.is_empty());

    let events = sink.events();
    assert!(events.pseudo_nodes.is_empty());
    assert!(events.bindings_succeeded.is_empty());
    assert!(events.expansion_progress.is_empty());
    assert_eq!(events.expansion_finished, 0);
}

/// S5: multi-sentence input parses each sentence independently, producing
/// one meaning set per sentence, in order.
#[test]
fn s5_multi_sentence_input_parses_each_sentence_independently() {
    let (parser, store) = english_parser();
    let result = parser.parse_simple("Hi. Bye.", "en", &store).unwrap();
    assert_eq!(result.len(), 2);
    assert!(result[0].is_empty());
    assert!(result[1].is_empty());
}

struct SingleRuleSource(RuleSet);

impl RuleSource for SingleRuleSource {
    fn load(&self, _locale: &str) -> Result<RuleSet, senselink_core::error::RuleSourceError> {
        Ok(self.0.clone())
    }
}

fn flat(symbol: &str, concept_id: &str, type_code: &str) -> LexicalData {
    let mut flags = IndexMap::new();
    flags.insert(concept_id.to_string(), type_code.to_string());
    LexicalData::new(hash_id(&symbol.to_lowercase()), "en", symbol, flags)
}

/// S6: a binding with `linkAction="reverse"` swaps source/destination and
/// retypes the link from the *original* destination's first flag's first
/// character, exercised end-to-end rather than as a unit test on
/// `Binding::bind` directly.
#[test]
fn s6_reverse_link_action_swaps_source_and_retypes_from_original_destination() {
    let store = InMemoryLexicalStore::new();
    store.seed(flat("cats", "60", "Npl"));
    store.seed(flat("run", "61", "Vi"));

    let binding = Binding::new(AttrBag::from_pairs([("with", "Vi"), ("linkAction", "reverse")]));
    let rule = Rule::new("en", "N", vec![binding]);
    let source = SingleRuleSource(vec![rule]);

    let parser = Parser::new(Arc::new(source), ParserConfig::new("en"));
    let result = parser.parse_simple("cats run", "en", &store).unwrap();

    assert_eq!(result.len(), 1);
    let meanings = &result[0];
    assert_eq!(meanings.len(), 1);
    let link = meanings[0].base();
    assert_eq!(link.source().symbol(), "run");
    assert_eq!(link.dest().symbol(), "cats");
    assert_eq!(link.type_code(), "V");
}

/// Bonus coverage beyond S1-S6: an expansion that would exceed a
/// configured path cap fails fast, before any reduction work happens.
#[test]
fn expansion_too_large_is_rejected_before_any_reduction_runs() {
    let (_, store) = english_parser();
    let parser = Parser::new(
        Arc::new(FixtureRuleSource::with_builtin_fixtures()),
        ParserConfig::new("en").with_max_expected_paths(2),
    );
    let err = parser.parse("We are boys.", "en", &store, &NullEventSink, None).unwrap_err();
    assert!(matches!(err, senselink_core::error::ParseError::ExpansionTooLarge(_)));
}
