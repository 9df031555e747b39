//! The top-level `Parser`: wires the tokenizer, node resolver, path
//! expander, and meaning reducer into the single-entry-point pipeline
//! described in core spec §4.6.

use std::sync::Arc;

use senselink_lexicon::LexicalStore;

use crate::config::ParserConfig;
use crate::error::{ExpansionTooLarge, ParseError};
use crate::event::{EventSink, NullEventSink};
use crate::expand::{expand, expected_path_count};
use crate::reduce::{dedup_meanings, Meaning, MeaningReducer};
use crate::resolver::resolve;
use crate::rule::{RuleRegistry, RuleSource};
use crate::tokenizer::{split_sentences, tokenize};

/// A deterministic `(text, locale) -> meaning sets` transformer (core spec
/// §1-§2).
///
/// Owns a `RuleRegistry` (itself backed by a `RuleSource`) and holds a
/// `LexicalStore` and an `EventSink` by reference for the lifetime of each
/// call, matching the spec's "rules and bindings are shared... nodes are
/// per-parse" resource model (§5).
pub struct Parser {
    registry: RuleRegistry,
    config: ParserConfig,
}

impl Parser {
    /// Builds a parser backed by `rule_source`, using `config`'s reduction
    /// depth and expected-path cap.
    pub fn new(rule_source: Arc<dyn RuleSource>, config: ParserConfig) -> Self {
        Self { registry: RuleRegistry::new(rule_source), config }
    }

    /// This parser's configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `text` in `locale` against `store`, reporting events through
    /// `sink`. Returns one meaning set per sentence, in order; a sentence
    /// with no successful reduction contributes an empty set, never a
    /// missing slot.
    ///
    /// `should_stop` is checked between expansion paths and between
    /// reduction passes, never mid-pass, so a cancelled parse never
    /// observes a partial link list (core spec §5). Pass `None` to disable
    /// cancellation.
    pub fn parse(
        &self,
        text: &str,
        locale: &str,
        store: &dyn LexicalStore,
        sink: &dyn EventSink,
        should_stop: Option<&dyn Fn() -> bool>,
    ) -> Result<Vec<Vec<Meaning>>, ParseError> {
        let mut results = Vec::new();
        for sentence in split_sentences(text) {
            results.push(self.process(sentence, locale, store, sink, should_stop)?);
        }
        Ok(results)
    }

    /// Parses `text` with a [`NullEventSink`] and no cancellation,
    /// convenience wrapper around [`Parser::parse`] for hosts that do not
    /// need observability.
    pub fn parse_simple(
        &self,
        text: &str,
        locale: &str,
        store: &dyn LexicalStore,
    ) -> Result<Vec<Vec<Meaning>>, ParseError> {
        self.parse(text, locale, store, &NullEventSink, None)
    }

    /// Runs the full pipeline over one already-split sentence: tokenize,
    /// resolve, expand, reduce each path, dedup.
    pub fn process(
        &self,
        sentence: &str,
        locale: &str,
        store: &dyn LexicalStore,
        sink: &dyn EventSink,
        should_stop: Option<&dyn Fn() -> bool>,
    ) -> Result<Vec<Meaning>, ParseError> {
        let tokens = tokenize(sentence, locale, store);
        let nodes = resolve(&tokens, locale, store, sink);

        if nodes.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(cap) = self.config.max_expected_paths {
            let expected = expected_path_count(&nodes);
            if expected > cap {
                return Err(ExpansionTooLarge { expected_paths: expected, cap }.into());
            }
        }

        let paths = expand(&nodes, sink);
        let reducer = MeaningReducer::new(&self.registry, self.config.max_reduction_depth);

        let mut meanings = Vec::new();
        for path in paths {
            if should_stop.map(|f| f()).unwrap_or(false) {
                break;
            }
            if let Some(meaning) = reducer.reduce(path, sink)? {
                meanings.push(meaning);
            }
        }

        Ok(dedup_meanings(meanings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{NullEventSink, RecordingEventSink};
    use crate::fixtures::FixtureRuleSource;
    use senselink_lexicon::runtime::{load_fixture, LexiconFixture};
    use senselink_lexicon::InMemoryLexicalStore;

    fn english_parser() -> (Parser, InMemoryLexicalStore) {
        let parser = Parser::new(Arc::new(FixtureRuleSource::with_builtin_fixtures()), ParserConfig::new("en"));
        let store = InMemoryLexicalStore::new();
        load_fixture(&store, &LexiconFixture::english());
        (parser, store)
    }

    #[test]
    fn s1_we_are_boys_expands_to_eight_paths_and_reduces() {
        let (parser, store) = english_parser();
        let sink = RecordingEventSink::new();
        let result = parser.parse("We are boys.", "en", &store, &sink, None).unwrap();
        assert_eq!(result.len(), 1);
        let meanings = &result[0];
        assert!(!meanings.is_empty());
        for meaning in meanings {
            let base = meaning.base();
            assert!(base.source().symbol() == "We" || base.source().symbol() == "are");
        }
    }

    #[test]
    fn s2_my_names_tom_binds_name_and_apostrophe_s_at_level_one() {
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

    #[test]
    fn s3_unknown_italian_symbol_fires_one_pseudo_event_and_yields_no_meaning() {
        let store = InMemoryLexicalStore::new();
        load_fixture(&store, &LexiconFixture::italian());
        let parser = Parser::new(Arc::new(FixtureRuleSource::with_builtin_fixtures()), ParserConfig::new("it"));
        let sink = RecordingEventSink::new();
        let result = parser.parse("Libro", "it", &store, &sink, None).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].is_empty());
        let events = sink.events();
        assert_eq!(events.pseudo_nodes.len(), 1);
        assert_eq!(events.pseudo_nodes[0].1, "Libro");
    }

    #[test]
    fn s4_empty_input_returns_empty_result_and_emits_no_events() {
        let (parser, store) = english_parser();
        let sink = RecordingEventSink::new();
        let result = parser.parse("", "en", &store, &sink, None).unwrap();
        assert!(result.is_empty());
        let events = sink.events();
        assert!(events.pseudo_nodes.is_empty());
        assert!(events.expansion_progress.is_empty());
    }

    #[test]
    fn s5_multi_sentence_input_parses_each_sentence_independently() {
        let (parser, store) = english_parser();
        let result = parser.parse_simple("Hi. Bye.", "en", &store).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result[0].is_empty());
        assert!(result[1].is_empty());
    }

    #[test]
    fn expansion_too_large_is_rejected_before_expansion() {
        let (_, store) = english_parser();
        let parser =
            Parser::new(Arc::new(FixtureRuleSource::with_builtin_fixtures()), ParserConfig::new("en").with_max_expected_paths(2));
        let err = parser.parse("We are boys.", "en", &store, &NullEventSink, None).unwrap_err();
        assert!(matches!(err, ParseError::ExpansionTooLarge(_)));
    }

    #[test]
    fn cancellation_is_observed_between_paths() {
        let (parser, store) = english_parser();
        let should_stop: &dyn Fn() -> bool = &|| true;
        let result = parser.parse("We are boys.", "en", &store, &NullEventSink, Some(should_stop)).unwrap();
        // Cancelled before any path is reduced: no meanings, but no error.
        assert!(result[0].is_empty());
    }

    #[test]
    fn unrecognized_locale_surfaces_as_rule_source_error() {
        let store = InMemoryLexicalStore::new();
        let parser = Parser::new(Arc::new(FixtureRuleSource::with_builtin_fixtures()), ParserConfig::new("de"));
        let err = parser.parse("Hallo Welt", "de", &store, &NullEventSink, None).unwrap_err();
        assert!(matches!(err, ParseError::RuleSource(_)));
    }
}
