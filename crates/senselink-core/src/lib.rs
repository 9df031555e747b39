#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Natural-language-to-ontological-relationship-graph parsing core.
//!
//! A deterministic pipeline that turns free text, in a configurable locale,
//! into a set of link graphs ([`reduce::Meaning`]s) — one set per sentence.
//!
//! # Architecture
//!
//! The pipeline is a single left-to-right transformation:
//!
//! 1. [`tokenizer`] splits raw text into sentences, then each sentence into
//!    ordered prefix/core/suffix [`token::Token`]s, expanding registered
//!    contractions and elisions along the way.
//! 2. [`resolver`] looks up each token's core symbol against a
//!    `senselink_lexicon::LexicalStore`, wrapping the result in a
//!    [`node::Node`] and falling back to a pseudo-node for unknown symbols.
//! 3. [`expand`] unfolds each multi-sense node into one flat node per flag,
//!    then takes the cartesian product across positions — one expansion
//!    path per possible sense assignment.
//! 4. [`reduce`] runs the bounded-depth, multi-pass reducer over each path
//!    under a [`rule::RuleRegistry`], producing a [`reduce::Meaning`] per
//!    path that successfully reduces; [`reduce::dedup_meanings`] then
//!    collapses structural duplicates.
//!
//! [`parser::Parser`] wires all four stages behind a single `parse` entry
//! point. [`event::EventSink`] is the pipeline's entire observability
//! surface: there is no separate logging layer underneath it, and a host
//! that wants structured logs implements the trait over its own logging
//! crate (see `DESIGN.md`).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use senselink_core::config::ParserConfig;
//! use senselink_core::fixtures::FixtureRuleSource;
//! use senselink_core::parser::Parser;
//! use senselink_lexicon::runtime::{load_fixture, LexiconFixture};
//! use senselink_lexicon::InMemoryLexicalStore;
//!
//! let store = InMemoryLexicalStore::new();
//! load_fixture(&store, &LexiconFixture::english());
//!
//! let parser = Parser::new(Arc::new(FixtureRuleSource::with_builtin_fixtures()), ParserConfig::new("en"));
//! let meanings = parser.parse_simple("We are boys.", "en", &store).unwrap();
//! assert_eq!(meanings.len(), 1);
//! assert!(!meanings[0].is_empty());
//! ```

/// The prefix/core/suffix token shape shared by the tokenizer and resolver.
pub mod token;

/// Splits raw text into sentences and tokens.
pub mod tokenizer;

/// A lexical entry wrapped in parse context, and flat-node expansion.
pub mod node;

/// Resolves tokens into nodes against a `LexicalStore`, with pseudo-node
/// fallback.
pub mod resolver;

/// The rule and binding engine: scoring, binding selection, and the
/// locale-keyed rule registry.
pub mod rule;

/// Path expansion: the combinatorial unfolding of a node list into every
/// sense-assignment path.
pub mod expand;

/// Meaning formation: the multi-pass recursive reducer.
pub mod reduce;

/// The event-sink observability surface.
pub mod event;

/// Parser configuration.
pub mod config;

/// Parse-level error kinds.
pub mod error;

/// Fixture-backed `RuleSource` loading embedded JSON grammars.
pub mod fixtures;

/// The top-level `Parser`.
pub mod parser;

pub use config::ParserConfig;
pub use error::{ExpansionTooLarge, ParseError, RuleSourceError, TokenizeError};
pub use event::{EventSink, NullEventSink, RecordedEvents, RecordingEventSink};
pub use node::Node;
pub use parser::Parser;
pub use reduce::{dedup_meanings, Link, Meaning, MeaningReducer};
pub use rule::{AttrBag, Binding, LinkAction, Rule, RuleRegistry, RuleSet, RuleSource};
pub use token::Token;
