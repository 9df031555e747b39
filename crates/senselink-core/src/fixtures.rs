//! Fixture-backed `RuleSource`: loads a locale's grammar from embedded JSON
//! at runtime, the same "dynamic-lexicon" shape `senselink-lexicon::runtime`
//! uses for its own locale fixtures. The on-disk/XML format the core spec
//! names (§6) remains out of scope; this exists only so the workspace is
//! runnable and testable without a real grammar loader.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::RuleSourceError;
use crate::rule::{AttrBag, Binding, Rule, RuleSet, RuleSource};

/// Embedded English grammar fixture, sufficient to exercise the core
/// engine's S1/S2 end-to-end scenarios.
pub const ENGLISH_GRAMMAR_JSON: &str = include_str!("../assets/en_grammar.json");

/// Embedded Italian grammar fixture (empty — Italian is only exercised via
/// the unknown-symbol/pseudo-node scenario, S3, which never reaches the
/// rule engine).
pub const ITALIAN_GRAMMAR_JSON: &str = include_str!("../assets/it_grammar.json");

#[derive(Debug, Clone, Deserialize)]
struct FixtureBinding {
    #[serde(flatten)]
    attrs: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureRule {
    #[serde(rename = "type")]
    primary_type: String,
    #[serde(default)]
    bindings: Vec<FixtureBinding>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureGrammar {
    locale: String,
    #[serde(default)]
    rules: Vec<FixtureRule>,
}

/// A [`RuleSource`] backed by embedded JSON fixtures, one per locale.
///
/// Unrecognized locales fail with [`RuleSourceError`] rather than
/// returning an empty rule set — a caller asking for a locale this fixture
/// set does not know about is almost certainly a configuration mistake,
/// and should surface as a fatal-for-that-locale error per core spec §7.
pub struct FixtureRuleSource {
    grammars: HashMap<String, RuleSet>,
}

impl FixtureRuleSource {
    /// Builds an empty fixture source (every locale fails to load).
    pub fn new() -> Self {
        Self { grammars: HashMap::new() }
    }

    /// Parses and registers a grammar fixture from its JSON text.
    ///
    /// # Panics
    ///
    /// Panics if `json` does not parse — fixtures are compiled-in constants
    /// under this crate's control, so a parse failure here is a packaging
    /// bug, not a runtime condition a caller can recover from.
    pub fn with_grammar_json(mut self, json: &str) -> Self {
        let grammar: FixtureGrammar = serde_json::from_str(json).expect("failed to parse embedded grammar fixture");
        let rules = grammar
            .rules
            .into_iter()
            .map(|r| {
                let bindings = r.bindings.into_iter().map(|b| Binding::new(AttrBag::from_pairs(b.attrs))).collect();
                Rule::new(grammar.locale.clone(), r.primary_type, bindings)
            })
            .collect();
        self.grammars.insert(grammar.locale, rules);
        self
    }

    /// Builds the reference source with the embedded English and Italian
    /// grammar fixtures pre-registered.
    pub fn with_builtin_fixtures() -> Self {
        Self::new().with_grammar_json(ENGLISH_GRAMMAR_JSON).with_grammar_json(ITALIAN_GRAMMAR_JSON)
    }
}

impl Default for FixtureRuleSource {
    fn default() -> Self {
        Self::with_builtin_fixtures()
    }
}

impl RuleSource for FixtureRuleSource {
    fn load(&self, locale: &str) -> Result<RuleSet, RuleSourceError> {
        self.grammars
            .get(locale)
            .cloned()
            .ok_or_else(|| RuleSourceError::new(locale, "no grammar fixture registered for this locale"))
    }
}
