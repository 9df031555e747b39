//! Runtime JSON-based loading of locale lexicon fixtures.
//!
//! This module provides dynamic lexicon loading as an alternative to a real
//! on-disk grammar/lexicon format (explicitly out of scope for the core,
//! §6). Enable with the `dynamic-lexicon` feature.
//!
//! # JSON Format
//!
//! A fixture file is a single object with two arrays:
//!
//! - `entries`: lexical entries, each with `locale`, `symbol`, and an
//!   ordered `flags` array of `[concept_id, type_code]` pairs.
//! - `full_suffixes`: contraction/elision expansions, each with `locale`,
//!   `suffix`, and `expansion`.
//!
//! # Example
//!
//! ```
//! use senselink_lexicon::runtime::{LexiconFixture, load_fixture};
//! use senselink_lexicon::store::{LexicalStore, InMemoryLexicalStore};
//!
//! let fixture: LexiconFixture = serde_json::from_str(r#"{
//!     "entries": [
//!         {"locale": "en", "symbol": "boys", "flags": [["12", "Nc"]]}
//!     ],
//!     "full_suffixes": []
//! }"#).unwrap();
//!
//! let store = InMemoryLexicalStore::new();
//! load_fixture(&store, &fixture);
//! assert!(store.exists("en", &senselink_lexicon::hash::hash_id("boys")));
//! ```

use serde::Deserialize;

use crate::hash::hash_id;
use crate::store::InMemoryLexicalStore;
use crate::types::{FlagMap, LexicalData};

/// Embedded English fixture, a small locale sufficient to exercise the core
/// engine's end-to-end scenarios without an external grammar file.
pub const ENGLISH_FIXTURE_JSON: &str = include_str!("../assets/en.json");

/// Embedded Italian fixture, used for the unknown-symbol/pseudo-node
/// scenario (§8 scenario S3).
pub const ITALIAN_FIXTURE_JSON: &str = include_str!("../assets/it.json");

/// One lexical entry as deserialized from a fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEntry {
    /// Locale tag this entry belongs to.
    pub locale: String,
    /// Display form of the word.
    pub symbol: String,
    /// Ordered `(concept_id, type_code)` pairs.
    pub flags: Vec<(String, String)>,
}

/// One full-suffix expansion entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureFullSuffix {
    /// Locale tag this expansion belongs to.
    pub locale: String,
    /// The raw suffix as it appears attached to a token.
    pub suffix: String,
    /// Its expansion, emitted as a separate token by the tokenizer.
    pub expansion: String,
}

/// A deserialized locale lexicon fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconFixture {
    /// Lexical entries to seed into a store.
    #[serde(default)]
    pub entries: Vec<FixtureEntry>,
    /// Full-suffix expansions to seed into a store.
    #[serde(default)]
    pub full_suffixes: Vec<FixtureFullSuffix>,
}

impl LexiconFixture {
    /// Parses the embedded English fixture.
    pub fn english() -> Self {
        serde_json::from_str(ENGLISH_FIXTURE_JSON).expect("failed to parse embedded en.json fixture")
    }

    /// Parses the embedded Italian fixture.
    pub fn italian() -> Self {
        serde_json::from_str(ITALIAN_FIXTURE_JSON).expect("failed to parse embedded it.json fixture")
    }
}

/// Seeds `store` with every entry and full-suffix expansion in `fixture`.
///
/// Entry ids are assigned with [`hash_id`] over the case-folded symbol, the
/// same rule `NodeResolver` uses, so a fixture-loaded entry is found by a
/// parse exactly as if a live collaborator had written it moments earlier.
pub fn load_fixture(store: &InMemoryLexicalStore, fixture: &LexiconFixture) {
    for entry in &fixture.entries {
        let id = hash_id(&entry.symbol.to_lowercase());
        let flags: FlagMap = entry.flags.iter().cloned().collect();
        store.seed(LexicalData::new(id, entry.locale.clone(), entry.symbol.clone(), flags));
    }
    for suffix in &fixture.full_suffixes {
        store.seed_full_suffix(&suffix.locale, &suffix.suffix, &suffix.expansion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LexicalStore;

    #[test]
    fn english_fixture_parses_and_loads() {
        let fixture = LexiconFixture::english();
        assert!(!fixture.entries.is_empty());
        let store = InMemoryLexicalStore::new();
        load_fixture(&store, &fixture);
        assert!(store.exists("en", &hash_id("boys")));
    }

    #[test]
    fn italian_fixture_parses_and_loads() {
        let fixture = LexiconFixture::italian();
        let store = InMemoryLexicalStore::new();
        load_fixture(&store, &fixture);
        assert!(!fixture.entries.is_empty());
    }
}
