//! The `LexicalStore` collaborator interface and an in-memory reference
//! implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::hash::hash_id;
use crate::types::{FlagMap, LexicalData, UNKNOWN_CONCEPT_ID, UNKNOWN_TYPE_CODE};

/// External collaborator that owns flag-mapping lookups, existence checks,
/// and contraction/elision expansion for the tokenizer, keyed by
/// `(locale, id)`.
///
/// The core treats this as opaque storage: how entries are populated, and
/// whether they are persisted to disk, is explicitly out of scope for this
/// crate (§1 non-goals). `senselink-core` only ever calls through this
/// trait.
pub trait LexicalStore: Send + Sync {
    /// Whether a `(locale, id)` entry exists without materializing it.
    fn exists(&self, locale: &str, id: &str) -> bool;

    /// Loads a `(locale, id)` entry, if present.
    fn read(&self, locale: &str, id: &str) -> Option<LexicalData>;

    /// Writes an entry, returning its canonicalized form. Implementations
    /// MAY rewrite `id`/`flags` to enforce store-wide invariants.
    fn write(&self, data: LexicalData) -> LexicalData;

    /// Builds and stores a pseudo-node for an unknown symbol: a single flag
    /// `{ "-1": "Bz" }` under the given locale.
    fn pseudo(&self, locale: &str, symbol: &str) -> LexicalData;

    /// Looks up a contraction/elision's "full suffix" expansion, e.g. the
    /// French `"'"` appended to `"m"` in `"m'appelle"`.
    fn obtain_full_suffix(&self, locale: &str, suffix: &str) -> Option<String>;

    /// Whether `data` is a pseudo-node (carries only the distinguished
    /// unknown flag).
    fn is_pseudo(&self, data: &LexicalData) -> bool {
        data.flags().len() == 1
            && data.flags().get(UNKNOWN_CONCEPT_ID).map(String::as_str) == Some(UNKNOWN_TYPE_CODE)
    }
}

#[derive(Default)]
struct Tables {
    entries: HashMap<(String, String), LexicalData>,
    full_suffixes: HashMap<(String, String), String>,
}

/// A reference `LexicalStore` backed by an in-process map, guarded by a
/// single `RwLock` (reads race-free, writes serialized — §5 of the core
/// spec, satisfied trivially because the lock covers the whole table rather
/// than per-key shards).
///
/// Intended for tests, fixtures, and small embedded locales; a production
/// host would implement `LexicalStore` against its own persistent cache
/// instead.
pub struct InMemoryLexicalStore {
    tables: RwLock<Tables>,
}

impl InMemoryLexicalStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { tables: RwLock::new(Tables::default()) }
    }

    /// Seeds the store with a full-suffix expansion entry, e.g.
    /// `("fr", "'appelle") -> "appelle"`.
    pub fn seed_full_suffix(&self, locale: &str, suffix: &str, expansion: &str) {
        let mut tables = self.tables.write().expect("lexical store lock poisoned");
        tables.full_suffixes.insert((locale.to_string(), suffix.to_string()), expansion.to_string());
    }

    /// Seeds the store with a fully-formed lexical entry, canonicalizing it
    /// the same way [`LexicalStore::write`] would.
    pub fn seed(&self, data: LexicalData) -> LexicalData {
        self.write(data)
    }
}

impl Default for InMemoryLexicalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalStore for InMemoryLexicalStore {
    fn exists(&self, locale: &str, id: &str) -> bool {
        let tables = self.tables.read().expect("lexical store lock poisoned");
        tables.entries.contains_key(&(locale.to_string(), id.to_string()))
    }

    fn read(&self, locale: &str, id: &str) -> Option<LexicalData> {
        let tables = self.tables.read().expect("lexical store lock poisoned");
        tables.entries.get(&(locale.to_string(), id.to_string())).cloned()
    }

    fn write(&self, data: LexicalData) -> LexicalData {
        let mut tables = self.tables.write().expect("lexical store lock poisoned");
        let key = (data.locale().to_string(), data.id().to_string());
        tables.entries.insert(key, data.clone());
        data
    }

    fn pseudo(&self, locale: &str, symbol: &str) -> LexicalData {
        let id = hash_id(&symbol.to_lowercase());
        let mut flags = FlagMap::new();
        flags.insert(UNKNOWN_CONCEPT_ID.to_string(), UNKNOWN_TYPE_CODE.to_string());
        let data = LexicalData::new(id, locale, symbol, flags);
        self.write(data)
    }

    fn obtain_full_suffix(&self, locale: &str, suffix: &str) -> Option<String> {
        let tables = self.tables.read().expect("lexical store lock poisoned");
        tables.full_suffixes.get(&(locale.to_string(), suffix.to_string())).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(pairs: &[(&str, &str)]) -> FlagMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn pseudo_assigns_the_unknown_flag() {
        let store = InMemoryLexicalStore::new();
        let data = store.pseudo("it", "Libro");
        assert_eq!(data.id(), hash_id("libro"));
        assert_eq!(data.symbol(), "Libro");
        assert!(store.is_pseudo(&data));
        assert_eq!(data.flags().get(UNKNOWN_CONCEPT_ID).map(String::as_str), Some(UNKNOWN_TYPE_CODE));
    }

    #[test]
    fn write_then_read_round_trips() {
        let store = InMemoryLexicalStore::new();
        let data = LexicalData::new("1", "en", "boys", flags(&[("12", "Nc")]));
        store.write(data.clone());
        assert!(store.exists("en", "1"));
        assert_eq!(store.read("en", "1"), Some(data));
    }

    #[test]
    fn missing_entry_is_absent() {
        let store = InMemoryLexicalStore::new();
        assert!(!store.exists("en", "nope"));
        assert_eq!(store.read("en", "nope"), None);
    }

    #[test]
    fn full_suffix_lookup() {
        let store = InMemoryLexicalStore::new();
        store.seed_full_suffix("fr", "'appelle", "appelle");
        assert_eq!(store.obtain_full_suffix("fr", "'appelle"), Some("appelle".to_string()));
        assert_eq!(store.obtain_full_suffix("fr", "'autre"), None);
    }

    #[test]
    fn a_written_entry_with_multiple_flags_is_not_pseudo() {
        let store = InMemoryLexicalStore::new();
        let data = LexicalData::new("1", "en", "boys", flags(&[("12", "Nc"), ("13", "Vi")]));
        let written = store.write(data);
        assert!(!store.is_pseudo(&written));
    }
}
