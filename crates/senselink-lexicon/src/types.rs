//! The lexical data model: flag maps and lexical entries.

use indexmap::IndexMap;

/// An ordered mapping from ontology-concept-id to type-code.
///
/// Iteration order is insertion order, which is load-bearing: §4.2/§4.3 of
/// the core spec define "the first flag" as `flags.first()`, and path
/// expansion (`senselink_core::expand`) must walk entries in the order the
/// lexical store produced them.
pub type FlagMap = IndexMap<String, String>;

/// One entry in the lexical store: a symbol's id, locale, display form, and
/// its ordered grammatical-sense flags.
///
/// `LexicalData` is immutable once obtained — the only way to produce one is
/// through a [`crate::store::LexicalStore`] (`read`, `write`, or `pseudo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalData {
    id: String,
    locale: String,
    symbol: String,
    flags: FlagMap,
}

impl LexicalData {
    /// Builds a lexical entry. Callers outside `senselink-lexicon` should
    /// prefer going through a `LexicalStore`, which is responsible for id
    /// assignment and canonicalization; this constructor exists for store
    /// implementations and tests.
    pub fn new(id: impl Into<String>, locale: impl Into<String>, symbol: impl Into<String>, flags: FlagMap) -> Self {
        Self { id: id.into(), locale: locale.into(), symbol: symbol.into(), flags }
    }

    /// The opaque, content-derived identifier (see [`crate::hash::hash_id`]).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// BCP-47-like locale tag this entry was loaded under.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The display form of the word as it appeared in the lexicon.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Ordered concept-id → type-code mapping.
    pub fn flags(&self) -> &FlagMap {
        &self.flags
    }

    /// The first flag's type code, i.e. the node's primary sense.
    ///
    /// Every `LexicalData` produced by a `LexicalStore` carries at least one
    /// flag (pseudo-nodes included); callers that need the primary type
    /// unconditionally may unwrap this without a panic risk in practice, but
    /// the API stays honest about the possibility of an empty map.
    pub fn first_type(&self) -> Option<&str> {
        self.flags.first().map(|(_, type_code)| type_code.as_str())
    }

    /// `true` when this entry carries exactly one flag.
    pub fn is_flat(&self) -> bool {
        self.flags.len() == 1
    }
}

/// The distinguished "unknown" flag concept id a pseudo-node is assigned.
pub const UNKNOWN_CONCEPT_ID: &str = "-1";

/// The distinguished "unknown" flag type code a pseudo-node is assigned.
pub const UNKNOWN_TYPE_CODE: &str = "Bz";
