//! Nodes: a lexical entry wrapped in parse context, and flat-node
//! expansion.

use senselink_lexicon::{FlagMap, LexicalData};

/// A lexical entry wrapped in the context of one parse.
///
/// Immutable for the lifetime of the parse that created it (core spec §3).
/// Equality is `(id, locale)`, matching the spec's invariant that a node's
/// identity is a pure function of its case-folded symbol.
#[derive(Debug, Clone)]
pub struct Node {
    data: LexicalData,
    /// The raw token text this node was resolved from, e.g. `"We"` even
    /// though `data.symbol()` may have been canonicalized by the store.
    original_token: String,
}

impl Node {
    /// Wraps a lexical entry, recording the original token text it was
    /// resolved from.
    pub fn new(data: LexicalData, original_token: impl Into<String>) -> Self {
        Self { data, original_token: original_token.into() }
    }

    /// The wrapped lexical entry.
    pub fn data(&self) -> &LexicalData {
        &self.data
    }

    /// The raw token text this node was resolved from.
    pub fn original_token(&self) -> &str {
        &self.original_token
    }

    /// The node's id, delegating to the wrapped entry.
    pub fn id(&self) -> &str {
        self.data.id()
    }

    /// The node's locale, delegating to the wrapped entry.
    pub fn locale(&self) -> &str {
        self.data.locale()
    }

    /// The node's display symbol, delegating to the wrapped entry.
    pub fn symbol(&self) -> &str {
        self.data.symbol()
    }

    /// `true` when this node's flag map has exactly one entry (the
    /// `FlatNode` invariant, §3).
    pub fn is_flat(&self) -> bool {
        self.data.is_flat()
    }

    /// Expands this node into one flat node per flag, preserving insertion
    /// order. Each flat node shares this node's id, locale, symbol, and
    /// original token, but carries only one `(concept_id, type_code)` pair.
    ///
    /// # Panics
    ///
    /// Asserts (does not silently absorb) if this node's flag map is empty
    /// — an empty expansion row is a `NodeResolver`/`LexicalStore`
    /// programmer-error condition per core spec §4.4.
    pub fn expand(&self) -> Vec<Node> {
        assert!(
            !self.data.flags().is_empty(),
            "node '{}' ({}) has an empty flag map; expansion requires at least one flag",
            self.symbol(),
            self.id()
        );
        self.data
            .flags()
            .iter()
            .map(|(concept_id, type_code)| {
                let mut flags = FlagMap::new();
                flags.insert(concept_id.clone(), type_code.clone());
                let flat = LexicalData::new(self.data.id(), self.data.locale(), self.data.symbol(), flags);
                Node::new(flat, self.original_token.clone())
            })
            .collect()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.locale() == other.locale()
    }
}

impl Eq for Node {}

impl Node {
    /// The type code of this node's first flag (in insertion order), i.e.
    /// its primary grammatical sense. `None` only for a node with an empty
    /// flag map, which `expand`'s assertion rules out for any node that has
    /// already been through path expansion.
    pub fn first_type(&self) -> Option<&str> {
        self.data.first_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(pairs: &[(&str, &str)]) -> FlagMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn expand_produces_one_flat_node_per_flag_in_order() {
        let data = LexicalData::new("1", "en", "We", flags(&[("1", "Pp"), ("2", "Pn"), ("3", "Pa")]));
        let node = Node::new(data, "We");
        let flat = node.expand();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].first_type(), Some("Pp"));
        assert_eq!(flat[1].first_type(), Some("Pn"));
        assert_eq!(flat[2].first_type(), Some("Pa"));
        assert!(flat.iter().all(Node::is_flat));
    }

    #[test]
    fn expand_preserves_original_token_and_identity() {
        let data = LexicalData::new("1", "en", "We", flags(&[("1", "Pp"), ("2", "Pn")]));
        let node = Node::new(data, "we");
        let flat = node.expand();
        for f in &flat {
            assert_eq!(f.original_token(), "we");
            assert_eq!(f.id(), node.id());
            assert_eq!(f.locale(), node.locale());
        }
    }

    #[test]
    #[should_panic(expected = "empty flag map")]
    fn expand_asserts_on_empty_flag_map() {
        let data = LexicalData::new("1", "en", "huh", FlagMap::new());
        let node = Node::new(data, "huh");
        node.expand();
    }

    #[test]
    fn equality_is_id_and_locale() {
        let a = Node::new(LexicalData::new("1", "en", "We", flags(&[("1", "Pp")])), "We");
        let b = Node::new(LexicalData::new("1", "en", "different-symbol", flags(&[("9", "Zz")])), "w");
        assert_eq!(a, b);
        let c = Node::new(LexicalData::new("1", "it", "We", flags(&[("1", "Pp")])), "We");
        assert_ne!(a, c);
    }

    #[test]
    fn single_flag_node_is_flat() {
        let data = LexicalData::new("1", "en", "boys", flags(&[("20", "Nc")]));
        let node = Node::new(data, "boys");
        assert!(node.is_flat());
    }
}
