//! NodeResolver: turns tokens into nodes, consulting the `LexicalStore` and
//! falling back to pseudo-nodes for unknown symbols (core spec §4.2).

use senselink_lexicon::{hash_id, LexicalStore};

use crate::event::EventSink;
use crate::node::Node;
use crate::token::Token;

/// Resolves each token's core symbol against `store`, wrapping the result
/// in a [`Node`]. Unknown symbols become pseudo-nodes and fire
/// [`EventSink::on_pseudo_node`] so a collaborator may enrich the store
/// before the parse continues (core spec §4.2 steps 4-5).
///
/// Tokens with an empty core (pure-punctuation tokens, e.g. the `'` split
/// out of `"m'appelle"`) are still resolved — the store is free to treat
/// them as any other symbol, most naturally an unknown one.
pub fn resolve(tokens: &[Token], locale: &str, store: &dyn LexicalStore, sink: &dyn EventSink) -> Vec<Node> {
    tokens
        .iter()
        .map(|token| resolve_one(token, locale, store, sink))
        .collect()
}

fn resolve_one(token: &Token, locale: &str, store: &dyn LexicalStore, sink: &dyn EventSink) -> Node {
    let id = hash_id(&token.core.to_lowercase());
    let data = if store.exists(locale, &id) {
        store.read(locale, &id).expect("exists() returned true but read() returned None")
    } else {
        let data = store.pseudo(locale, &token.core);
        let node = Node::new(data.clone(), token.core.clone());
        sink.on_pseudo_node(&node);
        data
    };
    Node::new(data, token.core.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{NullEventSink, RecordingEventSink};
    use indexmap::IndexMap;
    use senselink_lexicon::{InMemoryLexicalStore, LexicalData};

    #[test]
    fn resolves_a_known_symbol_to_its_stored_flags() {
        let store = InMemoryLexicalStore::new();
        let mut flags = IndexMap::new();
        flags.insert("20".to_string(), "Nc".to_string());
        store.seed(LexicalData::new(hash_id("boys"), "en", "boys", flags));

        let tokens = vec![Token::new("", "boys", "")];
        let nodes = resolve(&tokens, "en", &store, &NullEventSink);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].first_type(), Some("Nc"));
        assert_eq!(nodes[0].original_token(), "boys");
    }

    #[test]
    fn unknown_symbol_becomes_a_pseudo_node_and_fires_an_event() {
        let store = InMemoryLexicalStore::new();
        let sink = RecordingEventSink::new();
        let tokens = vec![Token::new("", "Libro", "")];
        let nodes = resolve(&tokens, "it", &store, &sink);

        assert_eq!(nodes.len(), 1);
        assert!(store.is_pseudo(nodes[0].data()));
        assert_eq!(nodes[0].id(), hash_id("libro"));
        assert_eq!(sink.events().pseudo_nodes.len(), 1);
        assert_eq!(sink.events().pseudo_nodes[0].2, hash_id("libro"));
    }

    #[test]
    fn a_pseudo_node_is_written_into_the_store_for_later_enrichment() {
        let store = InMemoryLexicalStore::new();
        let tokens = vec![Token::new("", "Libro", "")];
        resolve(&tokens, "it", &store, &NullEventSink);
        assert!(store.exists("it", &hash_id("libro")));
    }

    #[test]
    fn resolution_preserves_token_order() {
        let store = InMemoryLexicalStore::new();
        let tokens = vec![Token::new("", "We", ""), Token::new("", "are", ""), Token::new("", "boys", "")];
        let nodes = resolve(&tokens, "en", &store, &NullEventSink);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].original_token(), "We");
        assert_eq!(nodes[1].original_token(), "are");
        assert_eq!(nodes[2].original_token(), "boys");
    }
}
