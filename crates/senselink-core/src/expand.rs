//! PathExpander: unfolds a node list into every possible sense assignment
//! for the sentence (core spec §4.4).

use crate::event::EventSink;
use crate::node::Node;

/// Computes the cartesian product of every node's flat-node expansion.
///
/// Reports progress `0.0` on entry and `1.0` after expansion, and fires
/// [`EventSink::on_expansion_finished`] on completion.
///
/// # Panics
///
/// Asserts that no node expands to zero flat nodes — an empty expansion
/// row is an internal bug condition per core spec §4.4, not a recoverable
/// error, because every `Node` reaching this stage was either read from a
/// `LexicalStore` or built as a pseudo-node, both of which guarantee at
/// least one flag.
pub fn expand(nodes: &[Node], sink: &dyn EventSink) -> Vec<Vec<Node>> {
    sink.on_expansion_progress(0.0);

    let rows: Vec<Vec<Node>> = nodes
        .iter()
        .map(|n| {
            let flat = n.expand();
            assert!(!flat.is_empty(), "node '{}' expanded to zero flat nodes", n.symbol());
            flat
        })
        .collect();

    let paths = if rows.is_empty() { Vec::new() } else { cartesian_product(&rows) };

    sink.on_expansion_progress(1.0);
    sink.on_expansion_finished();
    paths
}

/// The expected path count (`∏ m(i)`) without materializing any path —
/// used by a host to cap runaway expansions before they are built
/// (`ExpansionTooLarge`, core spec §5, §7).
pub fn expected_path_count(nodes: &[Node]) -> usize {
    nodes.iter().map(|n| n.data().flags().len()).product()
}

fn cartesian_product(rows: &[Vec<Node>]) -> Vec<Vec<Node>> {
    let mut paths: Vec<Vec<Node>> = vec![Vec::with_capacity(rows.len())];
    for row in rows {
        let mut next = Vec::with_capacity(paths.len() * row.len());
        for path in &paths {
            for flat in row {
                let mut extended = path.clone();
                extended.push(flat.clone());
                next.push(extended);
            }
        }
        paths = next;
    }
    paths
}
