//! Observability: the small event-sink surface the core spec treats as the
//! entirety of its logging layer (§6, §9 Design Notes).
//!
//! Events are synchronous calls into a host-supplied handler. A handler may
//! enrich the `LexicalStore` from `on_pseudo_node` before control returns
//! to the parse (core spec §4.2 step 4, §5 "Scheduling model").

use crate::node::Node;
use crate::rule::Binding;

/// Observer for the pipeline's side effects. All methods have no-op
/// defaults so a host only needs to override what it cares about.
pub trait EventSink {
    /// An unknown symbol was resolved into a pseudo-node. `locale` and
    /// `symbol` identify what was looked up; `node` is the pseudo-node that
    /// was built.
    fn on_pseudo_node(&self, node: &Node) {
        let _ = node;
    }

    /// A binding's `can_bind` precondition held and it produced a link.
    fn on_binding_succeeded(&self, binding: &Binding, src: &Node, dst: &Node) {
        let _ = (binding, src, dst);
    }

    /// A binding's `can_bind` precondition failed to hold for this pair.
    /// Not currently emitted by the reducer (which only calls `bind` after
    /// a binding has already been selected via `can_bind > 0`), but kept on
    /// the trait for hosts that probe bindings directly.
    fn on_binding_failed(&self, binding: &Binding, src: &Node, dst: &Node) {
        let _ = (binding, src, dst);
    }

    /// Path-expansion progress, `0.0` on entry and `1.0` once every path has
    /// been produced.
    fn on_expansion_progress(&self, fraction: f64) {
        let _ = fraction;
    }

    /// Path expansion has produced every path for a sentence.
    fn on_expansion_finished(&self) {}

    /// One path's reduction reached termination (core spec §4.5's
    /// "nodes.size == 0" branch). Not emitted for paths that yield no
    /// meaning.
    fn on_reduction_finished(&self) {}
}

/// An `EventSink` that discards every event. The default for hosts that do
/// not need observability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {}

/// A diagnostic collector suitable for tests and interactive hosts: records
/// every event instead of acting on it.
#[derive(Default)]
pub struct RecordingEventSink {
    inner: std::sync::Mutex<RecordedEvents>,
}

/// The events recorded by a [`RecordingEventSink`], as plain data (no
/// borrowed references, so they outlive the parse that produced them).
#[derive(Debug, Clone, Default)]
pub struct RecordedEvents {
    /// `(locale, symbol, id)` for each pseudo-node discovered.
    pub pseudo_nodes: Vec<(String, String, String)>,
    /// `(src_symbol, dst_symbol)` for each successful bind.
    pub bindings_succeeded: Vec<(String, String)>,
    /// `(src_symbol, dst_symbol)` for each failed bind probe.
    pub bindings_failed: Vec<(String, String)>,
    /// Every expansion-progress fraction reported.
    pub expansion_progress: Vec<f64>,
    /// Count of `on_expansion_finished` calls.
    pub expansion_finished: usize,
    /// Count of `on_reduction_finished` calls.
    pub reductions_finished: usize,
}

impl RecordingEventSink {
    /// Builds an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots everything recorded so far.
    pub fn events(&self) -> RecordedEvents {
        self.inner.lock().expect("event sink lock poisoned").clone()
    }
}

impl EventSink for RecordingEventSink {
    fn on_pseudo_node(&self, node: &Node) {
        let mut events = self.inner.lock().expect("event sink lock poisoned");
        events.pseudo_nodes.push((node.locale().to_string(), node.symbol().to_string(), node.id().to_string()));
    }

    fn on_binding_succeeded(&self, _binding: &Binding, src: &Node, dst: &Node) {
        let mut events = self.inner.lock().expect("event sink lock poisoned");
        events.bindings_succeeded.push((src.symbol().to_string(), dst.symbol().to_string()));
    }

    fn on_binding_failed(&self, _binding: &Binding, src: &Node, dst: &Node) {
        let mut events = self.inner.lock().expect("event sink lock poisoned");
        events.bindings_failed.push((src.symbol().to_string(), dst.symbol().to_string()));
    }

    fn on_expansion_progress(&self, fraction: f64) {
        let mut events = self.inner.lock().expect("event sink lock poisoned");
        events.expansion_progress.push(fraction);
    }

    fn on_expansion_finished(&self) {
        let mut events = self.inner.lock().expect("event sink lock poisoned");
        events.expansion_finished += 1;
    }

    fn on_reduction_finished(&self) {
        let mut events = self.inner.lock().expect("event sink lock poisoned");
        events.reductions_finished += 1;
    }
}
