//! Meaning formation: the multi-pass recursive reducer that turns a
//! sense-assigned path into a link graph (core spec §4.5).

use crate::event::EventSink;
use crate::node::Node;
use crate::rule::RuleRegistry;

/// A directed edge between two nodes, produced by a [`crate::rule::Binding`]'s
/// bind step.
#[derive(Debug, Clone)]
pub struct Link {
    source: Node,
    dest: Node,
    type_code: String,
    locale: String,
    level: usize,
}

impl Link {
    /// Builds a link. `level` is normally assigned by the reducer, not the
    /// caller; it defaults to 0 here and is overwritten before the link is
    /// appended to a pass's output (core spec §4.5.1.d).
    pub fn new(
        source: Node,
        dest: Node,
        type_code: impl Into<String>,
        locale: impl Into<String>,
        level: usize,
    ) -> Self {
        Self { source, dest, type_code: type_code.into(), locale: locale.into(), level }
    }

    /// The link's source node.
    pub fn source(&self) -> &Node {
        &self.source
    }

    /// The link's destination node.
    pub fn dest(&self) -> &Node {
        &self.dest
    }

    /// The link's type code.
    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    /// The link's locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The reduction pass that produced this link (1-indexed).
    pub fn level(&self) -> usize {
        self.level
    }

    fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// A stable string key used for structural dedup of meanings — encodes
    /// every field `==` considers load-bearing for distinguishing one link
    /// from another.
    fn canonical_key(&self) -> String {
        format!(
            "{}:{}|{}:{}|{}|{}|{}",
            self.source.id(),
            self.source.first_type().unwrap_or(""),
            self.dest.id(),
            self.dest.first_type().unwrap_or(""),
            self.type_code,
            self.locale,
            self.level
        )
    }
}

/// The link list produced by a complete reduction of one expansion path.
#[derive(Debug, Clone)]
pub struct Meaning {
    links: Vec<Link>,
}

impl Meaning {
    fn new(links: Vec<Link>) -> Self {
        Self { links }
    }

    /// The last link appended — the root of this reduction (core spec §3).
    ///
    /// # Panics
    ///
    /// Panics if this meaning has no links, which cannot happen for a
    /// `Meaning` returned by [`MeaningReducer::reduce`] (it only ever
    /// returns `Some` when at least one link was produced).
    pub fn base(&self) -> &Link {
        self.links.last().expect("a Meaning always has at least one link")
    }

    /// Every link, in insertion (reduction) order.
    pub fn siblings(&self) -> &[Link] {
        &self.links
    }

    /// The subset of links produced at exactly `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is 0 or exceeds [`Meaning::levels`] (core spec
    /// §4.5's Meaning API).
    pub fn links_at(&self, level: usize) -> Vec<&Link> {
        let max = self.levels();
        assert!(level >= 1 && level <= max, "level {} out of range 1..={}", level, max);
        self.links.iter().filter(|l| l.level() == level).collect()
    }

    /// The maximum `level` across this meaning's links.
    pub fn levels(&self) -> usize {
        self.links.iter().map(Link::level).max().unwrap_or(0)
    }

    /// Links whose source is `n`.
    pub fn linked_to(&self, n: &Node) -> Vec<&Link> {
        self.links.iter().filter(|l| l.source() == n).collect()
    }

    /// Links whose destination is `n`.
    pub fn linked_by(&self, n: &Node) -> Vec<&Link> {
        self.links.iter().filter(|l| l.dest() == n).collect()
    }

    fn canonical_key(&self) -> String {
        self.links.iter().map(Link::canonical_key).collect::<Vec<_>>().join(";")
    }
}

/// Deduplicates a list of meanings by full structural link-list equality
/// (core spec §8 property 7 — a real dedup, not the reference's
/// consecutive-only `std::unique` artifact; see `DESIGN.md`).
pub fn dedup_meanings(meanings: Vec<Meaning>) -> Vec<Meaning> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(meanings.len());
    for meaning in meanings {
        if seen.insert(meaning.canonical_key()) {
            out.push(meaning);
        }
    }
    out
}

/// Per-pass reducer state that is explicitly threaded through one pass
/// rather than hoisted to a registry-level global (Design Note §9).
#[derive(Default)]
struct PassFlags {
    hide_other: bool,
    filter: Vec<String>,
}

/// The bounded-depth multi-pass reducer (core spec §4.5).
pub struct MeaningReducer<'a> {
    registry: &'a RuleRegistry,
    max_reduction_depth: usize,
}

impl<'a> MeaningReducer<'a> {
    /// Builds a reducer against `registry`, capping passes at
    /// `max_reduction_depth` (the spec's `MAX_LEVEL`, default 5).
    pub fn new(registry: &'a RuleRegistry, max_reduction_depth: usize) -> Self {
        Self { registry, max_reduction_depth }
    }

    /// Runs the full multi-pass reduction over one expansion path.
    ///
    /// Returns `Ok(None)` when a pass produces zero links (`NoMeaning`,
    /// recovered silently per core spec §7) or terminates via the depth
    /// cap without first exhausting the node list. Returns `Err` only when
    /// the `RuleRegistry` fails to load a locale.
    pub fn reduce(
        &self,
        path: Vec<Node>,
        sink: &dyn EventSink,
    ) -> Result<Option<Meaning>, crate::error::RuleSourceError> {
        let mut nodes = path;
        let mut links: Vec<Link> = Vec::new();
        let mut level = 1usize;

        loop {
            assert!(
                level <= self.max_reduction_depth,
                "reduction exceeded max_reduction_depth ({}); this is a reducer bug",
                self.max_reduction_depth
            );
            if nodes.len() < 2 {
                // Fewer than two surviving nodes: no pass can run. Per the
                // resolved Open Question (core spec §9 / DESIGN.md), this
                // only terminates successfully if links already exist and
                // the list is empty; a lone survivor yields no meaning.
                return Ok(None);
            }

            let (pass_links, next_nodes) = self.run_pass(&nodes, level, sink)?;
            if pass_links.is_empty() {
                return Ok(None);
            }
            links.extend(pass_links);

            if next_nodes.is_empty() {
                sink.on_reduction_finished();
                return Ok(Some(Meaning::new(links)));
            }
            nodes = next_nodes;
            level += 1;
        }
    }

    fn run_pass(
        &self,
        nodes: &[Node],
        level: usize,
        sink: &dyn EventSink,
    ) -> Result<(Vec<Link>, Vec<Node>), crate::error::RuleSourceError> {
        let l = nodes.len();
        let mut pass_links = Vec::new();
        let mut next_nodes = Vec::new();
        let mut flags = PassFlags::default();
        let mut cursor = 0usize;
        let mut last_index_touched = 0usize;

        if l == 2 {
            // Special case (core spec §4.5.1.a): unconditionally use
            // (nodes[0], nodes[1]); do not advance further.
            self.step(nodes, 0, level, &mut flags, &mut pass_links, &mut next_nodes, sink)?;
            last_index_touched = 1;
        } else {
            while cursor + 1 < l {
                let consumed_dst = self.step(nodes, cursor, level, &mut flags, &mut pass_links, &mut next_nodes, sink)?;
                last_index_touched = cursor + 1;
                cursor += if consumed_dst { 2 } else { 1 };
            }
        }

        // §4.5.2: if the cursor did not consume the last element and the
        // next-pass nodes list has length 1, carry the trailing element
        // over so it gets another chance to bind next pass.
        if last_index_touched < l - 1 && next_nodes.len() == 1 {
            next_nodes.push(nodes[l - 1].clone());
        }

        Ok((pass_links, next_nodes))
    }

    /// Processes one `(src, dst)` pair at `nodes[i], nodes[i + 1]`. Returns
    /// whether `dst` was consumed (i.e. whether the caller should advance
    /// the cursor by 2 rather than 1).
    #[allow(clippy::too_many_arguments)]
    fn step(
        &self,
        nodes: &[Node],
        i: usize,
        level: usize,
        flags: &mut PassFlags,
        pass_links: &mut Vec<Link>,
        next_nodes: &mut Vec<Node>,
        sink: &dyn EventSink,
    ) -> Result<bool, crate::error::RuleSourceError> {
        let src = &nodes[i];
        let dst = &nodes[i + 1];

        let hide_this = if !flags.filter.is_empty() {
            let type_code = src.first_type().unwrap_or_default();
            let still_matches = flags.filter.iter().any(|f| type_code.contains(f.as_str()));
            if !still_matches {
                flags.filter.clear();
            }
            still_matches
        } else {
            false
        };

        let obtained = self.registry.obtain_binding(src, dst)?;
        let (rule, binding_index) = match obtained {
            Some(pair) => pair,
            // No binding: emit nothing and advance by one (core spec
            // §4.5.1.c). Per-pass flags are untouched — they are only
            // updated by a successful bind's own attributes (step g).
            None => return Ok(false),
        };
        let binding = &rule.bindings()[binding_index];
        let link = binding.bind(&rule, src, dst).with_level(level);
        sink.on_binding_succeeded(binding, src, dst);
        pass_links.push(link.clone());

        let hide = binding.attrs().flag_or("hide", false);
        let hide_next = binding.attrs().flag_or("hideNext", false);
        let skip_word = binding.attrs().flag_or("skipWord", true);
        let hide_filter = binding.attrs().list("hideFilter");

        if !hide_this && !flags.hide_other && !hide {
            next_nodes.push(link.source().clone());
        }
        flags.hide_other = hide_next;
        if !hide_filter.is_empty() {
            flags.filter = hide_filter;
        }

        Ok(skip_word)
    }
}
