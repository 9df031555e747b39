//! Rule and binding engine: locale-scoped grammar that scores and selects a
//! binding between two adjacent nodes (core spec §4.3).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::node::Node;

/// An attribute bag attached to a [`Binding`], keyed by the short names the
/// core spec's reducer reads (`with`, `has`, `hasAll`, `typeHas`, `hide`,
/// `hideNext`, `skipWord`, `hideFilter`, `linkAction`).
///
/// Unknown keys are ignored (Design Note §9): a typo in a rule source
/// degrades silently here, by design — surfacing it is a separate lint
/// pass's job, not the reducer's.
#[derive(Debug, Clone, Default)]
pub struct AttrBag {
    entries: HashMap<String, String>,
}

impl AttrBag {
    /// Builds an empty attribute bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from `(key, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self { entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }

    /// Raw string value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Raw string value for `key`, defaulting to `default` when absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_else(|| default.to_string())
    }

    /// `true` when `key` is present and equals `"yes"`.
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        match self.entries.get(key).map(String::as_str) {
            Some("yes") => true,
            Some("no") => false,
            _ => default,
        }
    }

    /// Splits `key`'s value on `,`, trimming whitespace and dropping empty
    /// segments. Returns an empty vec if the key is absent or its value is
    /// empty — this is how an empty `hideFilter` list becomes "inactive"
    /// (core spec §8 boundary behavior).
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.entries.get(key) {
            Some(v) => v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect(),
            None => Vec::new(),
        }
    }
}

/// A comma-separated set of link-construction directives read from a
/// binding's `linkAction` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkAction {
    /// Swap source/destination and retype from the (original) destination.
    pub reverse: bool,
    /// Retype the link from the destination's first flag.
    pub other_type: bool,
    /// Retype the link from the source's first flag.
    pub this_type: bool,
}

impl LinkAction {
    /// Parses a comma-separated `linkAction` attribute value.
    pub fn parse(raw: &str) -> Self {
        let mut action = LinkAction::default();
        for part in raw.split(',').map(str::trim) {
            match part {
                "reverse" => action.reverse = true,
                "othertype" => action.other_type = true,
                "thistype" => action.this_type = true,
                _ => {}
            }
        }
        action
    }
}

/// An attributed predicate over a pair of adjacent nodes: both a test
/// (`can_bind`) and a constructor of links (`bind`).
#[derive(Debug, Clone)]
pub struct Binding {
    attrs: AttrBag,
}

impl Binding {
    /// Builds a binding from an attribute bag.
    pub fn new(attrs: AttrBag) -> Self {
        Self { attrs }
    }

    /// This binding's attribute bag.
    pub fn attrs(&self) -> &AttrBag {
        &self.attrs
    }

    /// Scores how well this binding matches the `(src, dst)` pair, per
    /// core spec §4.3's `Binding.can_bind` algorithm. Returns 0 when the
    /// parent rule does not apply to `src`, when no `with` option survives
    /// its `hasAll`/`has`/`typeHas` gates, or when `with` is empty.
    pub fn can_bind(&self, rule: &Rule, src: &Node, dst: &Node) -> f64 {
        if rule.applies_for(src) <= 0.0 {
            return 0.0;
        }
        let (src_type, dst_type) = match (src.first_type(), dst.first_type()) {
            (Some(s), Some(d)) => (s, d),
            _ => return 0.0,
        };
        let with = self.attrs.get_or("with", "");
        let has = self.attrs.get_or("has", "");
        let has_all = self.attrs.get_or("hasAll", "");
        let type_has = self.attrs.get_or("typeHas", "");

        for w in with.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let mut s = match_score(dst_type, w) - 1.0 / (w.len() as f64);
            if s <= 0.0 {
                continue;
            }
            if !has_all.is_empty() {
                if !dst_type.contains(has_all.as_str()) {
                    continue;
                }
                s += has_all.len() as f64 / dst_type.len() as f64;
            } else if !has.is_empty() {
                let wh = format!("{}{}", first_char(w), has);
                let has_score = match_score(dst_type, &wh) - 1.0 / (wh.len() as f64);
                if has_score <= 0.0 {
                    continue;
                }
                s += has_score / dst_type.len() as f64;
            }
            if !type_has.is_empty() {
                let bt = format!("{}{}", first_char(src_type), type_has);
                let threshold = 1.0 / (bt.len() as f64);
                if match_score(src_type, &bt) - threshold < threshold {
                    continue;
                }
            }
            return s;
        }
        0.0
    }

    /// Binds `src` to `dst`, producing a [`crate::reduce::Link`].
    ///
    /// # Panics
    ///
    /// Debug-asserts `can_bind(rule, src, dst) > 0.0`; callers must check
    /// the precondition (core spec §4.3).
    pub fn bind(&self, rule: &Rule, src: &Node, dst: &Node) -> crate::reduce::Link {
        debug_assert!(
            self.can_bind(rule, src, dst) > 0.0,
            "bind called without a satisfied can_bind precondition"
        );
        let action = LinkAction::parse(&self.attrs.get_or("linkAction", ""));
        let (source, dest, type_code, locale) = if action.reverse {
            let type_code = dst.first_type().unwrap_or_default().chars().next().map(String::from).unwrap_or_default();
            (dst.clone(), src.clone(), type_code, dst.locale().to_string())
        } else if action.other_type {
            let type_code = dst.first_type().unwrap_or_default().chars().next().map(String::from).unwrap_or_default();
            (src.clone(), dst.clone(), type_code, rule.locale.clone())
        } else if action.this_type {
            let type_code = src.first_type().unwrap_or_default().chars().next().map(String::from).unwrap_or_default();
            (src.clone(), dst.clone(), type_code, rule.locale.clone())
        } else {
            (src.clone(), dst.clone(), rule.primary_type.clone(), rule.locale.clone())
        };
        crate::reduce::Link::new(source, dest, type_code, locale, 0)
    }
}

/// Returns a similarity score in `[0, 1]` between a node type code `a` and a
/// candidate type string `b` (core spec §4.3).
///
/// - `match_score(a, a) == 1.0`.
/// - If `b` is a prefix of `a`, returns `|b| / |a|`.
/// - Else if `b` occurs as a substring of `a`, returns `|b| / (|a| + 1)`
///   (offset = 1, the smallest offset that keeps a non-prefix substring
///   match strictly below an equal-length prefix match — the resolved
///   Open Question from the core spec's §9).
/// - Otherwise `0.0`.
pub fn match_score(a: &str, b: &str) -> f64 {
    if b.is_empty() || a.is_empty() {
        return 0.0;
    }
    if a.starts_with(b) {
        return b.len() as f64 / a.len() as f64;
    }
    if a.contains(b) {
        return b.len() as f64 / (a.len() as f64 + 1.0);
    }
    0.0
}

fn first_char(s: &str) -> String {
    s.chars().next().map(String::from).unwrap_or_default()
}

/// A locale-scoped, single-primary-type ordered list of bindings.
#[derive(Debug, Clone)]
pub struct Rule {
    locale: String,
    primary_type: String,
    bindings: Vec<Binding>,
}

impl Rule {
    /// Builds a rule for one `(locale, primary_type)` pair.
    pub fn new(locale: impl Into<String>, primary_type: impl Into<String>, bindings: Vec<Binding>) -> Self {
        Self { locale: locale.into(), primary_type: primary_type.into(), bindings }
    }

    /// The locale this rule is scoped to.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// This rule's primary type code.
    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    /// This rule's ordered bindings.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Scores how well this rule applies to `n`, per core spec §4.3:
    /// `match_score(node_type, rule_type)`. The rule is applicable whenever
    /// this is `> 0`.
    pub fn applies_for(&self, n: &Node) -> f64 {
        match n.first_type() {
            Some(node_type) => match_score(node_type, &self.primary_type),
            None => 0.0,
        }
    }

    /// Scores every binding against `(src, dst)`, retains those scoring
    /// `> 0`, and returns the one with the highest score. Ties favor the
    /// binding encountered later in the list (the reference's "highest map
    /// entry" tie-break, core spec §4.3).
    pub fn get_binding_for(&self, src: &Node, dst: &Node) -> Option<&Binding> {
        let mut best: Option<(f64, &Binding)> = None;
        for binding in &self.bindings {
            let score = binding.can_bind(self, src, dst);
            if score <= 0.0 {
                continue;
            }
            match best {
                Some((best_score, _)) if score < best_score => {}
                _ => best = Some((score, binding)),
            }
        }
        best.map(|(_, binding)| binding)
    }
}

/// A locale's ordered rule definitions, as returned by a [`RuleSource`].
pub type RuleSet = Vec<Rule>;

/// External collaborator that loads a locale's grammar (core spec §6). The
/// on-disk format is opaque to the core; a reference fixture-backed
/// implementation lives in [`crate::fixtures`].
pub trait RuleSource: Send + Sync {
    /// Loads every rule defined for `locale`.
    fn load(&self, locale: &str) -> Result<RuleSet, crate::error::RuleSourceError>;
}

/// Locale-and-primary-type-keyed cache of loaded rules (core spec §4.3,
/// §5). At most one [`Rule`] is ever held per `(locale, primary_type)`;
/// concurrent misses coalesce because the whole load-and-insert happens
/// while holding the registry's lock.
pub struct RuleRegistry {
    source: Arc<dyn RuleSource>,
    cache: Mutex<HashMap<(String, String), Arc<Rule>>>,
}

impl RuleRegistry {
    /// Builds a registry backed by `source`, with an empty cache.
    pub fn new(source: Arc<dyn RuleSource>) -> Self {
        Self { source, cache: Mutex::new(HashMap::new()) }
    }

    /// Looks up the rule for `(locale, primary_type)`, loading and caching
    /// the locale's whole rule set on first reference.
    ///
    /// Returns `None` when the locale loads successfully but defines no
    /// rule for `primary_type`. Returns `Err` when the locale itself fails
    /// to load (fatal for that locale per core spec §7).
    pub fn get(&self, locale: &str, primary_type: &str) -> Result<Option<Arc<Rule>>, crate::error::RuleSourceError> {
        let key = (locale.to_string(), primary_type.to_string());
        let mut cache = self.cache.lock().expect("rule registry lock poisoned");
        if let Some(rule) = cache.get(&key) {
            return Ok(Some(rule.clone()));
        }
        let rule_set = self.source.load(locale)?;
        let mut found = None;
        for rule in rule_set {
            let cache_key = (locale.to_string(), rule.primary_type().to_string());
            let rule = Arc::new(rule);
            if cache_key == key {
                found = Some(rule.clone());
            }
            cache.entry(cache_key).or_insert(rule);
        }
        Ok(found)
    }

    /// Looks up the best binding for `(src, dst)` by resolving the rule
    /// keyed to `src`'s primary type's first character, per the reducer's
    /// `Binding.obtain` (core spec §4.5c). Returns `Ok(None)` on a
    /// `NoBinding` condition (no rule, or no binding scores `> 0`); `Err`
    /// only when the locale itself fails to load.
    pub fn obtain_binding(
        &self,
        src: &Node,
        dst: &Node,
    ) -> Result<Option<(Arc<Rule>, usize)>, crate::error::RuleSourceError> {
        let locale = src.locale();
        let primary_type = match src.first_type() {
            Some(t) => first_char(t),
            None => return Ok(None),
        };
        let rule = match self.get(locale, &primary_type)? {
            Some(r) => r,
            None => return Ok(None),
        };
        if rule.applies_for(src) <= 0.0 {
            return Ok(None);
        }
        let mut best: Option<(f64, usize)> = None;
        for (i, binding) in rule.bindings().iter().enumerate() {
            let score = binding.can_bind(&rule, src, dst);
            if score <= 0.0 {
                continue;
            }
            match best {
                Some((best_score, _)) if score < best_score => {}
                _ => best = Some((score, i)),
            }
        }
        Ok(best.map(|(_, i)| (rule, i)))
    }
}
