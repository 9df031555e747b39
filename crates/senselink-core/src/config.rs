//! Parser configuration.

/// Tuning knobs for a [`crate::parser::Parser`], mirroring the core spec's
/// §6 `Configuration` collaborator.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Locale used when the caller does not specify one.
    pub default_locale: String,
    /// Maximum number of reduction passes before the reducer asserts
    /// (`MaxDepthExceeded`, §4.5/§7 — a bug-class condition, not a typed
    /// error).
    pub max_reduction_depth: usize,
    /// Optional cap on the expected path count (`∏ m(i)`) computed before
    /// expansion. `None` means unbounded.
    pub max_expected_paths: Option<usize>,
}

impl ParserConfig {
    /// The spec's default reduction depth (§4.5's `MAX_LEVEL`).
    pub const DEFAULT_MAX_REDUCTION_DEPTH: usize = 5;

    /// Builds a config for the given default locale, with the spec's
    /// default depth and no path cap.
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            max_reduction_depth: Self::DEFAULT_MAX_REDUCTION_DEPTH,
            max_expected_paths: None,
        }
    }

    /// Sets the maximum reduction depth.
    pub fn with_max_reduction_depth(mut self, depth: usize) -> Self {
        self.max_reduction_depth = depth;
        self
    }

    /// Sets the expected-path cap.
    pub fn with_max_expected_paths(mut self, cap: usize) -> Self {
        self.max_expected_paths = Some(cap);
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_spec_default_depth() {
        let config = ParserConfig::default();
        assert_eq!(config.max_reduction_depth, 5);
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.max_expected_paths, None);
    }

    #[test]
    fn builder_methods_chain() {
        let config = ParserConfig::new("it").with_max_reduction_depth(3).with_max_expected_paths(100);
        assert_eq!(config.default_locale, "it");
        assert_eq!(config.max_reduction_depth, 3);
        assert_eq!(config.max_expected_paths, Some(100));
    }
}
