//! Parse-level error kinds.
//!
//! Lexical misses and binding misses are recovered inside the pipeline and
//! never surface here (core spec §7) — they show up only as soft
//! diagnostics through the [`crate::event::EventSink`]. What remains are the
//! handful of failure modes that are fatal for a single parse or a whole
//! locale.

use std::fmt;

use senselink_base::Span;

/// Input could not be tokenized because it is not validly encoded.
///
/// Carries the byte span of the offending run so a host can point a
/// diagnostic at the exact location, the same way every other span-bearing
/// error in this workspace does (`senselink_base::SpannedError`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    /// Human-readable description of what failed.
    pub message: String,
    /// Byte span of the input that could not be decoded.
    pub span: Span,
}

impl TokenizeError {
    /// Builds a tokenize error with the given message and an unspecified
    /// (zero-length, offset-0) span.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), span: Span::default() }
    }

    /// Builds a tokenize error pinpointing the byte span that failed to
    /// decode.
    pub fn at(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), span }
    }
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tokenize error at {}..{}: {}", self.span.start, self.span.end, self.message)
    }
}

impl std::error::Error for TokenizeError {}

/// A locale's rule set could not be loaded. Fatal for that locale until the
/// `RuleSource` is reloaded or fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSourceError {
    /// Locale that failed to load.
    pub locale: String,
    /// Human-readable description of what failed.
    pub message: String,
}

impl RuleSourceError {
    /// Builds a rule-source error for the given locale.
    pub fn new(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self { locale: locale.into(), message: message.into() }
    }
}

impl fmt::Display for RuleSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule source error for locale '{}': {}", self.locale, self.message)
    }
}

impl std::error::Error for RuleSourceError {}

/// The combinatorial expansion of a sentence would exceed the configured
/// `max_expected_paths` cap. Fatal for this parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionTooLarge {
    /// The expected path count computed before expansion (`∏ m(i)`).
    pub expected_paths: usize,
    /// The configured cap that was exceeded.
    pub cap: usize,
}

impl fmt::Display for ExpansionTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expansion would produce {} paths, exceeding the configured cap of {}",
            self.expected_paths, self.cap
        )
    }
}

impl std::error::Error for ExpansionTooLarge {}

/// The umbrella error type returned by [`crate::parser::Parser::parse`] and
/// [`crate::parser::Parser::process`].
///
/// `LexicalMiss`, `NoBinding`, and `NoMeaning` are deliberately absent: the
/// core spec classifies them as recoverable control-flow states, not
/// propagated errors (§7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input could not be tokenized.
    Tokenize(TokenizeError),
    /// A locale's rule set failed to load.
    RuleSource(RuleSourceError),
    /// A sentence's expansion would exceed the configured cap.
    ExpansionTooLarge(ExpansionTooLarge),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Tokenize(e) => e.fmt(f),
            ParseError::RuleSource(e) => e.fmt(f),
            ParseError::ExpansionTooLarge(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizeError> for ParseError {
    fn from(e: TokenizeError) -> Self {
        ParseError::Tokenize(e)
    }
}

impl From<RuleSourceError> for ParseError {
    fn from(e: RuleSourceError) -> Self {
        ParseError::RuleSource(e)
    }
}

impl From<ExpansionTooLarge> for ParseError {
    fn from(e: ExpansionTooLarge) -> Self {
        ParseError::ExpansionTooLarge(e)
    }
}

/// Result alias for parse-level operations.
pub type Result<T> = std::result::Result<T, ParseError>;
