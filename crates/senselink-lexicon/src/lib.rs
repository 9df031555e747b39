#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Lexical data model, content-hash ids, and the `LexicalStore` collaborator
//! interface for senselink.
//!
//! This crate provides the lexical layer consumed by `senselink-core`:
//!
//! - [`types::LexicalData`]/[`types::FlagMap`] — a word's id, locale,
//!   symbol, and ordered grammatical-sense flags.
//! - [`hash::hash_id`] — the stable content-hash id scheme.
//! - [`store::LexicalStore`] — the external collaborator interface
//!   (existence checks, reads, writes, pseudo-node construction, full-suffix
//!   lookup), plus [`store::InMemoryLexicalStore`], a reference
//!   implementation suitable for tests and small embedded locales.
//!
//! # Architecture
//!
//! The on-disk lexicon format is explicitly out of scope for the core
//! (`senselink-core` only ever talks to a `LexicalStore` trait object). This
//! crate's own `runtime` module loads small JSON fixtures at runtime purely
//! so the workspace is runnable and testable without any real grammar file
//! — the same "dynamic lexicon" shape used elsewhere in this ecosystem for
//! fast edit-compile cycles during development.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `dynamic-lexicon` | Enable runtime JSON fixture loading via the [`runtime`] module |
//!
//! # Example
//!
//! ```
//! use senselink_lexicon::hash::hash_id;
//! use senselink_lexicon::store::{LexicalStore, InMemoryLexicalStore};
//!
//! let store = InMemoryLexicalStore::new();
//! let data = store.pseudo("it", "Libro");
//! assert_eq!(data.id(), hash_id("libro"));
//! assert!(store.is_pseudo(&data));
//! ```

/// Lexical data model: flag maps and lexical entries.
pub mod types;

/// The content-hash id scheme.
pub mod hash;

/// The `LexicalStore` collaborator interface and an in-memory reference
/// implementation.
pub mod store;

/// Runtime JSON-based loading of locale lexicon fixtures (requires
/// `dynamic-lexicon` feature).
#[cfg(feature = "dynamic-lexicon")]
#[cfg_attr(docsrs, doc(cfg(feature = "dynamic-lexicon")))]
pub mod runtime;

pub use hash::hash_id;
pub use store::{InMemoryLexicalStore, LexicalStore};
pub use types::{FlagMap, LexicalData, UNKNOWN_CONCEPT_ID, UNKNOWN_TYPE_CODE};
