//! Pathkey - hierarchical entity keys for a document-oriented store
//!
//! Every entity is addressed by an ordered ancestor path of
//! (kind, identifier) pairs within a dataset and namespace. A path whose
//! leaf carries an id or a name is a complete [`Key`]; a path whose leaf is
//! still anonymous is a [`PartialKey`], used to describe insertion under a
//! parent without naming the child.
//!
//! # Quick Start
//!
//! ```
//! use pathkey::{Key, KeyBuilder};
//!
//! // Build a complete key: Company "acme" / Person 42 in dataset "d1"
//! let key = KeyBuilder::new_with_id("d1", "Person", 42)
//!     .add_ancestor_name("Company", "acme")
//!     .build()
//!     .unwrap();
//!
//! // Ship it through a URL and back
//! let text = key.to_url_safe().unwrap();
//! let restored = Key::from_url_safe(&text).unwrap();
//! assert_eq!(key, restored);
//! ```
//!
//! # Architecture
//!
//! The entire model lives in `pathkey-core`; this crate re-exports its
//! public API. Transport, entity values, and query machinery are separate
//! collaborators that exchange keys via the binary wire form.

// Re-export the public API from pathkey-core
pub use pathkey_core::*;
