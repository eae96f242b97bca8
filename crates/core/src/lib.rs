//! Core key model for pathkey
//!
//! This crate defines the hierarchical entity identifiers used to address
//! everything in the document store:
//! - Identifier: two-case id-or-name discriminator for a path segment
//! - Ancestor: one (kind, identifier) segment of a path
//! - PartialKey: dataset + namespace + ancestor path, leaf possibly
//!   incomplete (describes "insert under this parent")
//! - Key: a partial key whose leaf is guaranteed complete
//! - PartialKeyBuilder / KeyBuilder: fluent construction and copy-on-edit
//! - wire: the binary interchange form consumed by the transport layer
//! - Error: error type hierarchy
//!
//! All built values are immutable; builders are the only mutable state and
//! are single-owner. Encode/decode are pure, synchronous, in-memory
//! transformations.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ancestor;
pub mod builder;
pub mod error;
pub mod key;
pub mod wire;

pub use ancestor::{Ancestor, Identifier};
pub use builder::{KeyBuilder, PartialKeyBuilder};
pub use error::{Error, Result};
pub use key::{Key, PartialKey};
pub use wire::{WireKey, WirePathElement};
