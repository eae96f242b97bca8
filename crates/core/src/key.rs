//! Hierarchical entity keys
//!
//! This module defines the two refinement levels of a key:
//! - PartialKey: dataset + namespace + non-empty ancestor path, whose leaf
//!   may still be missing its identifier ("insert under this parent")
//! - Key: a partial key whose leaf is guaranteed to carry an id or a name,
//!   usable to reference a specific entity
//!
//! Both types are immutable after construction and safe to share across
//! concurrent readers without synchronization. They are created only through
//! the builders (see the `builder` module), the promotion gate
//! [`Key::from_partial`], or the codec entry points.

use crate::ancestor::{Ancestor, Identifier};
use crate::builder::{KeyBuilder, PartialKeyBuilder};
use crate::error::{Error, Result};
use crate::wire;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A possibly-incomplete hierarchical key
///
/// A partial key addresses a location in the store: a dataset (storage
/// project), an optional namespace (empty means the default namespace), and
/// an ordered ancestor path of (kind, identifier) segments. The final
/// segment (the leaf) is allowed to have no identifier yet; every other
/// segment must be complete.
///
/// # Invariants
///
/// Checked once at construction, never re-validated on access:
/// - `dataset` is non-empty
/// - `path` has at least one segment
/// - every non-leaf segment carries an id or a name
///
/// # Examples
///
/// ```
/// use pathkey_core::PartialKeyBuilder;
///
/// let parent = PartialKeyBuilder::new("d1", "Person")
///     .namespace("test-ns")
///     .build()
///     .unwrap();
/// assert_eq!(parent.kind(), "Person");
/// assert!(!parent.leaf().is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PartialKey {
    dataset: String,
    namespace: String,
    path: Vec<Ancestor>,
}

impl PartialKey {
    /// Assemble a partial key, checking all structural invariants
    pub(crate) fn from_parts(
        dataset: String,
        namespace: String,
        path: Vec<Ancestor>,
    ) -> Result<Self> {
        if dataset.is_empty() {
            return Err(Error::Validation("dataset must not be empty".to_string()));
        }
        if path.is_empty() {
            return Err(Error::Validation("path must not be empty".to_string()));
        }
        for ancestor in &path {
            ancestor.validate()?;
        }
        for ancestor in &path[..path.len() - 1] {
            if !ancestor.is_complete() {
                return Err(Error::Validation(
                    "non-leaf ancestor must have an id or a name".to_string(),
                ));
            }
        }
        Ok(PartialKey {
            dataset,
            namespace,
            path,
        })
    }

    /// The dataset (storage project) this key belongs to
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// The namespace; empty denotes the default namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The full ancestor path, root to leaf (always non-empty)
    pub fn path(&self) -> &[Ancestor] {
        &self.path
    }

    /// The kind of the leaf segment
    pub fn kind(&self) -> &str {
        self.leaf().kind()
    }

    /// The parent chain: every segment except the leaf
    pub fn ancestors(&self) -> &[Ancestor] {
        &self.path[..self.path.len() - 1]
    }

    /// The final segment of the path
    pub fn leaf(&self) -> &Ancestor {
        self.path.last().expect("path is never empty")
    }

    /// Derive a builder pre-populated with this key's dataset, namespace,
    /// kind, and parent chain, for copy-and-modify construction
    ///
    /// The leaf's identifier (if any) is not carried over; use
    /// [`Key::to_builder`] to keep it.
    pub fn to_builder(&self) -> PartialKeyBuilder {
        PartialKeyBuilder::new(self.dataset.clone(), self.kind())
            .namespace(self.namespace.clone())
            .add_ancestors(self.ancestors().iter().cloned())
    }

    /// Serialize to the binary wire form
    ///
    /// # Errors
    ///
    /// Returns `Error::Encoding` if serialization fails; this is not
    /// expected for any well-formed key.
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>> {
        wire::encode(self)
    }

    /// Parse a partial key from its binary wire form
    ///
    /// Completeness of the leaf is not enforced here; use
    /// [`Key::from_wire_bytes`] to decode and promote in one step.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the bytes are not a well-formed key message.
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self> {
        wire::decode(bytes)
    }
}

impl fmt::Display for PartialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dataset)?;
        if !self.namespace.is_empty() {
            write!(f, "@{}", self.namespace)?;
        }
        for (i, ancestor) in self.path.iter().enumerate() {
            let sep = if i == 0 { ':' } else { '/' };
            write!(f, "{}{}", sep, ancestor)?;
        }
        Ok(())
    }
}

// Ord implementation for BTreeMap key ordering
// Orders by: dataset → namespace → path
impl Ord for PartialKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dataset
            .cmp(&other.dataset)
            .then_with(|| self.namespace.cmp(&other.namespace))
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for PartialKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// Deserialization goes through from_parts so the structural invariants hold
// for every PartialKey in existence, whatever its origin.
impl<'de> Deserialize<'de> for PartialKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            dataset: String,
            namespace: String,
            path: Vec<Ancestor>,
        }
        let raw = Raw::deserialize(deserializer)?;
        PartialKey::from_parts(raw.dataset, raw.namespace, raw.path)
            .map_err(serde::de::Error::custom)
    }
}

/// A key that is guaranteed to be complete
///
/// A `Key` is a [`PartialKey`] whose leaf carries an id or a name. The
/// refinement is checked exactly once, at [`KeyBuilder::build`],
/// [`Key::from_partial`], or one of the decoders, and never re-validated
/// on access.
///
/// # Examples
///
/// ```
/// use pathkey_core::KeyBuilder;
///
/// let key = KeyBuilder::new_with_id("d1", "Person", 42)
///     .add_ancestor_name("Company", "acme")
///     .build()
///     .unwrap();
/// assert_eq!(key.kind(), "Person");
/// assert_eq!(key.id(), Some(42));
/// assert_eq!(key.ancestors().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(PartialKey);

impl Key {
    /// Wrap without re-checking; callers must have verified leaf completeness
    pub(crate) fn from_complete(partial: PartialKey) -> Self {
        debug_assert!(partial.leaf().is_complete());
        Key(partial)
    }

    /// Promote a partial key whose leaf already carries an id or a name
    ///
    /// This is the single gate between the two refinement levels. It is
    /// idempotent: promoting the partial form of an existing `Key` yields an
    /// equal `Key`, and no copy of the path is made.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the leaf has neither an id nor a name.
    pub fn from_partial(partial: PartialKey) -> Result<Self> {
        if partial.leaf().is_complete() {
            Ok(Key(partial))
        } else {
            Err(Error::Validation("key is missing name or id".to_string()))
        }
    }

    /// The dataset (storage project) this key belongs to
    pub fn dataset(&self) -> &str {
        self.0.dataset()
    }

    /// The namespace; empty denotes the default namespace
    pub fn namespace(&self) -> &str {
        self.0.namespace()
    }

    /// The full ancestor path, root to leaf
    pub fn path(&self) -> &[Ancestor] {
        self.0.path()
    }

    /// The kind of the leaf segment
    pub fn kind(&self) -> &str {
        self.0.kind()
    }

    /// The parent chain: every segment except the leaf
    pub fn ancestors(&self) -> &[Ancestor] {
        self.0.ancestors()
    }

    /// The final segment of the path (always complete)
    pub fn leaf(&self) -> &Ancestor {
        self.0.leaf()
    }

    /// View this key at the weaker refinement level
    pub fn as_partial(&self) -> &PartialKey {
        &self.0
    }

    /// Whether the leaf carries a numeric id
    pub fn has_id(&self) -> bool {
        self.leaf().has_id()
    }

    /// The leaf's id, or `None` if it has a name instead
    pub fn id(&self) -> Option<i64> {
        self.leaf().id()
    }

    /// Whether the leaf carries a string name
    pub fn has_name(&self) -> bool {
        self.leaf().has_name()
    }

    /// The leaf's name, or `None` if it has an id instead
    pub fn name(&self) -> Option<&str> {
        self.leaf().name()
    }

    /// The leaf's identifier: its id or its name, whichever is set
    pub fn name_or_id(&self) -> &Identifier {
        self.leaf()
            .identifier()
            .expect("complete key always has an identifier")
    }

    /// Derive a builder pre-populated with this key's dataset, namespace,
    /// kind, parent chain, and leaf identifier
    pub fn to_builder(&self) -> KeyBuilder {
        let builder = match self.name_or_id() {
            Identifier::Id(id) => KeyBuilder::new_with_id(self.dataset(), self.kind(), *id),
            Identifier::Name(name) => {
                KeyBuilder::new_with_name(self.dataset(), self.kind(), name.clone())
            }
        };
        builder
            .namespace(self.namespace().to_string())
            .add_ancestors(self.ancestors().iter().cloned())
    }

    /// Serialize to the binary wire form
    ///
    /// # Errors
    ///
    /// Returns `Error::Encoding` if serialization fails; this is not
    /// expected for any well-formed key.
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>> {
        self.0.to_wire_bytes()
    }

    /// Parse and promote a complete key from its binary wire form
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the bytes are not a well-formed key
    /// message, or `Error::Validation` if the decoded leaf is incomplete.
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self> {
        Key::from_partial(PartialKey::from_wire_bytes(bytes)?)
    }

    /// Encode this key as a URL-transportable string
    ///
    /// The wire bytes are passed through the URL-safe base64 alphabet
    /// (unpadded), so the result can be embedded in a URL path or query
    /// without further escaping.
    ///
    /// # Errors
    ///
    /// Returns `Error::Encoding` if wire serialization fails; the text
    /// transform itself is total and cannot fail.
    pub fn to_url_safe(&self) -> Result<String> {
        let bytes = self.to_wire_bytes()?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Decode a key from its URL-safe encoded form
    ///
    /// # Errors
    ///
    /// Returns `Error::Decoding` if the text is not valid URL-safe encoded
    /// data, `Error::Parse` if the decoded bytes are not a well-formed key
    /// message, or `Error::Validation` if the decoded leaf is incomplete.
    pub fn from_url_safe(text: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(text)?;
        Key::from_wire_bytes(&bytes)
    }
}

impl From<Key> for PartialKey {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Deserialization goes through the promotion gate so an incomplete path can
// never masquerade as a complete key.
impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let partial = PartialKey::deserialize(deserializer)?;
        Key::from_partial(partial).map_err(serde::de::Error::custom)
    }
}
