//! Fluent builders for partial and complete keys
//!
//! Builders are single-owner, sequential accumulators: every method consumes
//! and returns the builder so construction reads as one chain, and a final
//! validating `build()` freezes the accumulated state into an immutable key.
//! Nothing is validated along the way; an empty dataset or kind recorded at
//! any point surfaces as `Error::Validation` from `build()`.

use crate::ancestor::{Ancestor, Identifier};
use crate::error::{Error, Result};
use crate::key::{Key, PartialKey};

/// Builder for [`PartialKey`]
///
/// Accumulates a dataset, an optional namespace, the leaf's kind, and an
/// ordered parent chain of complete ancestors. `build()` assembles the path
/// as parent chain + an incomplete leaf segment.
///
/// # Examples
///
/// ```
/// use pathkey_core::PartialKeyBuilder;
///
/// let partial = PartialKeyBuilder::new("d1", "Person")
///     .add_ancestor_name("Company", "acme")
///     .build()
///     .unwrap();
/// assert_eq!(partial.path().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PartialKeyBuilder {
    dataset: String,
    namespace: String,
    kind: String,
    ancestors: Vec<Ancestor>,
}

impl PartialKeyBuilder {
    /// Start a builder for a key of `kind` under `dataset`
    pub fn new(dataset: impl Into<String>, kind: impl Into<String>) -> Self {
        PartialKeyBuilder {
            dataset: dataset.into(),
            namespace: String::new(),
            kind: kind.into(),
            ancestors: Vec::new(),
        }
    }

    /// Overwrite the dataset
    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Overwrite the namespace; empty selects the default namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Overwrite the leaf's kind without touching the parent chain
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Append a parent addressed by numeric id
    pub fn add_ancestor_id(mut self, kind: impl Into<String>, id: i64) -> Self {
        self.ancestors
            .push(Ancestor::unvalidated(kind.into(), Some(Identifier::Id(id))));
        self
    }

    /// Append a parent addressed by string name
    pub fn add_ancestor_name(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.ancestors.push(Ancestor::unvalidated(
            kind.into(),
            Some(Identifier::Name(name.into())),
        ));
        self
    }

    /// Append a pre-built ancestor to the parent chain
    pub fn add_ancestor(mut self, ancestor: Ancestor) -> Self {
        self.ancestors.push(ancestor);
        self
    }

    /// Append ancestors in iteration order
    pub fn add_ancestors(mut self, ancestors: impl IntoIterator<Item = Ancestor>) -> Self {
        self.ancestors.extend(ancestors);
        self
    }

    /// Discard the parent chain and the pending leaf kind
    ///
    /// Dataset and namespace are retained; set a new kind before `build()`.
    pub fn clear_path(mut self) -> Self {
        self.ancestors.clear();
        self.kind.clear();
        self
    }

    /// Validate the accumulated state and freeze it into a [`PartialKey`]
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the dataset or the leaf kind is empty,
    /// or if any recorded ancestor has an empty kind, an empty name, or no
    /// identifier at all.
    pub fn build(self) -> Result<PartialKey> {
        self.build_with_leaf(None)
    }

    /// Shared assembly for both builders: path = ancestors + leaf
    fn build_with_leaf(self, leaf: Option<Identifier>) -> Result<PartialKey> {
        for ancestor in &self.ancestors {
            ancestor.validate()?;
            if !ancestor.is_complete() {
                return Err(Error::Validation(
                    "ancestor must have an id or a name".to_string(),
                ));
            }
        }
        let mut path = self.ancestors;
        let leaf = Ancestor::unvalidated(self.kind, leaf);
        leaf.validate()?;
        path.push(leaf);
        PartialKey::from_parts(self.dataset, self.namespace, path)
    }
}

/// Builder for [`Key`]
///
/// Identical to [`PartialKeyBuilder`] plus a pending leaf identifier. The
/// identifier is set at construction and can be overwritten ([`id`] and
/// [`name`] are mutually exclusive, each replacing the other), so `build()`
/// always yields a complete key.
///
/// [`id`]: KeyBuilder::id
/// [`name`]: KeyBuilder::name
///
/// # Examples
///
/// ```
/// use pathkey_core::KeyBuilder;
///
/// let key = KeyBuilder::new_with_name("d1", "Person", "alice")
///     .namespace("test-ns")
///     .build()
///     .unwrap();
/// assert_eq!(key.name(), Some("alice"));
/// ```
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    inner: PartialKeyBuilder,
    leaf: Identifier,
}

impl KeyBuilder {
    /// Start a builder for a key addressed by numeric id
    pub fn new_with_id(dataset: impl Into<String>, kind: impl Into<String>, id: i64) -> Self {
        KeyBuilder {
            inner: PartialKeyBuilder::new(dataset, kind),
            leaf: Identifier::Id(id),
        }
    }

    /// Start a builder for a key addressed by string name
    pub fn new_with_name(
        dataset: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        KeyBuilder {
            inner: PartialKeyBuilder::new(dataset, kind),
            leaf: Identifier::Name(name.into()),
        }
    }

    /// Start a builder for an id-addressed child of `parent`
    ///
    /// The parent's dataset, namespace, and full path (its leaf included)
    /// become this builder's ancestor chain.
    pub fn with_parent_id(parent: &Key, kind: impl Into<String>, id: i64) -> Self {
        Self::under_parent(parent, kind.into(), Identifier::Id(id))
    }

    /// Start a builder for a name-addressed child of `parent`
    pub fn with_parent_name(
        parent: &Key,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::under_parent(parent, kind.into(), Identifier::Name(name.into()))
    }

    fn under_parent(parent: &Key, kind: String, leaf: Identifier) -> Self {
        KeyBuilder {
            inner: PartialKeyBuilder::new(parent.dataset(), kind)
                .namespace(parent.namespace())
                .add_ancestors(parent.path().iter().cloned()),
            leaf,
        }
    }

    /// Overwrite the dataset
    pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
        self.inner = self.inner.dataset(dataset);
        self
    }

    /// Overwrite the namespace; empty selects the default namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.inner = self.inner.namespace(namespace);
        self
    }

    /// Overwrite the leaf's kind without touching the parent chain
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.inner = self.inner.kind(kind);
        self
    }

    /// Set the leaf's id, clearing any previously set name
    pub fn id(mut self, id: i64) -> Self {
        self.leaf = Identifier::Id(id);
        self
    }

    /// Set the leaf's name, clearing any previously set id
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.leaf = Identifier::Name(name.into());
        self
    }

    /// Append a parent addressed by numeric id
    pub fn add_ancestor_id(mut self, kind: impl Into<String>, id: i64) -> Self {
        self.inner = self.inner.add_ancestor_id(kind, id);
        self
    }

    /// Append a parent addressed by string name
    pub fn add_ancestor_name(mut self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.inner = self.inner.add_ancestor_name(kind, name);
        self
    }

    /// Append a pre-built ancestor to the parent chain
    pub fn add_ancestor(mut self, ancestor: Ancestor) -> Self {
        self.inner = self.inner.add_ancestor(ancestor);
        self
    }

    /// Append ancestors in iteration order
    pub fn add_ancestors(mut self, ancestors: impl IntoIterator<Item = Ancestor>) -> Self {
        self.inner = self.inner.add_ancestors(ancestors);
        self
    }

    /// Discard the parent chain and the pending leaf kind
    ///
    /// Dataset, namespace, and the pending leaf identifier are retained.
    pub fn clear_path(mut self) -> Self {
        self.inner = self.inner.clear_path();
        self
    }

    /// Validate the accumulated state and freeze it into a complete [`Key`]
    ///
    /// No completeness check is needed beyond assembly: the leaf identifier
    /// exists by construction.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` under the same conditions as
    /// [`PartialKeyBuilder::build`].
    pub fn build(self) -> Result<Key> {
        let partial = self.inner.build_with_leaf(Some(self.leaf))?;
        Ok(Key::from_complete(partial))
    }
}
