//! Path segments for hierarchical keys
//!
//! This module defines the atomic building blocks of an ancestor path:
//! - Identifier: the two-case id-or-name discriminator
//! - Ancestor: a single (kind, identifier) path segment
//!
//! Ancestors never travel on their own; they only cross the process boundary
//! as part of a full key path (see the `wire` module).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier carried by a complete path segment
///
/// An entity at one level of the path is addressed either by a numeric id
/// (typically allocated by the store) or by a caller-chosen string name.
/// The two cases are mutually exclusive by construction; there is no state
/// in which both are present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Identifier {
    /// Numeric identifier (64-bit signed)
    Id(i64),
    /// String identifier (non-empty by `Ancestor` construction)
    Name(String),
}

impl Identifier {
    /// Get the numeric id, if this is the `Id` case
    pub fn id(&self) -> Option<i64> {
        match self {
            Identifier::Id(id) => Some(*id),
            Identifier::Name(_) => None,
        }
    }

    /// Get the name, if this is the `Name` case
    pub fn name(&self) -> Option<&str> {
        match self {
            Identifier::Id(_) => None,
            Identifier::Name(name) => Some(name),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "{}", id),
            Identifier::Name(name) => write!(f, "{}", name),
        }
    }
}

/// One segment of an ancestor path: a kind plus an optional identifier
///
/// An ancestor with no identifier is *incomplete*. Incomplete ancestors are
/// only permitted as the terminal element of a partial key ("insert under
/// this parent, the store will assign the id"); every other position in a
/// path must carry an id or a name.
///
/// Ancestors are immutable once constructed. Equality and hashing are purely
/// structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Ancestor {
    kind: String,
    identifier: Option<Identifier>,
}

impl Ancestor {
    /// Create a complete ancestor addressed by numeric id
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `kind` is empty.
    pub fn with_id(kind: impl Into<String>, id: i64) -> Result<Self> {
        Self::checked(kind.into(), Some(Identifier::Id(id)))
    }

    /// Create a complete ancestor addressed by string name
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `kind` or `name` is empty.
    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Validation("name must not be empty".to_string()));
        }
        Self::checked(kind.into(), Some(Identifier::Name(name)))
    }

    /// Create an incomplete ancestor (kind only, no identifier)
    ///
    /// Only valid as the terminal element of a partial key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if `kind` is empty.
    pub fn incomplete(kind: impl Into<String>) -> Result<Self> {
        Self::checked(kind.into(), None)
    }

    fn checked(kind: String, identifier: Option<Identifier>) -> Result<Self> {
        let ancestor = Self::unvalidated(kind, identifier);
        ancestor.validate()?;
        Ok(ancestor)
    }

    /// Construct without validation; builders validate at `build()`
    pub(crate) fn unvalidated(kind: String, identifier: Option<Identifier>) -> Self {
        Ancestor { kind, identifier }
    }

    /// Check the segment invariants: non-empty kind, non-empty name
    pub(crate) fn validate(&self) -> Result<()> {
        if self.kind.is_empty() {
            return Err(Error::Validation("kind must not be empty".to_string()));
        }
        if let Some(Identifier::Name(name)) = &self.identifier {
            if name.is_empty() {
                return Err(Error::Validation("name must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// The kind (type/category name) of this segment
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The identifier, or `None` if this segment is incomplete
    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// Whether this segment carries a numeric id
    pub fn has_id(&self) -> bool {
        matches!(self.identifier, Some(Identifier::Id(_)))
    }

    /// Whether this segment carries a string name
    pub fn has_name(&self) -> bool {
        matches!(self.identifier, Some(Identifier::Name(_)))
    }

    /// Whether this segment carries any identifier at all
    pub fn is_complete(&self) -> bool {
        self.identifier.is_some()
    }

    /// The numeric id, or `None` if this segment has a name or is incomplete
    pub fn id(&self) -> Option<i64> {
        self.identifier.as_ref().and_then(Identifier::id)
    }

    /// The name, or `None` if this segment has an id or is incomplete
    pub fn name(&self) -> Option<&str> {
        self.identifier.as_ref().and_then(Identifier::name)
    }
}

// Deserialization re-checks the segment invariants so malformed input can
// never produce an ancestor the constructors would have rejected.
impl<'de> Deserialize<'de> for Ancestor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            kind: String,
            identifier: Option<Identifier>,
        }
        let raw = Raw::deserialize(deserializer)?;
        let ancestor = Ancestor::unvalidated(raw.kind, raw.identifier);
        ancestor.validate().map_err(serde::de::Error::custom)?;
        Ok(ancestor)
    }
}

impl fmt::Display for Ancestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(Identifier::Id(id)) => write!(f, "{}:{}", self.kind, id),
            Some(Identifier::Name(name)) => write!(f, "{}:\"{}\"", self.kind, name),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Identifier Tests
    // ========================================

    #[test]
    fn test_identifier_id_accessors() {
        let ident = Identifier::Id(42);
        assert_eq!(ident.id(), Some(42));
        assert_eq!(ident.name(), None);
    }

    #[test]
    fn test_identifier_name_accessors() {
        let ident = Identifier::Name("acme".to_string());
        assert_eq!(ident.id(), None);
        assert_eq!(ident.name(), Some("acme"));
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(format!("{}", Identifier::Id(7)), "7");
        assert_eq!(format!("{}", Identifier::Name("x".to_string())), "x");
    }

    #[test]
    fn test_identifier_equality() {
        assert_eq!(Identifier::Id(1), Identifier::Id(1));
        assert_ne!(Identifier::Id(1), Identifier::Id(2));
        assert_ne!(Identifier::Id(1), Identifier::Name("1".to_string()));
    }

    #[test]
    fn test_identifier_negative_id() {
        let ident = Identifier::Id(i64::MIN);
        assert_eq!(ident.id(), Some(i64::MIN));
    }

    #[test]
    fn test_identifier_serialization() {
        for ident in [Identifier::Id(42), Identifier::Name("acme".to_string())] {
            let json = serde_json::to_string(&ident).unwrap();
            let restored: Identifier = serde_json::from_str(&json).unwrap();
            assert_eq!(ident, restored);
        }
    }

    // ========================================
    // Ancestor Tests
    // ========================================

    #[test]
    fn test_ancestor_with_id() {
        let a = Ancestor::with_id("Person", 42).unwrap();
        assert_eq!(a.kind(), "Person");
        assert!(a.has_id());
        assert!(!a.has_name());
        assert!(a.is_complete());
        assert_eq!(a.id(), Some(42));
        assert_eq!(a.name(), None);
    }

    #[test]
    fn test_ancestor_with_name() {
        let a = Ancestor::with_name("Company", "acme").unwrap();
        assert_eq!(a.kind(), "Company");
        assert!(!a.has_id());
        assert!(a.has_name());
        assert!(a.is_complete());
        assert_eq!(a.id(), None);
        assert_eq!(a.name(), Some("acme"));
    }

    #[test]
    fn test_ancestor_incomplete() {
        let a = Ancestor::incomplete("Person").unwrap();
        assert_eq!(a.kind(), "Person");
        assert!(!a.has_id());
        assert!(!a.has_name());
        assert!(!a.is_complete());
        assert_eq!(a.identifier(), None);
    }

    #[test]
    fn test_ancestor_empty_kind_fails() {
        assert!(matches!(
            Ancestor::with_id("", 1),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Ancestor::with_name("", "acme"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Ancestor::incomplete(""),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_ancestor_empty_name_fails() {
        assert!(matches!(
            Ancestor::with_name("Company", ""),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_ancestor_mutual_exclusivity() {
        // The Identifier enum makes id/name structurally exclusive
        let by_id = Ancestor::with_id("Person", 7).unwrap();
        assert!(by_id.has_id() && !by_id.has_name());

        let by_name = Ancestor::with_name("Person", "alice").unwrap();
        assert!(by_name.has_name() && !by_name.has_id());
    }

    #[test]
    fn test_ancestor_display() {
        assert_eq!(
            format!("{}", Ancestor::with_id("Person", 42).unwrap()),
            "Person:42"
        );
        assert_eq!(
            format!("{}", Ancestor::with_name("Company", "acme").unwrap()),
            "Company:\"acme\""
        );
        assert_eq!(
            format!("{}", Ancestor::incomplete("Person").unwrap()),
            "Person"
        );
    }

    #[test]
    fn test_ancestor_equality() {
        let a1 = Ancestor::with_id("Person", 42).unwrap();
        let a2 = Ancestor::with_id("Person", 42).unwrap();
        let a3 = Ancestor::with_id("Person", 43).unwrap();
        let a4 = Ancestor::with_id("Animal", 42).unwrap();

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
        assert_ne!(a1, a4);
    }

    #[test]
    fn test_ancestor_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Ancestor::with_id("Person", 1).unwrap());
        set.insert(Ancestor::with_id("Person", 2).unwrap());
        set.insert(Ancestor::with_id("Person", 1).unwrap()); // Duplicate

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_ancestor_unicode_kind_and_name() {
        let a = Ancestor::with_name("種類", "名前").unwrap();
        assert_eq!(a.kind(), "種類");
        assert_eq!(a.name(), Some("名前"));
    }

    #[test]
    fn test_ancestor_deserialization_rejects_empty_kind() {
        let result = serde_json::from_str::<Ancestor>(r#"{"kind":"","identifier":null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ancestor_deserialization_rejects_empty_name() {
        let result =
            serde_json::from_str::<Ancestor>(r#"{"kind":"Person","identifier":{"Name":""}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ancestor_serialization() {
        let ancestors = vec![
            Ancestor::with_id("Person", 42).unwrap(),
            Ancestor::with_name("Company", "acme").unwrap(),
            Ancestor::incomplete("Person").unwrap(),
        ];

        for a in ancestors {
            let json = serde_json::to_string(&a).unwrap();
            let restored: Ancestor = serde_json::from_str(&json).unwrap();
            assert_eq!(a, restored);
        }
    }
}
