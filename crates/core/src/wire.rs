//! Binary wire form for keys
//!
//! The wire form is the sole interchange format with the remote store: a
//! structured message holding the dataset, an optional namespace, and the
//! ordered path of (kind, id-or-name) elements, framed with `bincode`.
//!
//! Encoding is total for well-formed keys. Decoding validates structure
//! (well-formed message, non-empty dataset and path, complete non-leaf
//! elements, never both id and name on one element) and fails with
//! `Error::Parse`; completeness of the leaf is deliberately not enforced
//! here so incomplete keys can travel too.

use crate::ancestor::{Ancestor, Identifier};
use crate::error::{Error, Result};
use crate::key::PartialKey;
use serde::{Deserialize, Serialize};

/// Wire message for a full key
///
/// An absent namespace denotes the default namespace; it decodes to the
/// empty string on the key side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireKey {
    /// Storage project the key belongs to
    pub dataset: String,
    /// Partition within the dataset; `None` means default
    pub namespace: Option<String>,
    /// Ordered ancestor path, root to leaf
    pub path: Vec<WirePathElement>,
}

/// Wire message for one path element
///
/// At most one of `id` and `name` may be set; both absent is only valid on
/// the final element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePathElement {
    /// Entity kind at this level
    pub kind: String,
    /// Numeric identifier, if assigned
    pub id: Option<i64>,
    /// String identifier, if assigned
    pub name: Option<String>,
}

impl From<&Ancestor> for WirePathElement {
    fn from(ancestor: &Ancestor) -> Self {
        WirePathElement {
            kind: ancestor.kind().to_string(),
            id: ancestor.id(),
            name: ancestor.name().map(str::to_string),
        }
    }
}

impl From<&PartialKey> for WireKey {
    fn from(key: &PartialKey) -> Self {
        let namespace = if key.namespace().is_empty() {
            None
        } else {
            Some(key.namespace().to_string())
        };
        WireKey {
            dataset: key.dataset().to_string(),
            namespace,
            path: key.path().iter().map(WirePathElement::from).collect(),
        }
    }
}

impl WireKey {
    /// Validate this message and convert it to a [`PartialKey`]
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the message is structurally invalid.
    pub fn into_partial_key(self) -> Result<PartialKey> {
        let mut path = Vec::with_capacity(self.path.len());
        for element in self.path {
            let identifier = match (element.id, element.name) {
                (Some(_), Some(_)) => {
                    return Err(Error::Parse(
                        "path element has both id and name".to_string(),
                    ));
                }
                (Some(id), None) => Some(Identifier::Id(id)),
                (None, Some(name)) => Some(Identifier::Name(name)),
                (None, None) => None,
            };
            path.push(Ancestor::unvalidated(element.kind, identifier));
        }
        PartialKey::from_parts(self.dataset, self.namespace.unwrap_or_default(), path).map_err(
            |e| match e {
                Error::Validation(msg) => Error::Parse(msg),
                other => other,
            },
        )
    }
}

/// Serialize a key into its binary wire form
///
/// # Errors
///
/// Returns `Error::Encoding` if serialization fails; not expected for any
/// well-formed key.
pub fn encode(key: &PartialKey) -> Result<Vec<u8>> {
    bincode::serialize(&WireKey::from(key)).map_err(|e| Error::Encoding(e.to_string()))
}

/// Parse a key from its binary wire form
///
/// # Errors
///
/// Returns `Error::Parse` if the bytes are not a well-formed, structurally
/// valid key message.
pub fn decode(bytes: &[u8]) -> Result<PartialKey> {
    let message: WireKey = bincode::deserialize(bytes)?;
    message.into_partial_key()
}
