//! Registry entry records and their identifiers.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use rand::Rng;

use crate::lifecycle::LifecycleBridge;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 26;

/// Random base-36 token. Not cryptographically unique; collisions are ignored.
pub(crate) fn random_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Generated identifier of one registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerId(String);

impl ControllerId {
    pub(crate) fn generate() -> Self {
        Self(random_token())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binds one managed controller to its `(type, tag)` key.
pub(crate) struct RegistryEntry {
    pub(crate) id: ControllerId,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) tag: Option<String>,
    pub(crate) controller: Arc<dyn Any + Send + Sync>,
    pub(crate) bridge: Arc<LifecycleBridge>,
    /// Set while the close hook runs, so the entry is never closed twice.
    pub(crate) closing: bool,
}

impl RegistryEntry {
    pub(crate) fn matches(&self, type_id: TypeId, tag: Option<&str>) -> bool {
        self.type_id == type_id && self.tag.as_deref() == tag
    }

    pub(crate) fn info(&self) -> EntryInfo {
        EntryInfo {
            id: self.id.clone(),
            type_name: self.type_name,
            tag: self.tag.clone(),
        }
    }
}

/// Read-only view of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub id: ControllerId,
    /// Diagnostic only; matching always uses the `TypeId`.
    pub type_name: &'static str,
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = random_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_differ() {
        assert_ne!(ControllerId::generate(), ControllerId::generate());
    }

    #[test]
    fn test_display_matches_as_str() {
        let id = ControllerId::generate();
        assert_eq!(id.to_string(), id.as_str());
    }
}
