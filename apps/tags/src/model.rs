//! Tag records.

use row_bindings_core::identified::Identifiable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tag
///
/// Stable for the lifetime of the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagKey(Uuid);

impl TagKey {
    /// Key of the built-in `All` tag
    pub const ALL: Self = Self::from_u128(0);

    /// Creates a new random `TagKey`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a fixed key, used for built-in tags
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl Default for TagKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, orderable label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub key: TagKey,
    /// Display rank, ascending
    pub ordering: i64,
    /// Display name
    pub name: String,
    /// Built-in tags cannot be renamed or deleted
    pub ubiquitous: bool,
}

impl Tag {
    /// Creates a tag record
    #[must_use]
    pub fn new(key: TagKey, ordering: i64, name: impl Into<String>, ubiquitous: bool) -> Self {
        Self {
            key,
            ordering,
            name: name.into(),
            ubiquitous,
        }
    }

    /// Whether this is a built-in tag
    #[must_use]
    pub const fn is_ubiquitous(&self) -> bool {
        self.ubiquitous
    }

    /// Whether a user created this tag
    #[must_use]
    pub const fn is_user_defined(&self) -> bool {
        !self.ubiquitous
    }
}

impl Identifiable for Tag {
    type Id = TagKey;

    fn id(&self) -> TagKey {
        self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_key_is_fixed() {
        assert_eq!(TagKey::ALL, TagKey::from_u128(0));
        assert_eq!(TagKey::ALL.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn random_keys_differ() {
        assert_ne!(TagKey::new(), TagKey::new());
    }

    #[test]
    fn user_defined_is_inverse_of_ubiquitous() {
        let tag = Tag::new(TagKey::new(), 4, "User Tag", false);
        assert!(tag.is_user_defined());
        assert!(!tag.is_ubiquitous());
        assert_eq!(tag.id(), tag.key);
    }
}
