//! Tag storage
//!
//! The repository is the source of truth for tags. Reducer states hold
//! snapshots and write changes back through [`TagRepository`].

use crate::config::{SeedTag, default_seed};
use crate::model::{Tag, TagKey};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Errors returned by repository writes and lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No tag has this key
    #[error("Tag not found: {0}")]
    NotFound(TagKey),
}

/// Ordered collection of tag records
///
/// Readers always observe the latest write; there are no transactions.
pub trait TagRepository: Send + Sync {
    /// All tags, ascending by `ordering`; ties keep insertion order
    fn list(&self) -> Vec<Tag>;

    /// The tag with `key`
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no tag has `key`.
    fn fetch(&self, key: TagKey) -> Result<Tag, RepositoryError>;

    /// Append a user tag named `name` with `ordering` equal to the current count
    fn create(&self, name: &str) -> Tag;

    /// Remove the tag with `key`; no-op if absent
    fn delete(&self, key: TagKey);

    /// Write a tag's ordering
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no tag has `key`.
    fn set_ordering(&self, key: TagKey, ordering: i64) -> Result<(), RepositoryError>;

    /// Write a tag's name
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no tag has `key`.
    fn rename(&self, key: TagKey, name: &str) -> Result<(), RepositoryError>;

    /// Number of tags
    fn len(&self) -> usize;

    /// Whether there are no tags
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First tag in display order
    fn first(&self) -> Option<Tag> {
        self.list().into_iter().next()
    }
}

/// In-memory tag repository
///
/// Cloning yields another handle to the same records.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTagRepository {
    tags: Arc<RwLock<Vec<Tag>>>,
}

impl InMemoryTagRepository {
    /// An empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard seed: `All`, `Built-In`, `Added`, `External` and `User Tag`
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_seed(&default_seed())
    }

    /// A repository holding `seed` in order
    ///
    /// Built-in tags get the fixed key of their position so that the first
    /// seed entry has [`TagKey::ALL`]; user tags get random keys.
    #[must_use]
    pub fn from_seed(seed: &[SeedTag]) -> Self {
        let tags = seed
            .iter()
            .zip(0_u32..)
            .map(|(entry, index)| {
                let key = if entry.ubiquitous {
                    TagKey::from_u128(u128::from(index))
                } else {
                    TagKey::new()
                };
                Tag::new(key, i64::from(index), entry.name.clone(), entry.ubiquitous)
            })
            .collect();
        Self::from_tags(tags)
    }

    /// A repository holding exactly `tags`
    #[must_use]
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        Self {
            tags: Arc::new(RwLock::new(tags)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Tag>> {
        self.tags.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Tag>> {
        self.tags.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, key: TagKey, apply: impl FnOnce(&mut Tag)) -> Result<(), RepositoryError> {
        let mut tags = self.write();
        let tag = tags
            .iter_mut()
            .find(|tag| tag.key == key)
            .ok_or(RepositoryError::NotFound(key))?;
        apply(tag);
        Ok(())
    }
}

impl TagRepository for InMemoryTagRepository {
    fn list(&self) -> Vec<Tag> {
        let mut tags = self.read().clone();
        tags.sort_by_key(|tag| tag.ordering);
        tags
    }

    fn fetch(&self, key: TagKey) -> Result<Tag, RepositoryError> {
        self.read()
            .iter()
            .find(|tag| tag.key == key)
            .cloned()
            .ok_or(RepositoryError::NotFound(key))
    }

    fn create(&self, name: &str) -> Tag {
        let mut tags = self.write();
        let mut key = TagKey::new();
        while tags.iter().any(|tag| tag.key == key) {
            key = TagKey::new();
        }
        let ordering = i64::try_from(tags.len()).unwrap_or(i64::MAX);
        let tag = Tag::new(key, ordering, name, false);
        tags.push(tag.clone());
        tracing::debug!(key = %tag.key, ordering, name, "Created tag");
        tag
    }

    fn delete(&self, key: TagKey) {
        let mut tags = self.write();
        let before = tags.len();
        tags.retain(|tag| tag.key != key);
        if tags.len() == before {
            tracing::debug!(key = %key, "Delete of missing tag ignored");
        } else {
            tracing::debug!(key = %key, "Deleted tag");
        }
    }

    fn set_ordering(&self, key: TagKey, ordering: i64) -> Result<(), RepositoryError> {
        self.update(key, |tag| tag.ordering = ordering)
    }

    fn rename(&self, key: TagKey, name: &str) -> Result<(), RepositoryError> {
        self.update(key, |tag| tag.name = name.to_string())
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
