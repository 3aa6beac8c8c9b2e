//! Dependencies shared by the tags reducers.

use crate::config::TagsConfig;
use crate::model::TagKey;
use crate::repository::{InMemoryTagRepository, TagRepository};
use futures::future::BoxFuture;
use row_bindings_core::environment::Dismiss;
use std::sync::{Arc, PoisonError, RwLock};

/// Process-wide record of the selected tag
///
/// Other parts of the host read it to filter by the active tag. Clones share
/// the same cell.
#[derive(Clone, Debug)]
pub struct ActiveTagMarker {
    key: Arc<RwLock<TagKey>>,
}

impl ActiveTagMarker {
    /// A marker initially set to `key`
    #[must_use]
    pub fn new(key: TagKey) -> Self {
        Self {
            key: Arc::new(RwLock::new(key)),
        }
    }

    /// The selected tag
    #[must_use]
    pub fn get(&self) -> TagKey {
        *self.key.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Select `key`
    pub fn set(&self, key: TagKey) {
        *self.key.write().unwrap_or_else(PoisonError::into_inner) = key;
    }
}

impl Default for ActiveTagMarker {
    fn default() -> Self {
        Self::new(TagKey::ALL)
    }
}

/// `Dismiss` that only logs, for hosts without a presentation layer
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDismiss;

impl Dismiss for LogDismiss {
    fn dismiss(&self) -> BoxFuture<'_, ()> {
        Box::pin(async {
            tracing::info!("Dismiss requested");
        })
    }
}

/// Environment for [`TagsListReducer`](crate::tags_list::TagsListReducer)
/// and its children
#[derive(Clone)]
pub struct TagsEnvironment {
    /// Tag storage
    pub repository: Arc<dyn TagRepository>,
    /// Process-wide selected tag
    pub active_tag: ActiveTagMarker,
    /// Closes the current presentation layer
    pub dismiss: Arc<dyn Dismiss>,
    /// Name given to newly added tags
    pub new_tag_name: String,
}

impl TagsEnvironment {
    /// Creates a new `TagsEnvironment`
    ///
    /// The active tag marker starts at the repository's first tag.
    #[must_use]
    pub fn new(repository: Arc<dyn TagRepository>, dismiss: Arc<dyn Dismiss>) -> Self {
        let active = repository.first().map_or(TagKey::ALL, |tag| tag.key);
        Self {
            repository,
            active_tag: ActiveTagMarker::new(active),
            dismiss,
            new_tag_name: TagsConfig::default().new_tag_name,
        }
    }

    /// Environment over a repository seeded from `config`
    #[must_use]
    pub fn from_config(config: &TagsConfig, dismiss: Arc<dyn Dismiss>) -> Self {
        let repository = Arc::new(InMemoryTagRepository::from_seed(&config.seed));
        Self::new(repository, dismiss).with_new_tag_name(config.new_tag_name.clone())
    }

    /// Use `name` for newly added tags
    #[must_use]
    pub fn with_new_tag_name(mut self, name: impl Into<String>) -> Self {
        self.new_tag_name = name.into();
        self
    }
}

impl std::fmt::Debug for TagsEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagsEnvironment")
            .field("tags", &self.repository.len())
            .field("active_tag", &self.active_tag.get())
            .field("new_tag_name", &self.new_tag_name)
            .finish_non_exhaustive()
    }
}
