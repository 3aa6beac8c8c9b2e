//! Tags feature built on Row Bindings reducers.
//!
//! Three reducers cooperate:
//!
//! - [`TagsListReducer`]: the list of tags with selection, add, swipe-to-delete
//!   behind a confirmation, and a long-press editor sheet
//! - [`TagsEditorReducer`]: the editor sheet; add, delete, reorder and commit
//!   renames
//! - [`TagNameEditorReducer`]: one row of the editor; name and focus bindings
//!
//! All three read and write tags through the [`TagRepository`] in their
//! [`TagsEnvironment`].
//!
//! # Quick Start
//!
//! ```no_run
//! use row_bindings_runtime::Store;
//! use std::sync::Arc;
//! use tags::{LogDismiss, TagsConfig, TagsEnvironment, TagsListAction, TagsListReducer, TagsListState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TagsConfig::from_env()?;
//! let env = TagsEnvironment::from_config(&config, Arc::new(LogDismiss));
//! let state = TagsListState::from_repository(env.repository.as_ref());
//! let store = Store::new(state, TagsListReducer::new(), env);
//!
//! store.send(TagsListAction::AddButtonTapped).await?;
//!
//! let names = store.state(|s| s.names().join(", ")).await;
//! println!("Tags: {names}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod model;
pub mod repository;
pub mod tag_name_editor;
pub mod tags_editor;
pub mod tags_list;

// Re-export commonly used types
pub use config::{ConfigError, SeedTag, TagsConfig};
pub use environment::{ActiveTagMarker, LogDismiss, TagsEnvironment};
pub use model::{Tag, TagKey};
pub use repository::{InMemoryTagRepository, RepositoryError, TagRepository};
pub use tag_name_editor::{
    TagNameEditorAction, TagNameEditorReducer, TagNameEditorState, TagNameEditorStateBinding,
};
pub use tags_editor::{TagsEditorAction, TagsEditorReducer, TagsEditorState};
pub use tags_list::{
    DeleteTagAlert, Destination, DestinationAction, DestinationReducer, TagsListAction,
    TagsListAlertAction, TagsListReducer, TagsListState,
};
