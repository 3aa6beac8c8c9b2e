//! The tags editing sheet
//!
//! Add, delete and move operations write through to the repository as soon
//! as they happen. Renames stay in the rows until
//! [`TagsEditorAction::TagNameChanged`] commits them.

use crate::environment::TagsEnvironment;
use crate::model::{Tag, TagKey};
use crate::tag_name_editor::{TagNameEditorAction, TagNameEditorReducer, TagNameEditorState};
use row_bindings_core::composition::{CasePath, ForEachReducer, for_each};
use row_bindings_core::identified::{IdentifiedAction, IdentifiedVec};
use row_bindings_core::{SmallVec, effect::Effect, reducer::Reducer};
use std::collections::BTreeSet;

/// State of the tags editor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagsEditorState {
    /// One row per tag, in display order
    pub rows: IdentifiedVec<TagNameEditorState>,
}

impl TagsEditorState {
    /// An editor with a row for each of `tags`
    #[must_use]
    pub fn new<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Self {
        Self {
            rows: tags.into_iter().map(TagNameEditorState::new).collect(),
        }
    }

    /// Keys of the rows, in display order
    #[must_use]
    pub fn keys(&self) -> Vec<TagKey> {
        self.rows.ids()
    }
}

/// Actions of the tags editor
#[derive(Clone, Debug, PartialEq)]
pub enum TagsEditorAction {
    /// Create a tag and append a row for it
    AddButtonTapped,
    /// Swipe-to-delete on the rows at these offsets
    DeleteButtonTapped(BTreeSet<usize>),
    /// An action for one row
    Rows(IdentifiedAction<TagKey, TagNameEditorAction>),
    /// Drag-to-reorder; `to` is an offset into the list before the move
    TagMoved {
        /// Offsets of the dragged rows
        at: BTreeSet<usize>,
        /// Destination offset
        to: usize,
    },
    /// Commit row names to the repository
    TagNameChanged,
}

impl TagsEditorAction {
    fn rows(&self) -> Option<IdentifiedAction<TagKey, TagNameEditorAction>> {
        match self {
            Self::Rows(action) => Some(action.clone()),
            _ => None,
        }
    }
}

/// Editor-level handling; row actions are routed by [`TagsEditorReducer`]
#[derive(Clone, Copy, Debug, Default)]
struct TagsEditorCore;

impl TagsEditorCore {
    fn add_tag(state: &mut TagsEditorState, env: &TagsEnvironment) {
        let tag = env.repository.create(&env.new_tag_name);
        tracing::debug!(key = %tag.key, "Added row");
        state.rows.push(TagNameEditorState::new(&tag));
    }

    /// Removes every editable row at `offsets` but deletes only the first
    /// one's tag from the repository. Read-only rows stay put.
    fn delete_tags(state: &mut TagsEditorState, offsets: &BTreeSet<usize>, env: &TagsEnvironment) {
        let Some(first) = offsets.iter().find_map(|&offset| state.rows.get_index(offset)) else {
            tracing::debug!(?offsets, "Delete ignored, no row at offsets");
            return;
        };

        if first.read_only() {
            tracing::warn!(key = %first.key(), "Rejected delete of read-only tag");
            return;
        }

        let key = first.key();
        let editable: BTreeSet<usize> = offsets
            .iter()
            .copied()
            .filter(|&offset| state.rows.get_index(offset).is_some_and(TagNameEditorState::editable))
            .collect();
        let removed = state.rows.remove_at_offsets(&editable);
        env.repository.delete(key);
        tracing::debug!(key = %key, count = removed.len(), "Deleted rows");
    }

    fn move_tags(
        state: &mut TagsEditorState,
        offsets: &BTreeSet<usize>,
        destination: usize,
        env: &TagsEnvironment,
    ) {
        state.rows.move_elements(offsets, destination);

        for (ordering, row) in (0_i64..).zip(state.rows.iter()) {
            if let Err(error) = env.repository.set_ordering(row.key(), ordering) {
                tracing::warn!(key = %row.key(), %error, "Skipped ordering write");
            }
        }
        tracing::debug!(?offsets, destination, "Moved rows");
    }

    fn save_changes(state: &TagsEditorState, env: &TagsEnvironment) {
        for row in state.rows.iter().filter(|row| row.editable()) {
            if let Err(error) = env.repository.rename(row.key(), &row.name) {
                tracing::warn!(key = %row.key(), %error, "Skipped rename");
            }
        }
        tracing::debug!(count = state.rows.len(), "Committed names");
    }
}

impl Reducer for TagsEditorCore {
    type State = TagsEditorState;
    type Action = TagsEditorAction;
    type Environment = TagsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TagsEditorAction::AddButtonTapped => Self::add_tag(state, env),
            TagsEditorAction::DeleteButtonTapped(offsets) => Self::delete_tags(state, &offsets, env),
            TagsEditorAction::Rows(_) => {},
            TagsEditorAction::TagMoved { at, to } => Self::move_tags(state, &at, to, env),
            TagsEditorAction::TagNameChanged => Self::save_changes(state, env),
        }
        SmallVec::new()
    }
}

/// Reducer for the tags editor
///
/// Row actions go to [`TagNameEditorReducer`] for the addressed row.
#[derive(Clone, Debug)]
pub struct TagsEditorReducer {
    inner: ForEachReducer<TagsEditorCore, TagNameEditorReducer>,
}

impl TagsEditorReducer {
    /// Creates a new `TagsEditorReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: for_each(
                TagsEditorCore,
                TagNameEditorReducer::new(),
                |state: &mut TagsEditorState| &mut state.rows,
                CasePath::new(TagsEditorAction::rows, TagsEditorAction::Rows),
            ),
        }
    }
}

impl Default for TagsEditorReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TagsEditorReducer {
    type State = TagsEditorState;
    type Action = TagsEditorAction;
    type Environment = TagsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}
