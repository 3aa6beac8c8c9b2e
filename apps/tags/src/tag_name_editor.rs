//! One editable row of the tags editor.

use crate::environment::TagsEnvironment;
use crate::model::{Tag, TagKey};
use row_bindings_core::binding::BindingReducer;
use row_bindings_core::identified::Identifiable;
use row_bindings_core::{SmallVec, effect::Effect, reducer::Reducer};
use row_bindings_macros::Bindable;

/// State of a tag row
///
/// `key`, `ordering` and `editable` are captured when the row is created
/// and never change. `ordering` is a snapshot, not the live value.
#[derive(Bindable, Clone, Debug, PartialEq, Eq)]
pub struct TagNameEditorState {
    key: TagKey,
    ordering: i64,
    editable: bool,
    /// Name being edited
    #[bindable]
    pub name: String,
    /// Whether the row's text field is focused
    #[bindable]
    pub has_focus: bool,
}

impl TagNameEditorState {
    /// A row for `tag`; built-in tags are not editable
    #[must_use]
    pub fn new(tag: &Tag) -> Self {
        Self {
            key: tag.key,
            ordering: tag.ordering,
            editable: tag.is_user_defined(),
            name: tag.name.clone(),
            has_focus: false,
        }
    }

    /// The tag this row edits
    #[must_use]
    pub const fn key(&self) -> TagKey {
        self.key
    }

    /// Ordering when the row was created
    #[must_use]
    pub const fn ordering(&self) -> i64 {
        self.ordering
    }

    /// Whether the name may change
    #[must_use]
    pub const fn editable(&self) -> bool {
        self.editable
    }

    /// Inverse of [`editable`](Self::editable)
    #[must_use]
    pub const fn read_only(&self) -> bool {
        !self.editable
    }
}

impl From<&Tag> for TagNameEditorState {
    fn from(tag: &Tag) -> Self {
        Self::new(tag)
    }
}

impl Identifiable for TagNameEditorState {
    type Id = TagKey;

    fn id(&self) -> TagKey {
        self.key
    }
}

/// Actions of a tag row
#[derive(Clone, Debug, PartialEq)]
pub enum TagNameEditorAction {
    /// A field-level write from the view
    Binding(TagNameEditorStateBinding),
}

/// Reducer for a tag row
///
/// Applies bindings locally. Nothing is persisted until the editor commits.
#[derive(Clone, Copy, Debug)]
pub struct TagNameEditorReducer {
    bindings: BindingReducer<TagNameEditorState, TagNameEditorAction, TagsEnvironment>,
}

impl TagNameEditorReducer {
    /// Creates a new `TagNameEditorReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: BindingReducer::new(extract_binding),
        }
    }
}

fn extract_binding(action: &TagNameEditorAction) -> Option<TagNameEditorStateBinding> {
    match action {
        TagNameEditorAction::Binding(binding) => Some(binding.clone()),
    }
}

impl Default for TagNameEditorReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TagNameEditorReducer {
    type State = TagNameEditorState;
    type Action = TagNameEditorAction;
    type Environment = TagsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match &action {
            TagNameEditorAction::Binding(TagNameEditorStateBinding::Name(name))
                if state.read_only() =>
            {
                tracing::warn!(key = %state.key, name = %name, "Rejected rename of read-only tag");
                return SmallVec::new();
            },
            TagNameEditorAction::Binding(TagNameEditorStateBinding::Name(name)) => {
                tracing::debug!(key = %state.key, name = %name, "Name changed");
            },
            TagNameEditorAction::Binding(TagNameEditorStateBinding::HasFocus(_)) => {},
        }

        self.bindings.reduce(state, action, env)
    }
}
