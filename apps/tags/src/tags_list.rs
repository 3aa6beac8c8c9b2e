//! The tags list screen
//!
//! Shows every tag, tracks the active one and presents at most one
//! destination above the list: a delete confirmation or the editor sheet.
//!
//! # Flows
//!
//! - Swipe-to-delete opens [`Destination::Alert`]. Confirming deletes the
//!   tag and closes the alert; cancelling only closes it.
//! - Long press opens [`Destination::Edit`] over the visible tags. Cancel
//!   closes it and re-fetches. Done closes it without re-fetching, so the
//!   list shows the pre-edit snapshot until the next
//!   [`TagsListAction::FetchTags`].

use crate::environment::TagsEnvironment;
use crate::model::{Tag, TagKey};
use crate::repository::TagRepository;
use crate::tags_editor::{TagsEditorAction, TagsEditorReducer, TagsEditorState};
use row_bindings_core::composition::{CasePath, IfLetReducer, if_let};
use row_bindings_core::identified::IdentifiedVec;
use row_bindings_core::presentation::{AlertState, ButtonRole, ButtonState, PresentationAction};
use row_bindings_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Actions carried by the delete confirmation's buttons
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagsListAlertAction {
    /// Delete the tag with `key`
    ConfirmDeletion {
        /// Tag to delete
        key: TagKey,
    },
}

/// Constructors for tags list alerts
pub trait DeleteTagAlert {
    /// Confirmation for deleting the tag `key` named `name`
    fn delete_tag(key: TagKey, name: &str) -> Self;
}

impl DeleteTagAlert for AlertState<TagsListAlertAction> {
    fn delete_tag(key: TagKey, name: &str) -> Self {
        Self::new("Delete?")
            .message(format!("Are you sure you want to delete tag \"{name}\"?"))
            .button(ButtonState::new(
                "Yes",
                ButtonRole::Destructive,
                TagsListAlertAction::ConfirmDeletion { key },
            ))
            .button(ButtonState::cancel("No"))
    }
}

/// What is presented above the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Delete confirmation
    Alert(AlertState<TagsListAlertAction>),
    /// Editor sheet
    Edit(TagsEditorState),
}

impl Destination {
    /// Whether this is the delete confirmation
    #[must_use]
    pub const fn is_alert(&self) -> bool {
        matches!(self, Self::Alert(_))
    }

    /// The editor state, if the editor is presented
    #[must_use]
    pub const fn as_edit(&self) -> Option<&TagsEditorState> {
        match self {
            Self::Edit(editor) => Some(editor),
            Self::Alert(_) => None,
        }
    }

    /// The alert, if the confirmation is presented
    #[must_use]
    pub const fn as_alert(&self) -> Option<&AlertState<TagsListAlertAction>> {
        match self {
            Self::Alert(alert) => Some(alert),
            Self::Edit(_) => None,
        }
    }
}

/// Actions of the presented destination
#[derive(Clone, Debug, PartialEq)]
pub enum DestinationAction {
    /// A button of the delete confirmation
    Alert(TagsListAlertAction),
    /// An editor action
    Edit(TagsEditorAction),
}

/// Routes destination actions to the presented child
///
/// Alerts have no reducer; their actions are handled by the list.
#[derive(Clone, Debug, Default)]
pub struct DestinationReducer {
    edit: TagsEditorReducer,
}

impl Reducer for DestinationReducer {
    type State = Destination;
    type Action = DestinationAction;
    type Environment = TagsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match (state, action) {
            (Destination::Edit(editor), DestinationAction::Edit(action)) => self
                .edit
                .reduce(editor, action, env)
                .into_iter()
                .map(|effect| effect.map(DestinationAction::Edit))
                .collect(),
            (Destination::Alert(_), DestinationAction::Alert(_)) => SmallVec::new(),
            (state, action) => {
                tracing::warn!(
                    presented_alert = state.is_alert(),
                    ?action,
                    "Destination action does not match the presented destination"
                );
                SmallVec::new()
            },
        }
    }
}

/// State of the tags list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagsListState {
    /// Visible tags, ascending by ordering as of the last fetch
    pub tags: IdentifiedVec<Tag>,
    /// Selected tag
    pub active_tag_key: TagKey,
    /// What is presented above the list, if anything
    pub destination: Option<Destination>,
}

impl TagsListState {
    /// A list showing `tags` with `active_tag_key` selected
    #[must_use]
    pub fn new(tags: impl IntoIterator<Item = Tag>, active_tag_key: TagKey) -> Self {
        Self {
            tags: IdentifiedVec::from_elements(tags),
            active_tag_key,
            destination: None,
        }
    }

    /// A list of the repository's tags with the first one selected
    #[must_use]
    pub fn from_repository(repository: &dyn TagRepository) -> Self {
        let tags = repository.list();
        let active = tags.first().map_or(TagKey::ALL, |tag| tag.key);
        Self::new(tags, active)
    }

    /// The presented editor, if any
    #[must_use]
    pub fn editor(&self) -> Option<&TagsEditorState> {
        self.destination.as_ref().and_then(Destination::as_edit)
    }

    /// The presented delete confirmation, if any
    #[must_use]
    pub fn alert(&self) -> Option<&AlertState<TagsListAlertAction>> {
        self.destination.as_ref().and_then(Destination::as_alert)
    }

    /// Names of the visible tags, in order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.name.as_str()).collect()
    }
}

/// Actions of the tags list
#[derive(Clone, Debug, PartialEq)]
pub enum TagsListAction {
    /// Create a tag and re-fetch
    AddButtonTapped,
    /// Close the editor and re-fetch
    CancelEditButtonTapped,
    /// Delete a tag and dismiss the presentation layer
    ConfirmDeletion {
        /// Tag to delete
        key: TagKey,
    },
    /// Ask for confirmation before deleting
    DeleteButtonTapped {
        /// Tag to delete
        key: TagKey,
        /// Name shown in the confirmation
        name: String,
    },
    /// An action for or about the presented destination
    Destination(PresentationAction<DestinationAction>),
    /// Close the editor
    DoneEditingButtonTapped,
    /// Reload the visible tags from the repository
    FetchTags,
    /// Open the editor
    LongPressGestureFired,
    /// Select a tag
    TagButtonTapped {
        /// Tag to select
        key: TagKey,
    },
}

impl TagsListAction {
    fn destination(&self) -> Option<PresentationAction<DestinationAction>> {
        match self {
            Self::Destination(action) => Some(action.clone()),
            _ => None,
        }
    }
}

/// List-level handling; destination routing is added by [`TagsListReducer`]
#[derive(Clone, Copy, Debug, Default)]
struct TagsListCore;

impl TagsListCore {
    fn add_tag(state: &mut TagsListState, env: &TagsEnvironment) {
        let tag = env.repository.create(&env.new_tag_name);
        tracing::debug!(key = %tag.key, "Added tag");
        Self::fetch_tags(state, env);
    }

    fn fetch_tags(state: &mut TagsListState, env: &TagsEnvironment) {
        state.tags = IdentifiedVec::from_elements(env.repository.list());
        tracing::debug!(count = state.tags.len(), "Fetched tags");
    }

    fn select(state: &mut TagsListState, key: TagKey, env: &TagsEnvironment) {
        state.active_tag_key = key;
        env.active_tag.set(key);
    }

    /// Removes `key` from the list and the repository
    ///
    /// An active `key` hands the selection to the first remaining tag.
    fn delete_tag(state: &mut TagsListState, key: TagKey, env: &TagsEnvironment) {
        if env.repository.fetch(key).is_ok_and(|tag| tag.is_ubiquitous()) {
            tracing::warn!(key = %key, "Rejected delete of ubiquitous tag");
            return;
        }

        if state.active_tag_key == key {
            let fallback = env
                .repository
                .list()
                .into_iter()
                .find(|tag| tag.key != key)
                .map_or(TagKey::ALL, |tag| tag.key);
            tracing::debug!(key = %key, fallback = %fallback, "Deleted tag was active");
            Self::select(state, fallback, env);
        }

        state.tags.retain(|tag| tag.key != key);
        env.repository.delete(key);
        tracing::debug!(key = %key, "Deleted tag");
    }
}

impl Reducer for TagsListCore {
    type State = TagsListState;
    type Action = TagsListAction;
    type Environment = TagsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TagsListAction::AddButtonTapped => {
                Self::add_tag(state, env);
                SmallVec::new()
            },

            TagsListAction::CancelEditButtonTapped => {
                state.destination = None;
                Self::fetch_tags(state, env);
                SmallVec::new()
            },

            TagsListAction::ConfirmDeletion { key } => {
                Self::delete_tag(state, key, env);
                let dismiss = Arc::clone(&env.dismiss);
                smallvec![async_effect! {
                    dismiss.dismiss().await;
                    None::<TagsListAction>
                }]
            },

            TagsListAction::DeleteButtonTapped { key, name } => {
                if state.tags.get(&key).is_some_and(Tag::is_ubiquitous) {
                    tracing::warn!(key = %key, "Ignored delete request for ubiquitous tag");
                } else {
                    tracing::debug!(key = %key, name = %name, "Confirming deletion");
                    state.destination = Some(Destination::Alert(AlertState::delete_tag(key, &name)));
                }
                SmallVec::new()
            },

            TagsListAction::Destination(PresentationAction::Presented(
                DestinationAction::Alert(TagsListAlertAction::ConfirmDeletion { key }),
            )) => {
                if state.alert().is_some() {
                    Self::delete_tag(state, key, env);
                } else {
                    tracing::warn!(key = %key, "Ignored deletion confirmed without an alert");
                }
                SmallVec::new()
            },

            TagsListAction::Destination(_) => SmallVec::new(),

            TagsListAction::DoneEditingButtonTapped => {
                state.destination = None;
                SmallVec::new()
            },

            TagsListAction::FetchTags => {
                Self::fetch_tags(state, env);
                SmallVec::new()
            },

            TagsListAction::LongPressGestureFired => {
                state.destination = Some(Destination::Edit(TagsEditorState::new(&state.tags)));
                SmallVec::new()
            },

            TagsListAction::TagButtonTapped { key } => {
                tracing::debug!(key = %key, "Selected tag");
                Self::select(state, key, env);
                SmallVec::new()
            },
        }
    }
}

/// Reducer for the tags list
///
/// Presented destination actions run through [`DestinationReducer`] first;
/// any action sent while the alert is presented closes it.
#[derive(Clone, Debug)]
pub struct TagsListReducer {
    inner: IfLetReducer<TagsListCore, DestinationReducer>,
}

impl TagsListReducer {
    /// Creates a new `TagsListReducer`
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: if_let(
                TagsListCore,
                DestinationReducer::default(),
                |state: &mut TagsListState| &mut state.destination,
                CasePath::new(TagsListAction::destination, TagsListAction::Destination),
            )
            .ephemeral_when(Destination::is_alert),
        }
    }
}

impl Default for TagsListReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TagsListReducer {
    type State = TagsListState;
    type Action = TagsListAction;
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
