//! Integration tests for the tags list, editor and row reducers together.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use row_bindings_core::identified::IdentifiedAction;
use row_bindings_core::presentation::PresentationAction;
use row_bindings_core::reducer::Reducer;
use row_bindings_testing::init_test_tracing;
use std::collections::BTreeSet;
use std::sync::Arc;
use tags::{
    DestinationAction, InMemoryTagRepository, LogDismiss, SeedTag, TagKey, TagNameEditorAction,
    TagNameEditorStateBinding, TagRepository, TagsEditorAction, TagsEnvironment, TagsListAction,
    TagsListReducer, TagsListState,
};

// ============================================================================
// Helpers
// ============================================================================

struct Harness {
    reducer: TagsListReducer,
    state: TagsListState,
    env: TagsEnvironment,
}

impl Harness {
    fn with_seed(seed: &[SeedTag]) -> Self {
        init_test_tracing();
        let env = TagsEnvironment::new(
            Arc::new(InMemoryTagRepository::from_seed(seed)),
            Arc::new(LogDismiss),
        );
        Self {
            reducer: TagsListReducer::new(),
            state: TagsListState::from_repository(env.repository.as_ref()),
            env,
        }
    }

    fn seeded() -> Self {
        Self::with_seed(&tags::config::default_seed())
    }

    fn send(&mut self, action: TagsListAction) {
        let _ = self.reducer.reduce(&mut self.state, action, &self.env);
    }

    fn edit(&mut self, action: TagsEditorAction) {
        self.send(TagsListAction::Destination(PresentationAction::Presented(
            DestinationAction::Edit(action),
        )));
    }

    fn editor_keys(&self) -> Vec<TagKey> {
        self.state.editor().expect("editor is presented").keys()
    }

    fn repository_names(&self) -> Vec<(String, i64)> {
        self.env
            .repository
            .list()
            .into_iter()
            .map(|tag| (tag.name, tag.ordering))
            .collect()
    }
}

fn offsets(values: &[usize]) -> BTreeSet<usize> {
    values.iter().copied().collect()
}

fn rename(key: TagKey, name: &str) -> TagsEditorAction {
    TagsEditorAction::Rows(IdentifiedAction::element(
        key,
        TagNameEditorAction::Binding(TagNameEditorStateBinding::Name(name.to_string())),
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_add_then_move_to_top() {
    let mut harness =
        Harness::with_seed(&[SeedTag::ubiquitous("All"), SeedTag::ubiquitous("Built-In")]);

    harness.send(TagsListAction::AddButtonTapped);
    assert_eq!(
        harness.repository_names(),
        vec![
            ("All".to_string(), 0),
            ("Built-In".to_string(), 1),
            ("New Tag".to_string(), 2),
        ]
    );

    harness.send(TagsListAction::LongPressGestureFired);
    harness.edit(TagsEditorAction::TagMoved {
        at: offsets(&[2]),
        to: 0,
    });
    assert_eq!(
        harness.repository_names(),
        vec![
            ("New Tag".to_string(), 0),
            ("All".to_string(), 1),
            ("Built-In".to_string(), 2),
        ]
    );

    harness.send(TagsListAction::CancelEditButtonTapped);
    assert_eq!(harness.state.names(), vec!["New Tag", "All", "Built-In"]);
}

#[test]
fn test_multi_row_delete_only_deletes_first_tag() {
    let mut harness = Harness::seeded();

    harness.send(TagsListAction::LongPressGestureFired);
    harness.edit(TagsEditorAction::AddButtonTapped);
    harness.edit(TagsEditorAction::AddButtonTapped);
    let keys = harness.editor_keys();
    let (first, second) = (keys[5], keys[6]);

    harness.edit(TagsEditorAction::DeleteButtonTapped(offsets(&[5, 6])));

    // Both rows leave the editor...
    let keys = harness.editor_keys();
    assert!(!keys.contains(&first));
    assert!(!keys.contains(&second));
    // ...but only the first tag leaves the repository
    assert!(harness.env.repository.fetch(first).is_err());
    assert!(harness.env.repository.fetch(second).is_ok());

    harness.send(TagsListAction::CancelEditButtonTapped);
    assert!(harness.state.tags.contains(&second));
}

#[test]
fn test_done_leaves_list_stale_until_fetch() {
    let mut harness = Harness::seeded();
    let user = harness.state.tags[4].key;

    harness.send(TagsListAction::LongPressGestureFired);
    harness.edit(TagsEditorAction::AddButtonTapped);
    harness.edit(rename(user, "Errands"));
    harness.edit(TagsEditorAction::TagNameChanged);
    harness.send(TagsListAction::DoneEditingButtonTapped);

    assert!(harness.state.destination.is_none());
    assert_eq!(harness.state.tags.len(), 5);
    assert_eq!(harness.state.names()[4], "User Tag");

    harness.send(TagsListAction::FetchTags);
    assert_eq!(harness.state.tags.len(), 6);
    assert_eq!(harness.state.names()[4], "Errands");
}

#[test]
fn test_cancel_refreshes_list() {
    let mut harness = Harness::seeded();

    harness.send(TagsListAction::LongPressGestureFired);
    harness.edit(TagsEditorAction::AddButtonTapped);
    harness.send(TagsListAction::CancelEditButtonTapped);

    assert!(harness.state.destination.is_none());
    assert_eq!(harness.state.tags.len(), 6);
    assert_eq!(harness.state.names()[5], "New Tag");
}

#[test]
fn test_uncommitted_rename_is_lost() {
    let mut harness = Harness::seeded();
    let user = harness.state.tags[4].key;

    harness.send(TagsListAction::LongPressGestureFired);
    harness.edit(rename(user, "Errands"));
    harness.send(TagsListAction::CancelEditButtonTapped);

    assert_eq!(harness.state.names()[4], "User Tag");
}

#[test]
fn test_ubiquitous_name_survives_commit() {
    let mut harness = Harness::seeded();

    harness.send(TagsListAction::LongPressGestureFired);
    harness.edit(rename(TagKey::ALL, "Everything"));
    harness.edit(TagsEditorAction::TagNameChanged);
    harness.send(TagsListAction::CancelEditButtonTapped);

    assert_eq!(harness.env.repository.fetch(TagKey::ALL).unwrap().name, "All");
    assert_eq!(harness.state.names()[0], "All");
}

#[test]
fn test_deleting_active_first_tag_falls_back_to_next() {
    let mut harness = Harness::with_seed(&[
        SeedTag::user("Inbox"),
        SeedTag::ubiquitous("Built-In"),
        SeedTag::user("Later"),
    ]);
    let inbox = harness.state.tags[0].key;
    assert_eq!(harness.state.active_tag_key, inbox);

    harness.send(TagsListAction::DeleteButtonTapped {
        key: inbox,
        name: "Inbox".to_string(),
    });
    harness.send(TagsListAction::Destination(PresentationAction::Presented(
        DestinationAction::Alert(tags::TagsListAlertAction::ConfirmDeletion { key: inbox }),
    )));

    assert_eq!(harness.state.active_tag_key, TagKey::from_u128(1));
    assert_eq!(harness.env.active_tag.get(), TagKey::from_u128(1));
    assert!(harness.state.tags.contains(&harness.state.active_tag_key));
}

#[test]
fn test_row_action_for_deleted_row_is_dropped() {
    let mut harness = Harness::seeded();
    let user = harness.state.tags[4].key;

    harness.send(TagsListAction::LongPressGestureFired);
    harness.edit(TagsEditorAction::DeleteButtonTapped(offsets(&[4])));
    harness.edit(rename(user, "Ghost"));
    harness.edit(TagsEditorAction::TagNameChanged);

    assert_eq!(harness.env.repository.len(), 4);
    assert!(harness.repository_names().iter().all(|(name, _)| name != "Ghost"));
}
