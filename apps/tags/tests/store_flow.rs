//! Integration tests driving the tags list through a `Store`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use row_bindings_core::presentation::PresentationAction;
use row_bindings_runtime::Store;
use row_bindings_testing::{RecordingDismiss, init_test_tracing};
use std::sync::Arc;
use std::time::Duration;
use tags::{
    DestinationAction, InMemoryTagRepository, TagRepository, TagsEnvironment, TagsListAction,
    TagsListAlertAction, TagsListReducer, TagsListState,
};

type TagsStore = Store<TagsListState, TagsListAction, TagsEnvironment, TagsListReducer>;

fn setup() -> (TagsStore, InMemoryTagRepository, RecordingDismiss) {
    init_test_tracing();
    let repository = InMemoryTagRepository::seeded();
    let dismiss = RecordingDismiss::new();
    let env = TagsEnvironment::new(Arc::new(repository.clone()), Arc::new(dismiss.clone()));
    let state = TagsListState::from_repository(&repository);
    (Store::new(state, TagsListReducer::new(), env), repository, dismiss)
}

#[tokio::test]
async fn test_direct_confirmation_deletes_and_dismisses() {
    let (store, repository, dismiss) = setup();
    let user = repository.list()[4].key;

    let mut handle = store
        .send(TagsListAction::ConfirmDeletion { key: user })
        .await
        .unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .expect("dismiss effect should complete");

    assert_eq!(dismiss.count(), 1);
    assert!(repository.fetch(user).is_err());
    assert!(!store.state(|s| s.tags.contains(&user)).await);
}

#[tokio::test]
async fn test_alert_confirmation_does_not_dismiss_host() {
    let (store, repository, dismiss) = setup();
    let user = repository.list()[4].key;

    store
        .send(TagsListAction::DeleteButtonTapped {
            key: user,
            name: "User Tag".to_string(),
        })
        .await
        .unwrap();
    assert!(store.state(|s| s.alert().is_some()).await);

    let mut handle = store
        .send(TagsListAction::Destination(PresentationAction::Presented(
            DestinationAction::Alert(TagsListAlertAction::ConfirmDeletion { key: user }),
        )))
        .await
        .unwrap();
    handle.wait().await;

    assert!(store.state(|s| s.destination.is_none()).await);
    assert!(repository.fetch(user).is_err());
    assert_eq!(dismiss.count(), 0);
}

#[tokio::test]
async fn test_concurrent_adds_all_land() {
    let (store, repository, _dismiss) = setup();

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store.send(TagsListAction::AddButtonTapped).await.map(|_| ())
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(repository.len(), 15);
    assert_eq!(store.state(|s| s.tags.len()).await, 15);
    let orderings: Vec<i64> = repository.list().iter().map(|tag| tag.ordering).collect();
    assert_eq!(orderings, (0..15).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_shutdown_after_session() {
    let (store, _repository, dismiss) = setup();
    let key = store.state(|s| s.tags[4].key).await;

    let _ = store
        .send(TagsListAction::ConfirmDeletion { key })
        .await
        .unwrap();
    store.shutdown(Duration::from_secs(1)).await.unwrap();

    assert_eq!(dismiss.count(), 1);
    assert!(store.send(TagsListAction::FetchTags).await.is_err());
}
