//! Scripted demo of the tags list.
//!
//! Drives a store through a typical session and prints the list after each
//! step. Set `TAGS_CONFIG` to a TOML file or `TAGS_NEW_TAG_NAME` to change
//! the setup, and `RUST_LOG` to change logging.

use anyhow::Context;
use row_bindings_core::identified::IdentifiedAction;
use row_bindings_core::presentation::PresentationAction;
use row_bindings_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tags::{
    DestinationAction, LogDismiss, TagNameEditorAction, TagNameEditorStateBinding, TagsConfig,
    TagsEditorAction, TagsEnvironment, TagsListAction, TagsListAlertAction, TagsListReducer,
    TagsListState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type TagsStore = Store<TagsListState, TagsListAction, TagsEnvironment, TagsListReducer>;

fn editor(action: TagsEditorAction) -> TagsListAction {
    TagsListAction::Destination(PresentationAction::Presented(DestinationAction::Edit(action)))
}

async fn print_list(store: &TagsStore, step: &str) {
    let state = store.state(Clone::clone).await;
    println!("\n{step}");
    for tag in &state.tags {
        let marker = if tag.key == state.active_tag_key { "*" } else { " " };
        let lock = if tag.ubiquitous { " (built-in)" } else { "" };
        println!("  [{marker}] {:>2} {}{lock}", tag.ordering, tag.name);
    }
    if let Some(alert) = state.alert() {
        println!("  alert: {} {}", alert.title, alert.message.as_deref().unwrap_or_default());
    }
    if let Some(editor) = state.editor() {
        let rows: Vec<_> = editor.rows.iter().map(|row| row.name.as_str()).collect();
        println!("  editor: {}", rows.join(" | "));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TagsConfig::from_env().context("loading tags configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("=== Tags Demo ===");

    let env = TagsEnvironment::from_config(&config, Arc::new(LogDismiss));
    let marker = env.active_tag.clone();
    let state = TagsListState::from_repository(env.repository.as_ref());
    let store = Store::new(state, TagsListReducer::new(), env);

    store.send(TagsListAction::FetchTags).await?;
    print_list(&store, "Initial tags").await;

    let second = store
        .state(|s| s.tags.get_index(1).map(|tag| tag.key))
        .await
        .context("seed needs at least two tags")?;
    store.send(TagsListAction::TagButtonTapped { key: second }).await?;
    print_list(&store, &format!("Selected second tag (marker = {})", marker.get())).await;

    store.send(TagsListAction::AddButtonTapped).await?;
    print_list(&store, "Added a tag").await;

    store.send(TagsListAction::LongPressGestureFired).await?;
    print_list(&store, "Opened the editor").await;

    let added = store
        .state(|s| s.tags.as_slice().last().map(|tag| tag.key))
        .await
        .context("list is empty after adding")?;
    let rename = TagNameEditorAction::Binding(TagNameEditorStateBinding::Name("Groceries".into()));
    store
        .send(editor(TagsEditorAction::Rows(IdentifiedAction::element(added, rename))))
        .await?;
    store.send(editor(TagsEditorAction::TagNameChanged)).await?;
    print_list(&store, "Renamed the new tag and committed").await;

    let last = store.state(|s| s.tags.len().saturating_sub(1)).await;
    store
        .send(editor(TagsEditorAction::TagMoved {
            at: [last].into_iter().collect(),
            to: 0,
        }))
        .await?;
    print_list(&store, "Moved it to the top").await;

    store.send(TagsListAction::DoneEditingButtonTapped).await?;
    print_list(&store, "Done (list not refreshed yet)").await;

    store.send(TagsListAction::FetchTags).await?;
    print_list(&store, "Fetched").await;

    let name = store
        .state(|s| s.tags.get(&added).map(|tag| tag.name.clone()))
        .await
        .unwrap_or_default();
    store
        .send(TagsListAction::DeleteButtonTapped { key: added, name })
        .await?;
    print_list(&store, "Asked to delete it").await;

    store
        .send(TagsListAction::Destination(PresentationAction::Presented(
            DestinationAction::Alert(TagsListAlertAction::ConfirmDeletion { key: added }),
        )))
        .await?;
    print_list(&store, "Confirmed").await;

    store
        .shutdown(Duration::from_secs(1))
        .await
        .context("shutting down store")?;

    println!("\n=== Demo Complete ===");
    Ok(())
}
