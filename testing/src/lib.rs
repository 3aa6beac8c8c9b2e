//! # Row Bindings Testing
//!
//! Testing utilities and helpers for the Row Bindings reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A given/when/then harness for reducers
//! - Assertion helpers for effects
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use row_bindings_testing::{ReducerTest, mocks::RecordingDismiss};
//!
//! #[test]
//! fn confirm_deletes_tag() {
//!     ReducerTest::new(TagsListReducer::new())
//!         .with_env(test_environment())
//!         .given_state(TagsListState::default())
//!         .when_action(TagsListAction::ConfirmDeletion { key })
//!         .then_state(move |state| assert!(!state.tags.contains(&key)))
//!         .run();
//! }
//! ```

use row_bindings_core::environment::Dismiss;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::Dismiss;
    use futures::future::BoxFuture;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Dismiss implementation that counts calls
    ///
    /// Clones share the counter, so a test can keep one handle and give the
    /// other to the environment.
    ///
    /// # Example
    ///
    /// ```
    /// use row_bindings_core::environment::Dismiss;
    /// use row_bindings_testing::mocks::RecordingDismiss;
    ///
    /// let dismiss = RecordingDismiss::new();
    /// let observer = dismiss.clone();
    /// futures::executor::block_on(dismiss.dismiss());
    /// assert_eq!(observer.count(), 1);
    /// ```
    #[derive(Debug, Clone, Default)]
    pub struct RecordingDismiss {
        calls: Arc<AtomicUsize>,
    }

    impl RecordingDismiss {
        /// Create a recorder with no calls
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of times `dismiss` ran
        #[must_use]
        pub fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Dismiss for RecordingDismiss {
        fn dismiss(&self) -> BoxFuture<'_, ()> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
            })
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a test-friendly tracing subscriber
    ///
    /// Output goes through the test writer so it is captured per test.
    /// Honors `RUST_LOG`, defaulting to `debug`. Safe to call from every
    /// test: only the first call installs the subscriber.
    pub fn init_test_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

pub mod reducer_test;

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::RecordingDismiss;
pub use reducer_test::{ReducerTest, assertions};
