//! Owned registration with the data store.
//!
//! A `Subscription` releases its store listener exactly once: on the first
//! `stop()` or, failing that, on drop. Further `stop()` calls are no-ops.

use holdwatch_traits::{ChangeHandler, DataStore, StoreError, SubscriptionId};
use std::sync::Arc;

pub struct Subscription {
    store: Arc<dyn DataStore>,
    path: String,
    id: Option<SubscriptionId>,
}

impl Subscription {
    /// Register `handler` on `path`. The store may invoke the handler before
    /// this returns with the path's current value.
    pub fn start(
        store: Arc<dyn DataStore>,
        path: &str,
        handler: ChangeHandler,
    ) -> Result<Self, StoreError> {
        let id = store.subscribe(path, handler)?;
        tracing::debug!(path, id = id.0, "subscribed");
        Ok(Self {
            store,
            path: path.to_string(),
            id: Some(id),
        })
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.id.take() {
            self.store.unsubscribe(id);
            tracing::debug!(path = %self.path, id = id.0, "unsubscribed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("path", &self.path)
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}
