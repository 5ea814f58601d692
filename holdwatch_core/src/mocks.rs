//! Test and helper mocks for holdwatch_core

use holdwatch_traits::{ChangeHandler, DataStore, StoreError, SubscriptionId};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// A store that accepts subscriptions but never delivers anything and rejects
/// every append; useful for exercising the degraded write path.
#[derive(Debug, Default)]
pub struct RejectingStore {
    next_id: AtomicU64,
    unsubscribed: AtomicU64,
}

impl RejectingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `unsubscribe` calls received.
    pub fn unsubscribe_calls(&self) -> u64 {
        self.unsubscribed.load(Ordering::Relaxed)
    }
}

impl DataStore for RejectingStore {
    fn subscribe(&self, _path: &str, _handler: ChangeHandler) -> Result<SubscriptionId, StoreError> {
        Ok(SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }

    fn unsubscribe(&self, _id: SubscriptionId) {
        self.unsubscribed.fetch_add(1, Ordering::Relaxed);
    }

    fn append(&self, path: &str, _record: Map<String, Value>) -> Result<String, StoreError> {
        Err(StoreError::PermissionDenied(path.to_string()))
    }
}
