//! Realtime data store collaborator.

use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Change callback. `None` means the path currently holds no value.
pub type ChangeHandler = Arc<dyn Fn(Option<Value>) + Send + Sync + 'static>;

/// Opaque handle returned by `DataStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("permission denied on path '{0}'")]
    PermissionDenied(String),
    #[error("invalid path '{0}'")]
    InvalidPath(String),
    #[error("store rejected write to '{path}': {reason}")]
    Rejected { path: String, reason: String },
}

/// A realtime tree store: subscribe to a path, append records under a path.
///
/// Implementations deliver the current value to a new subscriber right away and
/// then once per change, in order, for as long as the subscription is live.
pub trait DataStore: Send + Sync {
    fn subscribe(&self, path: &str, handler: ChangeHandler) -> Result<SubscriptionId, StoreError>;

    /// Release a subscription. Unknown or already released ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Append `record` as a new child of `path`, returning the generated key.
    fn append(&self, path: &str, record: Map<String, Value>) -> Result<String, StoreError>;
}
