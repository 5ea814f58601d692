//! In-process realtime store.
//!
//! Holds one JSON value per path. Subscribers get the current value as soon
//! as they subscribe and again after every `set`/`append` on their path.
//! Handlers run on the writer's thread, after the store lock is released.

use holdwatch_traits::{ChangeHandler, DataStore, StoreError, SubscriptionId};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

struct Subscriber {
    id: SubscriptionId,
    path: String,
    handler: ChangeHandler,
}

#[derive(Default)]
struct Inner {
    values: BTreeMap<String, Value>,
    subscribers: Vec<Subscriber>,
    next_sub: u64,
    next_key: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (paths, subs) = self
            .inner
            .lock()
            .map(|g| (g.values.len(), g.subscribers.len()))
            .unwrap_or((0, 0));
        f.debug_struct("MemoryStore")
            .field("paths", &paths)
            .field("subscribers", &subs)
            .finish()
    }
}

/// Strip surrounding slashes; reject empty paths and empty segments.
pub fn normalize_path(path: &str) -> Result<String, StoreError> {
    let p = path.trim_matches('/');
    if p.is_empty() || p.split('/').any(str::is_empty) {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(p.to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    /// Replace the value at `path` (`Value::Null` clears it) and notify subscribers.
    pub fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let path = normalize_path(path)?;
        let current = {
            let mut inner = self.lock()?;
            if value.is_null() {
                inner.values.remove(&path);
            } else {
                inner.values.insert(path.clone(), value);
            }
            inner.values.get(&path).cloned()
        };
        self.notify(&path, current);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<Value> {
        let path = normalize_path(path).ok()?;
        self.lock().ok()?.values.get(&path).cloned()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().map(|g| g.subscribers.len()).unwrap_or(0)
    }

    fn notify(&self, path: &str, value: Option<Value>) {
        let handlers: Vec<ChangeHandler> = match self.lock() {
            Ok(inner) => inner
                .subscribers
                .iter()
                .filter(|s| s.path == path)
                .map(|s| s.handler.clone())
                .collect(),
            Err(e) => {
                tracing::warn!(path, error = %e, "cannot notify subscribers");
                return;
            }
        };
        tracing::trace!(path, subscribers = handlers.len(), "notifying");
        for h in handlers {
            h(value.clone());
        }
    }
}

impl DataStore for MemoryStore {
    fn subscribe(&self, path: &str, handler: ChangeHandler) -> Result<SubscriptionId, StoreError> {
        let path = normalize_path(path)?;
        let (id, current) = {
            let mut inner = self.lock()?;
            let id = SubscriptionId(inner.next_sub);
            inner.next_sub += 1;
            inner.subscribers.push(Subscriber {
                id,
                path: path.clone(),
                handler: handler.clone(),
            });
            (id, inner.values.get(&path).cloned())
        };
        handler(current);
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.subscribers.retain(|s| s.id != id);
        }
    }

    fn append(&self, path: &str, record: Map<String, Value>) -> Result<String, StoreError> {
        let path = normalize_path(path)?;
        let (key, current) = {
            let mut inner = self.lock()?;
            // Zero-padded so lexical key order is append order.
            let key = format!("k{:016x}", inner.next_key);
            inner.next_key += 1;
            let slot = inner
                .values
                .entry(path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            match slot {
                Value::Object(children) => {
                    children.insert(key.clone(), Value::Object(record));
                }
                _ => {
                    return Err(StoreError::Rejected {
                        path,
                        reason: "path holds a non-collection value".to_string(),
                    });
                }
            }
            (key, inner.values.get(&path).cloned())
        };
        self.notify(&path, current);
        Ok(key)
    }
}
