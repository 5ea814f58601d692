use holdwatch_core::Subscription;
use holdwatch_core::mocks::RejectingStore;
use holdwatch_store::MemoryStore;
use holdwatch_traits::{ChangeHandler, DataStore};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn counter() -> (ChangeHandler, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    let handler: ChangeHandler = Arc::new(move |_v: Option<Value>| {
        h.fetch_add(1, Ordering::Relaxed);
    });
    (handler, hits)
}

#[test]
fn double_stop_unsubscribes_once() {
    let store = Arc::new(RejectingStore::new());
    let (h, _) = counter();
    let mut sub = Subscription::start(store.clone(), "Yog", h).unwrap();
    assert!(sub.is_active());
    sub.stop();
    sub.stop();
    assert!(!sub.is_active());
    drop(sub);
    assert_eq!(store.unsubscribe_calls(), 1);
}

#[test]
fn stop_halts_delivery() {
    let store = Arc::new(MemoryStore::new());
    let (h, hits) = counter();
    let mut sub = Subscription::start(store.clone(), "Yog", h).unwrap();
    // initial delivery of the (empty) current value
    assert_eq!(hits.load(Ordering::Relaxed), 1);

    store.set("Yog", json!({ "Temperature": 1 })).unwrap();
    assert_eq!(hits.load(Ordering::Relaxed), 2);

    sub.stop();
    store.set("Yog", json!({ "Temperature": 2 })).unwrap();
    assert_eq!(hits.load(Ordering::Relaxed), 2);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn drop_without_stop_releases_listener() {
    let store = Arc::new(MemoryStore::new());
    let (h, _) = counter();
    {
        let _sub = Subscription::start(store.clone(), "logs", h).unwrap();
        assert_eq!(store.subscriber_count(), 1);
    }
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn invalid_path_is_reported() {
    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::new());
    let (h, hits) = counter();
    assert!(Subscription::start(store, "", h).is_err());
    assert_eq!(hits.load(Ordering::Relaxed), 0);
}
