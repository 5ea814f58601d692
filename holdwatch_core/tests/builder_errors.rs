use holdwatch_core::error::BuildError;
use holdwatch_core::{Dashboard, StorePaths};
use holdwatch_store::MemoryStore;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn builder_missing_store_yields_typed_build_error() {
    let err = Dashboard::builder()
        // missing with_store()
        .with_paths(StorePaths::default())
        .build()
        .expect_err("should fail with MissingStore");

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::MissingStore) => {}
        other => panic!("expected MissingStore, got: {other:?}"),
    }
}

#[rstest]
#[case("Yog", "Yog")]
#[case("Yog", "/Yog/")]
#[case("plant/holds", "plant/holds/")]
fn builder_rejects_shared_sensor_and_logs_path(#[case] sensor: &str, #[case] logs: &str) {
    let err = Dashboard::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .with_paths(StorePaths {
            sensor: sensor.into(),
            logs: logs.into(),
        })
        .build()
        .expect_err("should fail with InvalidConfig");

    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidConfig(_))
    ));
}

#[rstest]
fn builder_surfaces_store_path_errors() {
    let err = Dashboard::builder()
        .with_store(Arc::new(MemoryStore::new()))
        .with_paths(StorePaths {
            sensor: "plant//sensor".into(),
            logs: "logs".into(),
        })
        .build()
        .expect_err("invalid path should fail");

    assert!(matches!(
        err.downcast_ref::<holdwatch_core::HoldwatchError>(),
        Some(holdwatch_core::HoldwatchError::Store(_))
    ));
}
