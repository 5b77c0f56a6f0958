use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use textsecure_config::config::{Config, ConfigError, ConfigStore};
use textsecure_config::identity::{IdentityLookup, IdentityReconciler, ReconcileOutcome};

#[derive(Clone, Default)]
struct StubLookup {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl IdentityLookup for StubLookup {
    async fn my_uuid(&self) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("abc-123".to_string())
    }
}

struct FailingLookup;

#[async_trait]
impl IdentityLookup for FailingLookup {
    async fn my_uuid(&self) -> anyhow::Result<String> {
        anyhow::bail!("not registered")
    }
}

struct UnsetLookup;

#[async_trait]
impl IdentityLookup for UnsetLookup {
    async fn my_uuid(&self) -> anyhow::Result<String> {
        Ok("notset".to_string())
    }
}

struct PanickingLookup;

#[async_trait]
impl IdentityLookup for PanickingLookup {
    async fn my_uuid(&self) -> anyhow::Result<String> {
        panic!("directory client not initialized")
    }
}

#[tokio::test]
async fn test_set_uuid_is_left_alone_without_lookup() {
    let reconciler = IdentityReconciler::new(StubLookup::default());
    let mut config = Config {
        uuid: Some("existing".to_string()),
        ..Config::default()
    };
    let before = config.clone();

    let outcome = reconciler.reconcile(&mut config).await;

    assert_eq!(outcome, ReconcileOutcome::AlreadySet);
    assert_eq!(config, before);
}

#[tokio::test]
async fn test_set_uuid_makes_no_remote_call() {
    let lookup = StubLookup::default();
    let reconciler = IdentityReconciler::new(lookup.clone());
    let config = Config {
        uuid: Some("existing".to_string()),
        ..Config::default()
    };

    reconciler.reconciled(config).await;
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unset_uuid_is_resolved() {
    let reconciler = IdentityReconciler::new(StubLookup::default());
    let mut config = Config::default();

    let outcome = reconciler.reconcile(&mut config).await;

    assert_eq!(outcome, ReconcileOutcome::Resolved("abc-123".to_string()));
    assert_eq!(config.uuid.as_deref(), Some("abc-123"));
}

#[tokio::test]
async fn test_lookup_error_leaves_uuid_unset() {
    let reconciler = IdentityReconciler::new(FailingLookup);
    let config = Config {
        tel: "+15550001111".to_string(),
        ..Config::default()
    };

    let mut reconciled = config.clone();
    let outcome = reconciler.reconcile(&mut reconciled).await;

    assert_eq!(outcome, ReconcileOutcome::Failed("not registered".to_string()));
    assert_eq!(reconciled, config);
}

#[tokio::test]
async fn test_lookup_panic_is_contained() {
    let reconciler = IdentityReconciler::new(PanickingLookup);

    let config = reconciler.reconciled(Config::default()).await;
    assert!(config.uuid.is_none());

    let mut config = Config::default();
    let outcome = reconciler.reconcile(&mut config).await;
    assert_eq!(
        outcome,
        ReconcileOutcome::Panicked("directory client not initialized".to_string())
    );
}

#[tokio::test]
async fn test_failed_reconcile_can_be_retried() {
    let mut config = Config::default();

    IdentityReconciler::new(FailingLookup)
        .reconcile(&mut config)
        .await;
    assert!(config.uuid.is_none());

    IdentityReconciler::new(StubLookup::default())
        .reconcile(&mut config)
        .await;
    assert_eq!(config.uuid.as_deref(), Some("abc-123"));
}

#[tokio::test]
async fn test_read_resolves_uuid_without_writing_back() {
    let temp = tempfile::tempdir().unwrap();
    let store = ConfigStore::with_path(temp.path().join("config.yml"));
    store.write(&Config::default()).unwrap();

    let reconciler = IdentityReconciler::new(StubLookup::default());
    let config = reconciler.read(&store).await.unwrap();

    assert_eq!(config.uuid.as_deref(), Some("abc-123"));
    assert!(store.read().unwrap().uuid.is_none());
}

#[tokio::test]
async fn test_read_surfaces_store_errors() {
    let temp = tempfile::tempdir().unwrap();
    let store = ConfigStore::with_path(temp.path().join("missing.yml"));

    let reconciler = IdentityReconciler::new(StubLookup::default());
    let err = reconciler.read(&store).await.unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[tokio::test]
async fn test_lookup_returning_unset_marker_is_a_failure() {
    let reconciler = IdentityReconciler::new(UnsetLookup);
    let mut config = Config::default();

    let outcome = reconciler.reconcile(&mut config).await;

    assert!(matches!(outcome, ReconcileOutcome::Failed(_)));
    assert!(config.uuid.is_none());
}
