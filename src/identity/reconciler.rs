use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::debug;

use crate::config::{Config, ConfigError, ConfigStore, UUID_NOT_SET};

/// Remote directory call returning our own account UUID.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn my_uuid(&self) -> anyhow::Result<String>;
}

/// What a single reconciliation attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The UUID was already set; no lookup was made.
    AlreadySet,
    /// The lookup succeeded and the UUID was filled in.
    Resolved(String),
    /// The lookup returned an error; the UUID is still unset.
    Failed(String),
    /// The lookup panicked; the UUID is still unset.
    Panicked(String),
}

impl ReconcileOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Back-fills [`Config::uuid`] from an [`IdentityLookup`].
///
/// Lookup failures are never returned to the caller: the config comes back
/// with `uuid` still `None`, and a later call may try again.
///
/// The config is mutated in place with no locking. A config shared between
/// tasks must be guarded by the caller (or use [`IdentityReconciler::reconciled`]
/// on a snapshot and swap it in), otherwise a concurrent writer may persist
/// either the old or the new UUID.
pub struct IdentityReconciler<L> {
    lookup: L,
}

impl<L: IdentityLookup> IdentityReconciler<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Fill `config.uuid` if it is unset. Never fails and never panics
    /// because of the lookup.
    pub async fn reconcile(&self, config: &mut Config) -> ReconcileOutcome {
        if config.uuid.is_some() {
            return ReconcileOutcome::AlreadySet;
        }
        debug!("Missing own UUID, looking it up");

        let lookup = AssertUnwindSafe(async { self.lookup.my_uuid().await })
            .catch_unwind()
            .await;
        match lookup {
            Ok(Ok(uuid)) if uuid == UUID_NOT_SET => {
                debug!("Own UUID lookup returned the unset marker");
                ReconcileOutcome::Failed(format!("lookup returned \"{UUID_NOT_SET}\""))
            }
            Ok(Ok(uuid)) => {
                debug!(uuid = %uuid, "Resolved own UUID");
                config.uuid = Some(uuid.clone());
                ReconcileOutcome::Resolved(uuid)
            }
            Ok(Err(err)) => {
                debug!(error = %err, "Own UUID lookup failed");
                ReconcileOutcome::Failed(err.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                debug!(panic = %message, "Own UUID lookup panicked");
                ReconcileOutcome::Panicked(message)
            }
        }
    }

    /// Snapshot variant of [`reconcile`](Self::reconcile): takes the config by
    /// value and returns it, resolved or not.
    pub async fn reconciled(&self, mut config: Config) -> Config {
        self.reconcile(&mut config).await;
        config
    }

    /// Read the config from `store`, then try once to fill in the UUID.
    ///
    /// Only the read can fail. The result is not written back.
    pub async fn read(&self, store: &ConfigStore) -> Result<Config, ConfigError> {
        let config = store.read()?;
        Ok(self.reconciled(config).await)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
