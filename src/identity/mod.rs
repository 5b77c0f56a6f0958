//! Resolution of the account UUID after the static config is loaded.

pub mod reconciler;

pub use reconciler::{IdentityLookup, IdentityReconciler, ReconcileOutcome};
