use async_trait::async_trait;
use tracing::debug;

use super::error::ConfigError;
use super::schema::Config;

pub const DEFAULT_SERVER: &str = "https://textsecure-service.whispersystems.org:443";
pub const DEFAULT_VERIFICATION_TYPE: &str = "sms";
pub const DEFAULT_STORAGE_DIR: &str = ".storage";

/// Client-provided source of the initial configuration.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn get_config(&self) -> anyhow::Result<Config>;
}

/// Fetches a config from a [`ConfigSource`] and fills unset fields.
pub struct ConfigLoader<S> {
    source: S,
}

impl<S: ConfigSource> ConfigLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch the config and apply defaults. Source errors are returned unchanged.
    pub async fn load(&self) -> Result<Config, ConfigError> {
        let mut config = self
            .source
            .get_config()
            .await
            .map_err(ConfigError::Upstream)?;
        apply_defaults(&mut config);
        Ok(config)
    }
}

/// Fill empty `server`, `verification_type` and `storage_dir` fields.
///
/// Only empty fields are touched, so applying this twice is a no-op.
pub fn apply_defaults(config: &mut Config) {
    fill_if_empty(&mut config.server, "server", DEFAULT_SERVER);
    fill_if_empty(
        &mut config.verification_type,
        "verificationType",
        DEFAULT_VERIFICATION_TYPE,
    );
    fill_if_empty(&mut config.storage_dir, "storageDir", DEFAULT_STORAGE_DIR);
}

fn fill_if_empty(value: &mut String, field: &'static str, default: &str) {
    if value.is_empty() {
        debug!(field, default, "Using default value");
        *value = default.to_string();
    }
}
