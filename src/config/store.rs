use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Paths;

use super::error::ConfigError;
use super::schema::Config;

/// Reads and writes a [`Config`] as YAML at a fixed path.
///
/// No defaults are applied on read and no locking is done on write. The
/// write truncates the file in place, so a crash mid-write can leave it
/// truncated, and concurrent writers to the same path are last-writer-wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::with_path(Paths::config_file())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the config file. Empty fields are returned as-is.
    pub fn read(&self) -> Result<Config, ConfigError> {
        let bytes = fs::read(&self.path).map_err(|source| ConfigError::io(&self.path, source))?;
        let config =
            serde_yaml::from_slice(&bytes).map_err(|source| ConfigError::Decode {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "Config read");
        Ok(config)
    }

    /// Encode `config` and replace the file contents, owner read/write only.
    pub fn write(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = serde_yaml::to_string(config).map_err(ConfigError::Encode)?;

        let mut file = self.open_private()?;
        file.write_all(contents.as_bytes())
            .map_err(|source| ConfigError::io(&self.path, source))?;

        info!(path = %self.path.display(), "Config persisted");
        Ok(())
    }

    /// Open for writing with the file already restricted to the owner.
    fn open_private(&self) -> Result<File, ConfigError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let file = options
            .open(&self.path)
            .map_err(|source| ConfigError::io(&self.path, source))?;

        // An existing file keeps its old mode through truncate.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|source| ConfigError::io(&self.path, source))?;
        }
        Ok(file)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the config at `path`.
pub fn read_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    ConfigStore::with_path(path.as_ref()).read()
}

/// Write `config` to `path`.
pub fn write_config(path: impl AsRef<Path>, config: &Config) -> Result<(), ConfigError> {
    ConfigStore::with_path(path.as_ref()).write(config)
}
