use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "textsecure";
const CONFIG_FILE: &str = "config.yml";

/// Platform-specific location of the config file.
pub struct Paths;

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory { path: PathBuf, source: io::Error },
}

impl Paths {
    /// Returns the configuration directory path.
    /// - Linux: ~/.config/textsecure/
    /// - macOS: ~/Library/Application Support/textsecure/
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            dirs::config_dir()
                .or_else(|| {
                    dirs::home_dir().map(|home| home.join("Library").join("Application Support"))
                })
                .unwrap_or_else(|| PathBuf::from("~/Library/Application Support"))
                .join(APP_DIR)
        }

        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir()
                .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
                .unwrap_or_else(|| PathBuf::from(".config"))
                .join(APP_DIR)
        }
    }

    /// Returns the full config file path.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Ensures the config directory exists, owner-only on unix.
    pub fn ensure_config_dir() -> Result<PathBuf, PathError> {
        let dir = Self::config_dir();
        create_private_dir(&dir)?;
        Ok(dir)
    }
}

fn create_private_dir(dir: &Path) -> Result<(), PathError> {
    let to_error = |source| PathError::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    };
    fs::create_dir_all(dir).map_err(to_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700)).map_err(to_error)?;
    }
    Ok(())
}
