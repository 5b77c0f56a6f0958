//! Configuration schema, persistence and defaulting.

pub mod defaults;
pub mod error;
pub mod paths;
pub mod schema;
pub mod store;
pub mod validation;

pub use defaults::{ConfigLoader, ConfigSource, apply_defaults};
pub use error::ConfigError;
pub use paths::{PathError, Paths};
pub use schema::{AccountCapabilities, Config, UUID_NOT_SET};
pub use store::{ConfigStore, read_config, write_config};
pub use validation::{ValidationError, ValidationResult, ValidationWarning, validate_config};
