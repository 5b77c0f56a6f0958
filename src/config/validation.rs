//! Field checks for a [`Config`].
//!
//! Nothing in this crate validates on its own: reading, writing, loading
//! and reconciling all accept any config. Callers that want these checks
//! run [`validate_config`] themselves, normally on the result of
//! [`ConfigLoader::load`](crate::config::ConfigLoader::load) or on a read
//! config after [`apply_defaults`](crate::config::apply_defaults).

use crate::config::schema::Config;
use crate::telemetry::tracing::LOG_LEVEL_NAMES;

pub const VERIFICATION_TYPES: [&str; 3] = ["sms", "voice", "dev"];

const PROFILE_KEY_LEN: usize = 32;
const PEM_CERTIFICATE_HEADER: &str = "-----BEGIN CERTIFICATE-----";

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

/// Check a config that has been through defaulting.
pub fn validate_config(config: &Config) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !VERIFICATION_TYPES.contains(&config.verification_type.as_str()) {
        errors.push(ValidationError {
            field: "verificationType".to_string(),
            message: format!(
                "Invalid verification type '{}'",
                config.verification_type
            ),
            suggestion: Some(format!("Use one of: {}", VERIFICATION_TYPES.join(", "))),
        });
    }

    if !is_http_url(&config.server) {
        errors.push(ValidationError {
            field: "server".to_string(),
            message: "Server URL must start with http:// or https://".to_string(),
            suggestion: None,
        });
    }

    if config.storage_dir.trim().is_empty() {
        errors.push(ValidationError {
            field: "storageDir".to_string(),
            message: "Storage directory cannot be empty".to_string(),
            suggestion: Some("Use a path such as .storage".to_string()),
        });
    }

    if !config.proxy_server.is_empty() && !is_http_url(&config.proxy_server) {
        errors.push(ValidationError {
            field: "proxy".to_string(),
            message: "Proxy URL must start with http:// or https://".to_string(),
            suggestion: None,
        });
    }

    validate_log_level(&config.log_level, &mut errors);
    validate_storage(config, &mut warnings);
    validate_identity(config, &mut warnings);

    if config.always_trust_peer_id {
        warnings.push(ValidationWarning {
            field: "alwaysTrustPeerID".to_string(),
            message: "Peer identity changes will not be reported".to_string(),
        });
    }

    if !config.root_ca.is_empty() && !config.root_ca.contains(PEM_CERTIFICATE_HEADER) {
        warnings.push(ValidationWarning {
            field: "rootCA".to_string(),
            message: "Root CA does not look like a PEM certificate".to_string(),
        });
    }

    ValidationResult { errors, warnings }
}

fn validate_log_level(log_level: &str, errors: &mut Vec<ValidationError>) {
    if log_level.is_empty() {
        return;
    }
    let normalized = log_level.to_ascii_lowercase();
    if !LOG_LEVEL_NAMES.contains(&normalized.as_str()) {
        errors.push(ValidationError {
            field: "loglevel".to_string(),
            message: format!("Invalid log level '{log_level}'"),
            suggestion: Some("Use one of: trace, debug, info, warn, error".to_string()),
        });
    }
}

fn validate_storage(config: &Config, warnings: &mut Vec<ValidationWarning>) {
    if config.unencrypted_storage {
        warnings.push(ValidationWarning {
            field: "unencryptedStorage".to_string(),
            message: "Keys and session state are stored in plaintext".to_string(),
        });
    } else if config.storage_password.is_empty() {
        warnings.push(ValidationWarning {
            field: "storagePassword".to_string(),
            message: "Encrypted storage has no password set".to_string(),
        });
    }
}

fn validate_identity(config: &Config, warnings: &mut Vec<ValidationWarning>) {
    if let Some(ref uuid) = config.uuid {
        if uuid::Uuid::parse_str(uuid).is_err() {
            warnings.push(ValidationWarning {
                field: "uuid".to_string(),
                message: format!("UUID '{uuid}' is not well-formed"),
            });
        }
    }

    if !config.tel.is_empty() && !is_e164(&config.tel) {
        warnings.push(ValidationWarning {
            field: "tel".to_string(),
            message: "Phone number should be in +<country code><number> form".to_string(),
        });
    }

    if !config.profile_key.is_empty() && config.profile_key.len() != PROFILE_KEY_LEN {
        warnings.push(ValidationWarning {
            field: "profileKey".to_string(),
            message: format!(
                "Profile key is {} bytes, expected {PROFILE_KEY_LEN}",
                config.profile_key.len()
            ),
        });
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn is_e164(tel: &str) -> bool {
    tel.strip_prefix('+')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}
