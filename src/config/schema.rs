use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// On-disk marker for a UUID that has not been resolved yet.
pub const UUID_NOT_SET: &str = "notset";

/// Client configuration as persisted on disk.
///
/// Example:
/// ```yaml
/// tel: "+15550001111"
/// uuid: notset
/// server: https://textsecure-service.whispersystems.org:443
/// verificationType: sms
/// storageDir: .storage
/// loglevel: info
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Our telephone number.
    /// Example: tel: "+15550001111"
    pub tel: String,
    /// Our account UUID; `None` until it has been looked up.
    /// `Some("notset")` cannot be written, since it would read back as `None`.
    /// Example: uuid: notset
    #[serde(with = "uuid_field")]
    pub uuid: Option<String>,
    /// The TextSecure server URL.
    /// Example: server: https://textsecure-service.whispersystems.org:443
    pub server: String,
    /// PEM certificate used to validate the server's TLS chain.
    #[serde(rename = "rootCA")]
    pub root_ca: String,
    /// HTTP proxy URL, if one is being used.
    /// Example: proxy: http://127.0.0.1:8080
    #[serde(rename = "proxy")]
    pub proxy_server: String,
    /// Code verification method during registration (sms, voice, dev).
    /// Example: verificationType: sms
    #[serde(rename = "verificationType")]
    pub verification_type: String,
    /// Directory for the persistent session and key storage.
    /// Example: storageDir: .storage
    #[serde(rename = "storageDir")]
    pub storage_dir: String,
    /// Store keys and session state in plaintext (development only).
    #[serde(rename = "unencryptedStorage")]
    pub unencrypted_storage: bool,
    /// Passphrase protecting the storage.
    #[serde(rename = "storagePassword")]
    pub storage_password: String,
    /// Log verbosity (trace, debug, info, warn, error).
    /// Example: loglevel: info
    #[serde(rename = "loglevel")]
    pub log_level: String,
    /// Override for the default HTTP User-Agent header.
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    /// Skip warnings when a peer's identity key changes.
    #[serde(rename = "alwaysTrustPeerID")]
    pub always_trust_peer_id: bool,
    /// Features advertised to the server as supported by this account.
    #[serde(rename = "accountCapabilities")]
    pub account_capabilities: AccountCapabilities,
    /// Whether the account can be found by its phone number.
    #[serde(rename = "discoverableByPhoneNumber")]
    pub discoverable_by_phone_number: bool,
    /// Key encrypting profile metadata (name, avatar).
    #[serde(rename = "profileKey")]
    pub profile_key: Vec<u8>,
    /// Profile display name.
    pub name: String,
}

impl Config {
    pub fn uuid_is_set(&self) -> bool {
        self.uuid.is_some()
    }
}

/// Account capability flags sent to the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccountCapabilities {
    pub uuid: bool,
    pub gv2: bool,
    pub storage: bool,
    #[serde(rename = "gv1-migration")]
    pub gv1_migration: bool,
    #[serde(rename = "senderKey")]
    pub sender_key: bool,
    #[serde(rename = "announcementGroup")]
    pub announcement_group: bool,
    #[serde(rename = "changeNumber")]
    pub change_number: bool,
    pub stories: bool,
    #[serde(rename = "giftBadges")]
    pub gift_badges: bool,
}

/// Maps `Option<String>` to the `"notset"` convention used by existing config files.
mod uuid_field {
    use super::*;

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value.as_deref() {
            Some(UUID_NOT_SET) => Err(serde::ser::Error::custom(
                "uuid \"notset\" is reserved for an unresolved UUID",
            )),
            Some(uuid) => serializer.serialize_str(uuid),
            None => serializer.serialize_str(UUID_NOT_SET),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|value| value != UUID_NOT_SET))
    }
}
