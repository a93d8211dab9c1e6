//! Configuration for the mibsync tool.

use serde::Deserialize;

use crate::error::{Result, SyncError};

/// Top-level sync configuration.
///
/// Loaded from the `[sync]` section of `mibsync.toml` or
/// `MIBSYNC__SYNC__` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// MIB file to read and rewrite in place.
    #[serde(default = "default_mib_path")]
    pub mib_path: String,

    /// Root of the alert plugin-schema tree.
    #[serde(default = "default_alert_dir")]
    pub alert_dir: String,

    /// Extension of alert files under `alert_dir`.
    #[serde(default = "default_alert_extension")]
    pub alert_extension: String,

    /// Check-schema attributes registered as object-types, in order.
    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,

    /// JSON message descriptor replacing the built-in check-schema one.
    #[serde(default)]
    pub descriptor_path: Option<String>,
}

impl SyncConfig {
    /// Load `<file_prefix>.toml` (optional) and environment overrides.
    ///
    /// A missing `[sync]` section falls back to defaults.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("MIBSYNC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        match cfg.get::<SyncConfig>("sync") {
            Ok(c) => Ok(c),
            Err(config::ConfigError::NotFound(_)) => Ok(SyncConfig::default()),
            Err(e) => Err(SyncError::Config(e.to_string())),
        }
    }
}

fn default_mib_path() -> String {
    "NEW-MIB".to_string()
}

fn default_alert_dir() -> String {
    "/home/nutanix/ncc/plugin_config/plugin_schema/".to_string()
}

fn default_alert_extension() -> String {
    "json".to_string()
}

fn default_attributes() -> Vec<String> {
    vec!["title".to_string(), "severity".to_string()]
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            mib_path: default_mib_path(),
            alert_dir: default_alert_dir(),
            alert_extension: default_alert_extension(),
            attributes: default_attributes(),
            descriptor_path: None,
        }
    }
}
