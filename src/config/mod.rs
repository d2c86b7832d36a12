use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to config.toml - computed, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub shadow: ShadowConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

// ── Gateway ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

const fn default_port() -> u16 {
    8742
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ── Shadow store ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowConfig {
    /// Base URL of the device-shadow data plane, e.g.
    /// `https://shadow.example.com`. Overridable via `NIDO_SHADOW_ENDPOINT`.
    #[serde(default = "default_shadow_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_shadow_endpoint() -> String {
    "http://127.0.0.1:9443".into()
}

const fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            endpoint: default_shadow_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// ── Local store (directory + telemetry) ───────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite file holding the provisioned `user_devices` table and the
    /// `device_samples` telemetry log.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    default_config_dir().join("nido.db")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".nido"))
        .unwrap_or_else(|| PathBuf::from(".nido"))
}

impl Config {
    /// Load config from `path`, or from the default location when `None`.
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_config_dir().join("config.toml"));

        let mut config = if config_path.exists() {
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Self>(&raw)
                .map_err(|e| ConfigError::Load(format!("{}: {e}", config_path.display())))?
        } else {
            Self::default()
        };
        config.config_path = config_path;

        // Environment override takes priority over the file.
        if let Ok(endpoint) = std::env::var("NIDO_SHADOW_ENDPOINT") {
            let endpoint = endpoint.trim();
            if !endpoint.is_empty() {
                config.shadow.endpoint = endpoint.to_owned();
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.shadow.endpoint.is_empty() {
            return Err(ConfigError::Validation("shadow.endpoint is empty".into()));
        }
        if self.shadow.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "shadow.request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
