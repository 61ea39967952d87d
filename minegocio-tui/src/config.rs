//! Configuration loading for the MiNegocio TUI.
//!
//! The config file is optional; every field has a default. The API base URL
//! can be overridden with `MINEGOCIO_API_BASE_URL`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "MINEGOCIO_TUI_CONFIG";
pub const BASE_URL_ENV: &str = "MINEGOCIO_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuiConfig {
    pub api_base_url: String,
    /// Per-request timeout. Absent means the transport default.
    pub request_timeout_ms: Option<u64>,
    pub notification_ttl_ms: u64,
    pub tick_rate_ms: u64,
    pub log_path: PathBuf,
    pub log_filter: String,
    pub persistence_path: PathBuf,
    pub search_policy: SearchPolicy,
    pub startup: StartupConfig,
}

/// What to do with a search response when a newer search was issued after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Apply every response in arrival order.
    #[default]
    LastWriteWins,
    /// Ignore responses of superseded searches.
    LatestOnly,
}

/// Optional search issued once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartupConfig {
    pub empresa_id: Option<String>,
    pub busqueda: Option<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_ms: None,
            notification_ttl_ms: 2_800,
            tick_rate_ms: 250,
            log_path: PathBuf::from("minegocio-tui.log"),
            log_filter: "info".to_string(),
            persistence_path: PathBuf::from(".minegocio-tui.json"),
            search_policy: SearchPolicy::default(),
            startup: StartupConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    /// Load from `--config <path>` or `MINEGOCIO_TUI_CONFIG`, falling back to
    /// defaults, then apply the environment override and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let mut config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env_override(std::env::var(BASE_URL_ENV).ok());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url;
        }
    }

    /// Strip the trailing `/` so paths can be appended verbatim.
    pub fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0 when set".to_string(),
            });
        }
        if self.notification_ttl_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notification_ttl_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.persistence_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "persistence_path",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(empresa_id) = &self.startup.empresa_id {
            if empresa_id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "startup.empresa_id",
                    reason: "must not be empty when set".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
