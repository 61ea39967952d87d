//! File-backed structured logging.
//!
//! The terminal belongs to the UI, so events go to `log_path` as JSON lines.

use crate::config::TuiConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid log filter: {0}")]
    Filter(String),
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Build the filter: `RUST_LOG` wins over the configured default.
pub fn env_filter(default_filter: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|err| LoggingError::Filter(err.to_string())),
    }
}

pub fn init(config: &TuiConfig) -> Result<(), LoggingError> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| LoggingError::Open {
                path: config.log_path.clone(),
                source,
            })?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .map_err(|source| LoggingError::Open {
            path: config.log_path.clone(),
            source,
        })?;

    tracing_subscriber::registry()
        .with(env_filter(&config.log_filter)?)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|err| LoggingError::Init(err.to_string()))
}
