use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::TallyConfig;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "tally.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file. Missing sections fall back to defaults.
pub fn read_config(path: &Path) -> Result<TallyConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the session config.
///
/// An explicit path must exist. Otherwise `tally.toml` in `dir` is used when
/// present, and built-in defaults when not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<TallyConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        read_config(&candidate)
    } else {
        Ok(TallyConfig::default())
    }
}
