//! Shared TOML loading for the per-module `config/*.toml` files.
use std::{fmt, fs, io, path::Path};

use bevy::prelude::*;
use serde::de::DeserializeOwned;

/// Failure while reading or parsing a config file.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: io::Error },
    Parse { path: String, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "Failed to read {} ({})", path, source),
            Self::Parse { path, source } => write!(f, "Failed to parse {} ({})", path, source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Parses a raw config struct from TOML text.
pub fn parse_toml<T: DeserializeOwned>(path: &str, data: &str) -> Result<T, ConfigError> {
    toml::from_str::<T>(data).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Reads and parses a raw config struct from disk.
pub fn read_toml<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let data = fs::read_to_string(Path::new(path)).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_toml(path, &data)
}

/// Reads `path`, falling back to `T::default()` (with a warning) on any failure.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &str) -> T {
    match read_toml(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("{}. Falling back to defaults.", err);
            T::default()
        }
    }
}
