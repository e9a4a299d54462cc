//! Configuration loading.
//!
//! A small TOML file in the user config dir, with an environment override for
//! the service URL. Everything has a default; a missing file is not an error.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;

use triagem_client::ApiBase;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Environment variable overriding the configured service URL.
pub const API_URL_ENV: &str = "TRIAGEM_API_URL";

/// Raw deserialization shape; resolved into [`TriagemConfig`] at the parse
/// boundary.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_url: Option<String>,
    page_size: Option<u32>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct TriagemConfig {
    pub api_base: ApiBase,
    pub page_size: u32,
}

impl Default for TriagemConfig {
    fn default() -> Self {
        Self {
            api_base: ApiBase::new(DEFAULT_API_URL),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TriagemConfig {
    /// Path of the config file: `<config dir>/triagem/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("triagem").join("config.toml"))
    }

    /// Path of the persisted display preferences, next to the config file.
    #[must_use]
    pub fn preferences_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("triagem").join("preferences.toml"))
    }

    /// Load from the default path; a missing file yields the defaults.
    /// `TRIAGEM_API_URL` overrides the file in either case.
    pub fn load() -> Result<Self, ConfigError> {
        let raw = match Self::path() {
            Some(path) if path.exists() => Self::read_raw(&path)?,
            _ => RawConfig::default(),
        };
        Ok(Self::resolve(raw))
    }

    fn read_raw(path: &Path) -> Result<RawConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn resolve(raw: RawConfig) -> Self {
        let api_url = env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or(raw.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_base: ApiBase::new(api_url),
            page_size: raw.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}
