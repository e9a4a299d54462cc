//! Persisted display preference.
//!
//! The theme is initialized once at startup: from the persisted file when
//! present, otherwise from the platform's ambient preference. The ambient
//! read is injected as a port so the store is testable without a real
//! environment. Every toggle persists synchronously.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use triagem_types::Theme;

/// Port for the platform's ambient color-scheme preference.
pub trait AmbientScheme {
    fn prefers_dark(&self) -> bool;
}

/// Ambient scheme that always answers light. Useful default for
/// environments with no detectable preference.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAmbientScheme;

impl AmbientScheme for NoAmbientScheme {
    fn prefers_dark(&self) -> bool {
        false
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Preferences {
    theme: Theme,
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to write preferences to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode preferences")]
    Encode(#[from] toml::ser::Error),
}

/// Loads and persists the binary display preference.
#[derive(Debug)]
pub struct ThemeStore {
    theme: Theme,
    path: PathBuf,
}

impl ThemeStore {
    /// Read the persisted preference, falling back to the ambient scheme
    /// when nothing (or something unreadable) is persisted.
    #[must_use]
    pub fn load(path: PathBuf, ambient: &dyn AmbientScheme) -> Self {
        let persisted = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| match toml::from_str::<Preferences>(&raw) {
                Ok(prefs) => Some(prefs.theme),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Ignoring unreadable preferences: {e}");
                    None
                }
            });

        let theme = persisted.unwrap_or_else(|| {
            if ambient.prefers_dark() {
                Theme::Dark
            } else {
                Theme::Light
            }
        });

        Self { theme, path }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the preference and persist it synchronously.
    ///
    /// Returns the new theme for the presentation layer to apply.
    pub fn toggle(&mut self) -> Result<Theme, PreferenceError> {
        self.theme = self.theme.toggled();
        self.persist()?;
        Ok(self.theme)
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        let encoded = toml::to_string(&Preferences { theme: self.theme })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, encoded).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
