//! Core domain types for Triagem.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the application.

mod draft;
mod record;
mod subject;

pub use draft::{FileAttachment, InputDraft, InputMode};
pub use record::{ClassificationOutcome, HistoryEntry};
pub use subject::{
    SUBJECT_GENERIC, SUBJECT_PRODUCTIVE, SUBJECT_UNPRODUCTIVE, fallback_subject,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire label the service uses for a productive email.
pub const LABEL_PRODUCTIVE: &str = "Produtivo";
/// Wire label the service uses for an unproductive email.
pub const LABEL_UNPRODUCTIVE: &str = "Improdutivo";

/// Classification assigned by the remote service.
///
/// The service speaks Portuguese labels; anything outside the two known ones
/// is preserved verbatim in `Other` so it can still be displayed and keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    Productive,
    Unproductive,
    Other(String),
}

impl Classification {
    /// Parse the service's wire label. Exact match only; unknown labels are kept.
    #[must_use]
    pub fn from_wire(label: &str) -> Self {
        match label {
            LABEL_PRODUCTIVE => Self::Productive,
            LABEL_UNPRODUCTIVE => Self::Unproductive,
            other => Self::Other(other.to_string()),
        }
    }

    /// The label as the service spells it.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Productive => LABEL_PRODUCTIVE,
            Self::Unproductive => LABEL_UNPRODUCTIVE,
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Classification {
    fn from(label: String) -> Self {
        Self::from_wire(&label)
    }
}

impl From<Classification> for String {
    fn from(classification: Classification) -> Self {
        classification.as_wire().to_string()
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// State of the single classification task.
///
/// Exactly one instance is live at a time; `Pending` blocks further submits
/// until a terminal transition. Terminal values are replaced wholesale by the
/// next completed submit, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Idle,
    Pending,
    Succeeded(ClassificationOutcome),
    Failed(String),
}

impl TaskState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once there is something worth routing the result view to.
    #[must_use]
    pub fn has_display_value(&self) -> bool {
        !self.is_idle()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&ClassificationOutcome> {
        match self {
            Self::Succeeded(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The two top-level views of the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Submission,
    Result,
}

/// Binary display preference, persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Error)]
#[error("theme must be \"light\" or \"dark\", got {0:?}")]
pub struct ThemeParseError(String);

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ThemeParseError> {
        match value.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeParseError(other.to_string())),
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_parses_known_labels_exactly() {
        assert_eq!(
            Classification::from_wire("Produtivo"),
            Classification::Productive
        );
        assert_eq!(
            Classification::from_wire("Improdutivo"),
            Classification::Unproductive
        );
        // Case matters on the wire
        assert_eq!(
            Classification::from_wire("produtivo"),
            Classification::Other("produtivo".to_string())
        );
    }

    #[test]
    fn classification_round_trips_unknown_labels() {
        let c = Classification::from_wire("Spam");
        assert_eq!(c.as_wire(), "Spam");
    }

    #[test]
    fn task_state_accessors() {
        assert!(TaskState::Idle.is_idle());
        assert!(!TaskState::Idle.has_display_value());
        assert!(TaskState::Pending.is_pending());
        assert!(TaskState::Pending.has_display_value());

        let failed = TaskState::Failed("boom".to_string());
        assert_eq!(failed.failure(), Some("boom"));
        assert!(failed.outcome().is_none());
    }

    #[test]
    fn theme_parse_and_toggle() {
        assert_eq!(Theme::parse("dark").unwrap(), Theme::Dark);
        assert_eq!(Theme::parse(" light ").unwrap(), Theme::Light);
        assert!(Theme::parse("solarized").is_err());
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().as_str(), "dark");
    }
}
