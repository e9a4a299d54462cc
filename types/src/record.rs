//! Display models for classification results.

use serde::{Deserialize, Serialize};

use crate::Classification;

/// Normalized result of a successful classification call, ready for display.
///
/// Created once per successful remote call and immutable afterwards; the next
/// successful call supersedes it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationOutcome {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub classification: Classification,
    pub original_content: String,
    pub created_at: String,
}

impl ClassificationOutcome {
    /// Clipboard-ready rendering, matching what the frontend copies.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        format!("Assunto: {}\n\n{}", self.subject, self.body)
    }
}

/// Read-only snapshot of a past classification, as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub subject: String,
    pub classification: Classification,
    pub reply: String,
    pub created_at: String,
}

impl HistoryEntry {
    /// Clipboard-ready rendering of a history item.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        format!("Assunto: {}\n\n{}", self.subject, self.reply)
    }
}
