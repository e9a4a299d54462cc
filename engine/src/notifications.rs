//! One-shot user-facing notifications.
//!
//! Controllers emit exactly one notification per terminal transition; the
//! presentation layer (toast, status line, whatever the frontend uses) drains
//! the queue and renders them. This keeps the state machines decoupled from
//! any specific notification mechanism.

/// A user-facing event worth surfacing once.
///
/// This is a closed enum - only engine code constructs these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A classification completed; the result view has a fresh outcome.
    ClassificationReady { subject: String },
    /// A classification failed with a user-facing message.
    ClassificationFailed { message: String },
    /// A history refresh failed; the previous list is still shown.
    HistoryLoadFailed { message: String },
}

const CLASSIFY_FAILED_FALLBACK: &str = "Falha ao processar com IA";
const HISTORY_FAILED_FALLBACK: &str = "Falha ao carregar histórico";

impl Notification {
    /// Render the notification as the message the user sees.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ClassificationReady { .. } => "E-mail processado com sucesso!".to_string(),
            Self::ClassificationFailed { message } => non_empty_or(message, CLASSIFY_FAILED_FALLBACK),
            Self::HistoryLoadFailed { message } => non_empty_or(message, HISTORY_FAILED_FALLBACK),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::ClassificationReady { .. })
    }
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

/// Queue of pending notifications, drained by the presentation layer.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    /// Take all pending notifications in emission order, clearing the queue.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
