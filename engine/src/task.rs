//! The classification task state machine.
//!
//! Owns the single [`TaskState`] instance. The controller itself is sync; the
//! network call happens between [`TaskController::try_begin`] and
//! [`TaskController::complete`], driven by the [`crate::App`] on the single
//! control thread. `try_begin` refusing while `Pending` is what enforces the
//! single-in-flight-request invariant.

use triagem_types::{ClassificationOutcome, TaskState};

use crate::notifications::{Notification, NotificationQueue};

#[derive(Debug, Default)]
pub struct TaskController {
    state: TaskState,
}

impl TaskController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Transition to `Pending` unless a request is already in flight.
    ///
    /// Legal from `Idle`, `Succeeded` and `Failed`; returns false (state
    /// unchanged) from `Pending`.
    pub fn try_begin(&mut self) -> bool {
        if self.state.is_pending() {
            tracing::debug!("Submit ignored: a classification is already in flight");
            return false;
        }
        self.state = TaskState::Pending;
        true
    }

    /// Apply a terminal transition and emit its one-shot notification.
    ///
    /// The previous terminal value is replaced wholesale. Returns true when
    /// the transition was a success.
    pub fn complete(
        &mut self,
        result: Result<ClassificationOutcome, String>,
        events: &mut NotificationQueue,
    ) -> bool {
        match result {
            Ok(outcome) => {
                events.push(Notification::ClassificationReady {
                    subject: outcome.subject.clone(),
                });
                self.state = TaskState::Succeeded(outcome);
                true
            }
            Err(message) => {
                events.push(Notification::ClassificationFailed {
                    message: message.clone(),
                });
                self.state = TaskState::Failed(message);
                false
            }
        }
    }
}
