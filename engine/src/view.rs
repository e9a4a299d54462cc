//! View selection between submission and result.

use triagem_types::{TaskState, View};

/// Selects which of the two views is active.
///
/// The result view is only reachable once the task state holds something
/// worth displaying (a pending request or a terminal value); the submission
/// view is always reachable.
#[derive(Debug, Default)]
pub struct ViewRouter {
    active: View,
}

impl ViewRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active(&self) -> View {
        self.active
    }

    /// Try to select a view. Returns false when the selection is rejected
    /// (result view while the task is idle).
    pub fn select(&mut self, view: View, task: &TaskState) -> bool {
        match view {
            View::Submission => {
                self.active = View::Submission;
                true
            }
            View::Result => {
                if task.has_display_value() {
                    self.active = View::Result;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Auto-select the result view after a successful classification.
    /// Failures keep the current view.
    pub fn on_task_succeeded(&mut self) {
        self.active = View::Result;
    }
}
