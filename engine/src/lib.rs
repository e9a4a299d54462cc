//! Application state and controllers for Triagem.
//!
//! # Architecture
//!
//! [`App`] aggregates the independent state objects the frontend drives:
//!
//! - the submission draft ([`triagem_types::InputDraft`])
//! - the classification task state machine ([`TaskController`])
//! - the history list with disclosure state ([`HistoryManager`])
//! - the view selection ([`ViewRouter`])
//! - the persisted display preference ([`ThemeStore`])
//! - the one-shot notification queue ([`NotificationQueue`])
//!
//! Execution is single-threaded and event-driven: every mutation happens on
//! the control thread between awaits, so no locking is involved. Remote calls
//! suspend only the flow that issued them.

mod config;
mod export;
mod history;
mod notifications;
mod task;
mod theme;
mod view;

pub use config::{API_URL_ENV, ConfigError, TriagemConfig};
pub use export::mailto_url;
pub use history::{HistoryManager, RefreshToken};
pub use notifications::{Notification, NotificationQueue};
pub use task::TaskController;
pub use theme::{AmbientScheme, NoAmbientScheme, PreferenceError, ThemeStore};
pub use view::ViewRouter;

pub use triagem_client as client;
pub use triagem_types as types;

use triagem_client::retry::RetryPolicy;
use triagem_types::{InputDraft, TaskState, Theme, View};

/// The application aggregate: one instance per running frontend.
#[derive(Debug)]
pub struct App {
    config: TriagemConfig,
    draft: InputDraft,
    task: TaskController,
    history: HistoryManager,
    router: ViewRouter,
    theme: ThemeStore,
    notifications: NotificationQueue,
}

impl App {
    #[must_use]
    pub fn new(config: TriagemConfig, theme: ThemeStore) -> Self {
        Self {
            config,
            draft: InputDraft::new(),
            task: TaskController::new(),
            history: HistoryManager::new(),
            router: ViewRouter::new(),
            theme,
            notifications: NotificationQueue::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TriagemConfig {
        &self.config
    }

    #[must_use]
    pub fn draft(&self) -> &InputDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut InputDraft {
        &mut self.draft
    }

    #[must_use]
    pub fn task_state(&self) -> &TaskState {
        self.task.state()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.router.active()
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Submit the current draft for classification.
    ///
    /// A no-op while a request is pending or when the draft is invalid -
    /// validation never reaches the network layer. On success the result view
    /// is auto-selected and the history refreshed so the fresh record shows
    /// up without a manual reload; on failure the view stays where it is.
    pub async fn submit(&mut self) {
        if !self.draft.is_valid() {
            tracing::debug!("Submit ignored: draft is not valid");
            return;
        }
        if !self.task.try_begin() {
            return;
        }

        let draft = self.draft.clone();
        let result = triagem_client::classify(&self.config.api_base, &draft).await;
        let outcome = result
            .map(|record| record.into_outcome(draft.original_content()))
            .map_err(|err| err.to_string());

        if self.task.complete(outcome, &mut self.notifications) {
            self.router.on_task_succeeded();
            self.refresh_history().await;
        }
    }

    /// Fetch the first page of history, replacing the list wholesale.
    ///
    /// Surfaces a failure exactly once; never retries on its own.
    pub async fn refresh_history(&mut self) {
        let token = self.history.begin_refresh();
        let result =
            triagem_client::fetch_emails(&self.config.api_base, 1, self.config.page_size).await;
        self.history
            .complete_refresh(token, result, &mut self.notifications);
    }

    /// The refresh issued once at startup.
    ///
    /// Unlike [`Self::refresh_history`], the initial load is allowed a
    /// bounded, backed-off retry before surfacing the failure. It never
    /// loops: after the last attempt the error is reported once and further
    /// retries require explicit user action.
    pub async fn initial_load(&mut self) {
        let policy = RetryPolicy::default();
        let token = self.history.begin_refresh();

        let mut retry = 0;
        let result = loop {
            match triagem_client::fetch_emails(&self.config.api_base, 1, self.config.page_size)
                .await
            {
                Ok(entries) => break Ok(entries),
                Err(err) if retry < policy.max_retries => {
                    tracing::warn!(retry, "Initial history load failed, backing off: {err}");
                    tokio::time::sleep(policy.delay_for(retry)).await;
                    retry += 1;
                }
                Err(err) => break Err(err),
            }
        };

        self.history
            .complete_refresh(token, result, &mut self.notifications);
    }

    /// Flip the disclosure state of a history entry.
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        self.history.toggle(id)
    }

    /// Try to switch views; the result view is gated on task state.
    pub fn select_view(&mut self, view: View) -> bool {
        self.router.select(view, self.task.state())
    }

    /// Flip and persist the display preference.
    pub fn toggle_theme(&mut self) -> Result<Theme, PreferenceError> {
        self.theme.toggle()
    }

    /// Drain pending notifications for the presentation layer.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.take()
    }
}
