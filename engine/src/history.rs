//! History list with incremental disclosure.
//!
//! The entry list is a wholesale snapshot replaced per fetch; the expanded
//! set is owned by the user and survives refreshes (ids are stable, entries
//! that disappear simply become inert). Overlapping refreshes are resolved
//! with a monotonically increasing request token: only the most recently
//! issued refresh may apply its result, stale responses are discarded.

use std::collections::HashSet;

use triagem_client::ClientError;
use triagem_types::HistoryEntry;

use crate::notifications::{Notification, NotificationQueue};

/// Token for one issued refresh. Only the latest issued token applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken(u64);

#[derive(Debug, Default)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    expanded: HashSet<String>,
    last_issued: u64,
}

impl HistoryManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip the disclosure state of `id`. Two toggles in a row restore the
    /// original membership. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    /// Issue a token for a refresh that is about to start.
    ///
    /// Issuing a newer token invalidates every earlier in-flight refresh.
    pub fn begin_refresh(&mut self) -> RefreshToken {
        self.last_issued += 1;
        RefreshToken(self.last_issued)
    }

    /// Apply the result of a refresh, unless a newer one superseded it.
    ///
    /// Success replaces the list wholesale and leaves the expanded set
    /// untouched. Failure keeps the previous list and emits one failure
    /// notification. Returns true when a fresh list was applied.
    pub fn complete_refresh(
        &mut self,
        token: RefreshToken,
        result: Result<Vec<HistoryEntry>, ClientError>,
        events: &mut NotificationQueue,
    ) -> bool {
        if token.0 != self.last_issued {
            tracing::debug!(
                token = token.0,
                latest = self.last_issued,
                "Discarding stale history refresh"
            );
            return false;
        }

        match result {
            Ok(entries) => {
                self.entries = entries;
                true
            }
            Err(err) => {
                tracing::warn!("History refresh failed: {err}");
                events.push(Notification::HistoryLoadFailed {
                    message: err.to_string(),
                });
                false
            }
        }
    }
}
