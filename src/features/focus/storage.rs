//! Focus history and stats persistence.
//!
//! History and stats are stored as two JSON documents. Failures on either
//! side are logged and absorbed: reads fall back to empty state and writes
//! report `false`.

use super::session::FocusSession;
use super::stats::FocusStats;
use super::tracker::SessionTracker;
use crate::storage::{load_or_default, save_logged, KeyValueStore};

/// Key holding the session history, newest first.
pub const HISTORY_KEY: &str = "mypa.focus.history";
/// Key holding the stats rollup.
pub const STATS_KEY: &str = "mypa.focus.stats";

/// Storage for focus history and stats.
pub struct FocusStorage<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> FocusStorage<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn load_history(&self) -> Vec<FocusSession> {
        load_or_default(self.store, HISTORY_KEY)
    }

    #[must_use]
    pub fn load_stats(&self) -> FocusStats {
        load_or_default(self.store, STATS_KEY)
    }

    /// An idle tracker over the persisted history and stats.
    #[must_use]
    pub fn load_tracker(&self) -> SessionTracker {
        SessionTracker::restore(self.load_history(), self.load_stats())
    }

    /// Write the tracker's history and stats. Returns whether both writes
    /// went through.
    pub fn persist(&self, tracker: &SessionTracker) -> bool {
        let history = save_logged(self.store, HISTORY_KEY, tracker.history());
        let stats = save_logged(self.store, STATS_KEY, tracker.stats());
        history && stats
    }
}
