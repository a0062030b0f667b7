//! The focus session state machine.
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!   ^                 |                         |
//!   +---stop/complete-+-------------------------+
//! ```
//!
//! A rejected transition returns [`MypaError::InvalidState`] and leaves the
//! tracker untouched.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use super::session::{classify_stop, percent_complete, FocusSession, Outcome};
use super::stats::FocusStats;
use super::timer::{ActiveTimer, TimerState};
use crate::error::MypaError;
use crate::features::planner::Task;

/// Runs shorter than this are dropped without a trace.
pub const DISCARD_THRESHOLD_SECONDS: u64 = 5;
/// Stopping past this point needs explicit confirmation.
pub const CONFIRMATION_THRESHOLD_SECONDS: u64 = 30;
/// Maximum number of sessions kept in history.
pub const HISTORY_LIMIT: usize = 50;

/// What happened to a finished timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum FoldOutcome {
    /// Too short to record.
    Discarded { elapsed_seconds: u64 },
    /// Prepended to history and folded into stats.
    Recorded(FocusSession),
}

impl FoldOutcome {
    #[must_use]
    pub const fn session(&self) -> Option<&FocusSession> {
        match self {
            Self::Recorded(session) => Some(session),
            Self::Discarded { .. } => None,
        }
    }
}

/// Result of [`SessionTracker::stop`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StopOutcome {
    /// Nothing changed; call again with `confirmed = true` to go through.
    ConfirmationRequired { elapsed_seconds: u64 },
    Finished(FoldOutcome),
}

/// Owns the active timer, the session history and the stats rollup.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    active: Option<ActiveTimer>,
    history: Vec<FocusSession>,
    stats: FocusStats,
}

impl SessionTracker {
    /// An idle tracker with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An idle tracker over previously persisted state. History beyond
    /// [`HISTORY_LIMIT`] is dropped.
    #[must_use]
    pub fn restore(mut history: Vec<FocusSession>, stats: FocusStats) -> Self {
        history.truncate(HISTORY_LIMIT);
        Self {
            active: None,
            history,
            stats,
        }
    }

    #[must_use]
    pub const fn active(&self) -> Option<&ActiveTimer> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &[FocusSession] {
        &self.history
    }

    #[must_use]
    pub const fn stats(&self) -> &FocusStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.active.as_ref().map_or(TimerState::Idle, ActiveTimer::state)
    }

    /// Start a timer for `task`.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::InvalidState`] if any timer is already active.
    pub fn start(&mut self, task: &Task, now: DateTime<Local>) -> Result<&ActiveTimer, MypaError> {
        if let Some(active) = &self.active {
            return Err(MypaError::invalid_state(format!(
                "a timer is already running for \"{}\"",
                active.task_title
            )));
        }

        log::debug!(
            "starting timer for {} ({}s target)",
            task.short_id(),
            task.target_seconds()
        );
        Ok(self
            .active
            .insert(ActiveTimer::for_task(task, now.with_timezone(&Utc))))
    }

    /// Stop whatever is running (confirmed) and start on `task`.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::InvalidState`] if the active timer already
    /// belongs to `task`.
    pub fn switch_to(
        &mut self,
        task: &Task,
        now: DateTime<Local>,
    ) -> Result<Option<FoldOutcome>, MypaError> {
        if self.active.as_ref().is_some_and(|a| a.task_id == task.id) {
            return Err(MypaError::invalid_state(format!(
                "the timer is already on \"{}\"",
                task.title
            )));
        }

        let previous = match self.active.take() {
            Some(timer) => {
                let percent = timer.percent_complete();
                Some(self.fold(&timer, classify_stop(percent), now))
            }
            None => None,
        };
        self.start(task, now)?;
        Ok(previous)
    }

    /// Running -> Paused.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::InvalidState`] unless a timer is running.
    pub fn pause(&mut self) -> Result<(), MypaError> {
        match self.active.as_mut() {
            Some(timer) if timer.is_running => {
                timer.is_running = false;
                log::debug!("paused at {}s", timer.elapsed_seconds);
                Ok(())
            }
            Some(_) => Err(MypaError::invalid_state("the timer is already paused")),
            None => Err(MypaError::invalid_state("no timer is active")),
        }
    }

    /// Paused -> Running.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::InvalidState`] unless a timer is paused.
    pub fn resume(&mut self) -> Result<(), MypaError> {
        match self.active.as_mut() {
            Some(timer) if !timer.is_running => {
                timer.is_running = true;
                log::debug!("resumed at {}s", timer.elapsed_seconds);
                Ok(())
            }
            Some(_) => Err(MypaError::invalid_state("the timer is not paused")),
            None => Err(MypaError::invalid_state("no timer is active")),
        }
    }

    /// Add one second if running. Returns whether time advanced.
    pub fn tick(&mut self) -> bool {
        match self.active.as_mut() {
            Some(timer) if timer.is_running => {
                timer.elapsed_seconds += 1;
                true
            }
            _ => false,
        }
    }

    /// Finish the active timer on `task_id` as completed.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::InvalidState`] if no timer is active for
    /// `task_id`.
    pub fn complete(
        &mut self,
        task_id: &str,
        now: DateTime<Local>,
    ) -> Result<FoldOutcome, MypaError> {
        let timer = match self.active.take() {
            Some(timer) if timer.task_id == task_id => timer,
            other => {
                self.active = other;
                return Err(MypaError::invalid_state(format!(
                    "no active timer for task {task_id}"
                )));
            }
        };

        Ok(self.fold(&timer, Outcome::Completed, now))
    }

    /// Stop the active timer, classifying it by how far it got.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::InvalidState`] if no timer is active.
    pub fn stop(&mut self, confirmed: bool, now: DateTime<Local>) -> Result<StopOutcome, MypaError> {
        let elapsed_seconds = match &self.active {
            Some(timer) => timer.elapsed_seconds,
            None => return Err(MypaError::invalid_state("no timer is active")),
        };

        if elapsed_seconds > CONFIRMATION_THRESHOLD_SECONDS && !confirmed {
            return Ok(StopOutcome::ConfirmationRequired { elapsed_seconds });
        }

        let Some(timer) = self.active.take() else {
            return Err(MypaError::invalid_state("no timer is active"));
        };
        let outcome = classify_stop(percent_complete(timer.elapsed_seconds, timer.target_seconds));
        Ok(StopOutcome::Finished(self.fold(&timer, outcome, now)))
    }

    fn fold(&mut self, timer: &ActiveTimer, outcome: Outcome, now: DateTime<Local>) -> FoldOutcome {
        if timer.elapsed_seconds < DISCARD_THRESHOLD_SECONDS {
            log::debug!("discarded {}s run on {}", timer.elapsed_seconds, timer.task_id);
            return FoldOutcome::Discarded {
                elapsed_seconds: timer.elapsed_seconds,
            };
        }

        let today = now.date_naive();
        let session = timer.draft().finish(outcome, today);

        self.history.insert(0, session.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.stats.fold(&session, today);

        log::info!(
            "recorded {} session on \"{}\": {}s, {}%",
            outcome,
            session.task_title,
            session.elapsed_seconds,
            session.percent_complete
        );
        FoldOutcome::Recorded(session)
    }
}
