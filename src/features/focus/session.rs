//! Focus session records.
//!
//! A [`FocusSession`] is the immutable result of one finished timer run.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::planner::Category;

/// Sessions at or above this percentage count as completed when stopped.
pub const COMPLETION_THRESHOLD_PERCENT: u32 = 80;

/// How a finished attempt was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Completed,
    Abandoned,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Abandoned => write!(f, "Abandoned"),
        }
    }
}

/// One persisted focus run against a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: String,
    /// Task the run was attached to; the task may since have been deleted.
    pub task_id: String,
    /// Task title at the time of the run
    pub task_title: String,
    pub category: Category,
    /// Local day the session occurred on
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub elapsed_seconds: u64,
    pub target_seconds: u64,
    pub percent_complete: u32,
    pub was_completed: bool,
    pub was_abandoned: bool,
}

impl FocusSession {
    /// Which of the two flags is set, if any.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        match (self.was_completed, self.was_abandoned) {
            (true, _) => Some(Outcome::Completed),
            (false, true) => Some(Outcome::Abandoned),
            (false, false) => None,
        }
    }

    /// Start time in the local timezone.
    #[must_use]
    pub fn start_time_local(&self) -> DateTime<Local> {
        self.start_time.with_timezone(&Local)
    }

    /// Minutes credited to the stats for this run.
    #[must_use]
    pub fn focus_minutes(&self) -> u64 {
        rounded_minutes(self.elapsed_seconds)
    }
}

/// Fields a finished attempt needs before it becomes a [`FocusSession`].
#[derive(Debug, Clone)]
pub(crate) struct SessionDraft {
    pub task_id: String,
    pub task_title: String,
    pub category: Category,
    pub start_time: DateTime<Utc>,
    pub elapsed_seconds: u64,
    pub target_seconds: u64,
}

impl SessionDraft {
    /// Freeze the draft with the given outcome.
    pub fn finish(self, outcome: Outcome, date: NaiveDate) -> FocusSession {
        FocusSession {
            id: Uuid::new_v4().to_string(),
            percent_complete: percent_complete(self.elapsed_seconds, self.target_seconds),
            task_id: self.task_id,
            task_title: self.task_title,
            category: self.category,
            date,
            start_time: self.start_time,
            elapsed_seconds: self.elapsed_seconds,
            target_seconds: self.target_seconds,
            was_completed: outcome == Outcome::Completed,
            was_abandoned: outcome == Outcome::Abandoned,
        }
    }
}

/// `round(min(elapsed / target, 1) * 100)`, halves rounding up. A zero
/// target counts as done.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn percent_complete(elapsed_seconds: u64, target_seconds: u64) -> u32 {
    if target_seconds == 0 {
        return 100;
    }
    let capped = if elapsed_seconds < target_seconds {
        elapsed_seconds
    } else {
        target_seconds
    };
    ((capped * 200 + target_seconds) / (2 * target_seconds)) as u32
}

/// Outcome of a stopped (not explicitly completed) attempt.
#[must_use]
pub const fn classify_stop(percent: u32) -> Outcome {
    if percent >= COMPLETION_THRESHOLD_PERCENT {
        Outcome::Completed
    } else {
        Outcome::Abandoned
    }
}

/// Seconds to whole minutes, rounding half up.
#[must_use]
pub const fn rounded_minutes(seconds: u64) -> u64 {
    (seconds + 30) / 60
}
