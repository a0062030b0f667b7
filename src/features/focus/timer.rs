//! The live focus timer and its one-second tick schedule.

use std::time::{Duration as StdDuration, Instant};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::session::{percent_complete, SessionDraft};
use crate::features::planner::{Category, Task};

/// Timer state as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// No timer exists
    Idle,
    Running,
    Paused,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// The single in-flight timer. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveTimer {
    pub task_id: String,
    pub task_title: String,
    pub category: Category,
    pub target_seconds: u64,
    pub elapsed_seconds: u64,
    pub is_running: bool,
    pub session_start: DateTime<Utc>,
}

impl ActiveTimer {
    pub(crate) fn for_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            category: task.category,
            target_seconds: task.target_seconds(),
            elapsed_seconds: 0,
            is_running: true,
            session_start: now,
        }
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        if self.is_running {
            TimerState::Running
        } else {
            TimerState::Paused
        }
    }

    /// Elapsed time as a Duration.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::seconds(i64::try_from(self.elapsed_seconds).unwrap_or(i64::MAX))
    }

    /// Time left until the target; zero once it is reached.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        let left = self.target_seconds.saturating_sub(self.elapsed_seconds);
        Duration::seconds(i64::try_from(left).unwrap_or(i64::MAX))
    }

    /// Progress towards the target, 0-100.
    #[must_use]
    pub const fn percent_complete(&self) -> u32 {
        percent_complete(self.elapsed_seconds, self.target_seconds)
    }

    /// Whether the planned duration has been reached.
    #[must_use]
    pub const fn target_reached(&self) -> bool {
        self.elapsed_seconds >= self.target_seconds
    }

    pub(crate) fn draft(&self) -> SessionDraft {
        SessionDraft {
            task_id: self.task_id.clone(),
            task_title: self.task_title.clone(),
            category: self.category,
            start_time: self.session_start,
            elapsed_seconds: self.elapsed_seconds,
            target_seconds: self.target_seconds,
        }
    }
}

/// Periodic one-second callback, modelled as a schedule the event loop
/// polls.
///
/// The schedule is armed when a timer starts running and cancelled the
/// moment it stops running, so a paused or finished timer never receives
/// ticks.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    interval: StdDuration,
    next_due: Option<Instant>,
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::every(StdDuration::from_secs(1))
    }
}

impl TickSchedule {
    /// A schedule firing every `interval`.
    #[must_use]
    pub const fn every(interval: StdDuration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Start ticking from `now`. Re-arming restarts the period.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Stop ticking.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm or cancel so the schedule matches whether the timer runs.
    pub fn sync(&mut self, running: bool, now: Instant) {
        match (running, self.is_armed()) {
            (true, false) => self.arm(now),
            (false, true) => self.cancel(),
            _ => {}
        }
    }

    /// Number of ticks that have come due by `now`, advancing the schedule
    /// past them.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };

        let mut ticks = 0;
        while next <= now {
            ticks += 1;
            next += self.interval;
        }
        self.next_due = Some(next);
        ticks
    }

    /// Time until the next tick, if armed.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Option<StdDuration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Format a duration as MM:SS (HH:MM:SS past an hour).
#[must_use]
pub fn format_duration_clock(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Compact minute count for summaries: `45m`, `2h`, `1h 15m`.
#[must_use]
pub fn format_minutes(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Bar of `width` cells with `part / whole` of them filled.
///
/// `part` is capped at `whole`; an empty `whole` draws an empty bar.
#[must_use]
pub fn render_progress_bar(part: u64, whole: u64, width: usize) -> String {
    let filled = if whole == 0 {
        0
    } else {
        let cells = u64::try_from(width).unwrap_or(u64::MAX);
        usize::try_from(part.min(whole).saturating_mul(cells) / whole).unwrap_or(width)
    };

    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}
