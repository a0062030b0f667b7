//! Rolling focus statistics.
//!
//! [`FocusStats`] is updated exactly once per persisted session, in
//! [`FocusStats::fold`]. Streaks count consecutive days with a completed
//! session: completing keeps or extends the streak, a low-effort abandon
//! (under 25 %) breaks it, and any other partial attempt leaves it alone.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::session::FocusSession;

/// Abandoned sessions below this percentage reset the current streak.
pub const STREAK_PENALTY_PERCENT: u32 = 25;

/// Per-user focus rollup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusStats {
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub abandoned_sessions: u64,
    pub total_focus_minutes: u64,
    pub current_streak: u32,
    pub best_streak: u32,
    /// Running mean of `percent_complete`, 0-100.
    pub average_completion: u32,
    pub last_session_date: Option<NaiveDate>,
}

impl FocusStats {
    /// Fold one persisted session into the rollup. `today` is the day the
    /// session is recorded on.
    #[allow(clippy::cast_possible_truncation)]
    pub fn fold(&mut self, session: &FocusSession, today: NaiveDate) {
        let sessions_before = self.total_sessions;

        self.total_sessions += 1;
        if session.was_completed {
            self.completed_sessions += 1;
        }
        if session.was_abandoned {
            self.abandoned_sessions += 1;
        }
        self.total_focus_minutes += session.focus_minutes();

        let yesterday = today.checked_sub_days(Days::new(1));
        let is_new_day = self.last_session_date != Some(today);
        let is_consecutive_day = yesterday.is_some() && self.last_session_date == yesterday;

        if session.was_completed {
            self.current_streak = if is_consecutive_day || !is_new_day {
                self.current_streak + 1
            } else {
                1
            };
        } else if session.was_abandoned && session.percent_complete < STREAK_PENALTY_PERCENT {
            self.current_streak = 0;
        }
        self.best_streak = self.best_streak.max(self.current_streak);

        // Mean over the pre-increment count, rounded half up
        let numerator = u64::from(self.average_completion) * sessions_before
            + u64::from(session.percent_complete);
        let denominator = sessions_before + 1;
        self.average_completion = ((numerator * 2 + denominator) / (denominator * 2)) as u32;

        self.last_session_date = Some(today);
    }

    /// Share of persisted sessions that were completed, 0.0-1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_rate(&self) -> f64 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        self.completed_sessions as f64 / self.total_sessions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::session::{Outcome, SessionDraft};
    use crate::features::planner::Category;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    fn session(elapsed: u64, target: u64, outcome: Outcome, date: NaiveDate) -> FocusSession {
        SessionDraft {
            task_id: "t".to_string(),
            task_title: "Task".to_string(),
            category: Category::Work,
            start_time: Utc::now(),
            elapsed_seconds: elapsed,
            target_seconds: target,
        }
        .finish(outcome, date)
    }

    #[test]
    fn test_first_completed_session() {
        let mut stats = FocusStats::default();
        stats.fold(&session(1500, 1800, Outcome::Completed, day(1)), day(1));

        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.completed_sessions, 1);
        assert_eq!(stats.abandoned_sessions, 0);
        assert_eq!(stats.total_focus_minutes, 25);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 1);
        assert_eq!(stats.average_completion, 83);
        assert_eq!(stats.last_session_date, Some(day(1)));
    }

    #[test]
    fn test_same_day_completions_keep_incrementing() {
        let mut stats = FocusStats::default();
        for _ in 0..3 {
            stats.fold(&session(1800, 1800, Outcome::Completed, day(3)), day(3));
        }
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.best_streak, 3);
    }

    #[test]
    fn test_consecutive_day_extends_and_gap_resets() {
        let mut stats = FocusStats::default();
        stats.fold(&session(1800, 1800, Outcome::Completed, day(1)), day(1));
        stats.fold(&session(1800, 1800, Outcome::Completed, day(2)), day(2));
        assert_eq!(stats.current_streak, 2);

        stats.fold(&session(1800, 1800, Outcome::Completed, day(5)), day(5));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn test_low_effort_abandon_breaks_streak() {
        let mut stats = FocusStats::default();
        stats.fold(&session(1800, 1800, Outcome::Completed, day(1)), day(1));
        stats.fold(&session(45, 1800, Outcome::Abandoned, day(1)), day(1));

        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 1);
        assert_eq!(stats.abandoned_sessions, 1);
    }

    #[test]
    fn test_partial_abandon_keeps_streak() {
        let mut stats = FocusStats::default();
        stats.fold(&session(1800, 1800, Outcome::Completed, day(1)), day(1));
        // 50 % is above the penalty floor
        stats.fold(&session(900, 1800, Outcome::Abandoned, day(2)), day(2));

        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.last_session_date, Some(day(2)));
    }

    #[test]
    fn test_average_uses_pre_increment_count() {
        let mut stats = FocusStats::default();
        stats.fold(&session(1800, 1800, Outcome::Completed, day(1)), day(1));
        stats.fold(&session(900, 1800, Outcome::Abandoned, day(1)), day(1));
        assert_eq!(stats.average_completion, 75);

        stats.fold(&session(0, 1800, Outcome::Abandoned, day(1)), day(1));
        // round((75 * 2 + 0) / 3) = 50
        assert_eq!(stats.average_completion, 50);
    }

    #[test]
    fn test_best_streak_never_decreases() {
        let mut stats = FocusStats::default();
        let mut best = 0;
        let plan = [
            (1, 1800, Outcome::Completed),
            (2, 1800, Outcome::Completed),
            (2, 10, Outcome::Abandoned),
            (3, 1800, Outcome::Completed),
            (9, 1800, Outcome::Completed),
            (9, 1000, Outcome::Abandoned),
            (10, 1800, Outcome::Completed),
        ];
        for (d, elapsed, outcome) in plan {
            stats.fold(&session(elapsed, 1800, outcome, day(d)), day(d));
            assert!(stats.best_streak >= best);
            assert!(stats.best_streak >= stats.current_streak);
            best = stats.best_streak;
        }
    }

    #[test]
    fn test_completion_rate() {
        let mut stats = FocusStats::default();
        assert!(stats.completion_rate().abs() < f64::EPSILON);

        stats.fold(&session(1800, 1800, Outcome::Completed, day(1)), day(1));
        stats.fold(&session(60, 1800, Outcome::Abandoned, day(1)), day(1));
        assert!((stats.completion_rate() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_partial_blob_deserializes_with_defaults() {
        let stats: FocusStats = serde_json::from_str(r#"{"total_sessions": 4}"#).unwrap();
        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.best_streak, 0);
        assert!(stats.last_session_date.is_none());
    }
}
