//! Application state for the focus screen.

use std::time::Instant;

use chrono::Local;

use crate::error::MypaError;
use crate::features::focus::{ActiveTimer, FoldOutcome, SessionTracker, StopOutcome, TickSchedule};
use crate::features::planner::Task;

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause if running, resume if paused.
    TogglePause,
    /// Finish the session as completed.
    Complete,
    /// Stop the session; may ask for confirmation.
    Stop,
    /// Answer yes to the pending question.
    Confirm,
    /// Answer no to the pending question.
    Decline,
}

/// Focus screen state: one task, one timer.
pub struct App {
    /// Task being focused on.
    pub task: Task,
    tracker: SessionTracker,
    schedule: TickSchedule,
    /// Waiting for y/n after a stop request.
    pub confirming_stop: bool,
    /// Status message to display.
    pub status: Option<String>,
    finished: Option<FoldOutcome>,
    task_completed: bool,
}

impl App {
    /// Start a timer on `task` and arm the tick schedule.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::InvalidState`] if the tracker already has an
    /// active timer.
    pub fn start(task: Task, mut tracker: SessionTracker, now: Instant) -> Result<Self, MypaError> {
        tracker.start(&task, Local::now())?;

        let mut schedule = TickSchedule::default();
        schedule.arm(now);

        Ok(Self {
            task,
            tracker,
            schedule,
            confirming_stop: false,
            status: Some("space:pause | c:complete | s:stop | q:quit".to_string()),
            finished: None,
            task_completed: false,
        })
    }

    /// The running or paused timer, until the session ends.
    #[must_use]
    pub const fn timer(&self) -> Option<&ActiveTimer> {
        self.tracker.active()
    }

    #[must_use]
    pub const fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Apply every tick that has come due.
    pub fn apply_due_ticks(&mut self, now: Instant) {
        for _ in 0..self.schedule.due_ticks(now) {
            self.tracker.tick();
        }
    }

    /// Handle one decoded key press.
    pub fn apply(&mut self, action: Action, now: Instant) {
        if self.is_finished() {
            return;
        }

        match (action, self.confirming_stop) {
            (Action::Confirm, true) => {
                self.confirming_stop = false;
                self.stop(true);
            }
            (Action::Decline, true) => {
                self.confirming_stop = false;
                self.status = Some("Keep going".to_string());
            }
            (_, true) | (Action::Confirm | Action::Decline, false) => {}
            (Action::TogglePause, false) => self.toggle_pause(now),
            (Action::Complete, false) => self.complete(),
            (Action::Stop, false) => self.stop(false),
        }
    }

    fn toggle_pause(&mut self, now: Instant) {
        let result = match self.timer().map(|t| t.is_running) {
            Some(true) => self.tracker.pause().map(|()| "Paused"),
            Some(false) => self.tracker.resume().map(|()| "Resumed"),
            None => return,
        };

        match result {
            Ok(message) => self.status = Some(message.to_string()),
            Err(e) => self.status = Some(e.to_string()),
        }
        let running = self.timer().is_some_and(|t| t.is_running);
        self.schedule.sync(running, now);
    }

    fn complete(&mut self) {
        match self.tracker.complete(&self.task.id, Local::now()) {
            Ok(outcome) => {
                self.task_completed = true;
                self.finish(outcome);
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn stop(&mut self, confirmed: bool) {
        match self.tracker.stop(confirmed, Local::now()) {
            Ok(StopOutcome::ConfirmationRequired { .. }) => {
                self.confirming_stop = true;
                self.status = Some("Stop this session? (y/n)".to_string());
            }
            Ok(StopOutcome::Finished(outcome)) => self.finish(outcome),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn finish(&mut self, outcome: FoldOutcome) {
        self.schedule.cancel();
        self.finished = Some(outcome);
    }

    /// Consume the screen, handing back the tracker, the session outcome
    /// and whether the task itself was completed.
    #[must_use]
    pub fn into_parts(self) -> (SessionTracker, Option<FoldOutcome>, bool) {
        (self.tracker, self.finished, self.task_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use std::time::Duration;

    fn task() -> Task {
        Task::new(
            "Deep work",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            30,
        )
        .unwrap()
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_ticks_accumulate_while_running() {
        let t0 = Instant::now();
        let mut app = App::start(task(), SessionTracker::new(), t0).unwrap();

        app.apply_due_ticks(t0 + secs(3));
        assert_eq!(app.timer().unwrap().elapsed_seconds, 3);
    }

    #[test]
    fn test_pause_cancels_ticks() {
        let t0 = Instant::now();
        let mut app = App::start(task(), SessionTracker::new(), t0).unwrap();

        app.apply_due_ticks(t0 + secs(2));
        app.apply(Action::TogglePause, t0 + secs(2));
        assert!(!app.schedule().is_armed());

        app.apply_due_ticks(t0 + secs(10));
        assert_eq!(app.timer().unwrap().elapsed_seconds, 2);

        app.apply(Action::TogglePause, t0 + secs(10));
        app.apply_due_ticks(t0 + secs(11));
        assert_eq!(app.timer().unwrap().elapsed_seconds, 3);
    }

    #[test]
    fn test_short_stop_finishes_without_confirmation() {
        let t0 = Instant::now();
        let mut app = App::start(task(), SessionTracker::new(), t0).unwrap();
        app.apply_due_ticks(t0 + secs(3));

        app.apply(Action::Stop, t0 + secs(3));
        assert!(app.is_finished());
        assert!(!app.schedule().is_armed());

        let (tracker, outcome, completed) = app.into_parts();
        assert!(matches!(outcome, Some(FoldOutcome::Discarded { .. })));
        assert!(!completed);
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_long_stop_asks_then_declines() {
        let t0 = Instant::now();
        let mut app = App::start(task(), SessionTracker::new(), t0).unwrap();
        app.apply_due_ticks(t0 + secs(45));

        app.apply(Action::Stop, t0 + secs(45));
        assert!(app.confirming_stop);
        assert!(!app.is_finished());

        // Other keys are ignored while the question is open
        app.apply(Action::Complete, t0 + secs(45));
        assert!(!app.is_finished());

        app.apply(Action::Decline, t0 + secs(45));
        assert!(!app.confirming_stop);
        assert!(app.timer().is_some());
    }

    #[test]
    fn test_long_stop_confirmed_records_abandon() {
        let t0 = Instant::now();
        let mut app = App::start(task(), SessionTracker::new(), t0).unwrap();
        app.apply_due_ticks(t0 + secs(45));

        app.apply(Action::Stop, t0 + secs(45));
        app.apply(Action::Confirm, t0 + secs(45));

        let (tracker, outcome, completed) = app.into_parts();
        let session = outcome.unwrap().session().cloned().unwrap();
        assert!(session.was_abandoned);
        assert_eq!(session.percent_complete, 3);
        assert!(!completed);
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn test_complete_marks_task() {
        let t0 = Instant::now();
        let mut app = App::start(task(), SessionTracker::new(), t0).unwrap();
        app.apply_due_ticks(t0 + secs(1500));

        app.apply(Action::Complete, t0 + secs(1500));

        let (tracker, outcome, completed) = app.into_parts();
        assert!(completed);
        assert_eq!(outcome.unwrap().session().unwrap().percent_complete, 83);
        assert_eq!(tracker.stats().total_focus_minutes, 25);
    }
}
