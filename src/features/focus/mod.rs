//! Focus sessions.
//!
//! Provides timed work sessions against planned tasks:
//! - Start/pause/resume/stop/complete a single active timer
//! - Session history (newest first, bounded) and streak statistics
//! - Period reports over the history

pub mod report;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod tracker;

pub use report::{FocusReport, ReportPeriod};
pub use session::{FocusSession, Outcome};
pub use stats::FocusStats;
pub use storage::FocusStorage;
pub use timer::{
    format_duration_clock, format_minutes, render_progress_bar, ActiveTimer, TickSchedule,
    TimerState,
};
pub use tracker::{FoldOutcome, SessionTracker, StopOutcome};
