//! Feature implementations for mypa.
//!
//! - Focus mode: timers, session history, streaks and reports
//! - Planner: the task list and Auto Plan
pub mod focus;
pub mod planner;
