//! Day planning.
//!
//! Provides the task list and Auto Plan:
//! - Tasks with date, time, priority and fixed/flexible flag
//! - Priority-ordered re-planning of a day with overflow to tomorrow
//! - Undo of the last replan

pub mod replan;
pub mod storage;
pub mod task;

pub use replan::{replan, Replan, ReplanResult, ReplanSummary};
pub use storage::TaskStore;
pub use task::{Category, Priority, Task};
