//! Output formatting for mypa.
//!
//! This module provides formatters for displaying tasks, focus sessions and
//! plans in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::MypaError;
use crate::features::focus::{FocusReport, FocusSession, FocusStats, FoldOutcome};
use crate::features::planner::{ReplanResult, Task};

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_tasks(tasks: &[Task], title: &str, format: OutputFormat) -> Result<String, MypaError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, heading: &str, format: OutputFormat) -> Result<String, MypaError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task, heading)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format session history based on output format
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_sessions(sessions: &[FocusSession], format: OutputFormat) -> Result<String, MypaError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions)),
        OutputFormat::Json => format_sessions_json(sessions),
    }
}

/// Format focus stats based on output format
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &FocusStats, format: OutputFormat) -> Result<String, MypaError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => to_json(stats),
    }
}

/// Format a focus report based on output format
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_report(report: &FocusReport, format: OutputFormat) -> Result<String, MypaError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format an Auto Plan result based on output format
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_replan(
    result: &ReplanResult,
    dry_run: bool,
    format: OutputFormat,
) -> Result<String, MypaError> {
    match format {
        OutputFormat::Pretty => Ok(format_replan_pretty(result, dry_run)),
        OutputFormat::Json => format_replan_json(result, dry_run),
    }
}

/// Format a finished focus timer based on output format
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_fold_outcome(outcome: &FoldOutcome, format: OutputFormat) -> Result<String, MypaError> {
    match format {
        OutputFormat::Pretty => Ok(format_fold_outcome_pretty(outcome)),
        OutputFormat::Json => to_json(outcome),
    }
}
