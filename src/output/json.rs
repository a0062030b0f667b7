//! JSON output formatting for mypa.
//!
//! This module provides functions for formatting mypa data as JSON.

use serde::Serialize;
use serde_json::json;

use crate::error::MypaError;
use crate::features::focus::FocusSession;
use crate::features::planner::{ReplanResult, Task};

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, MypaError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format focus sessions as JSON
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[FocusSession]) -> Result<String, MypaError> {
    let output = json!({
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format an Auto Plan result as JSON
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn format_replan_json(result: &ReplanResult, dry_run: bool) -> Result<String, MypaError> {
    let message = match result {
        ReplanResult::NothingToReplan { reason } => reason.clone(),
        ReplanResult::Replanned(replan) => replan.summary.message(),
    };
    let output = json!({
        "dry_run": dry_run,
        "message": message,
        "result": result
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value to pretty JSON
///
/// # Errors
///
/// Returns `MypaError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, MypaError> {
    Ok(serde_json::to_string_pretty(value)?)
}
