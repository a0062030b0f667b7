//! Focus mode command implementation.
//!
//! Handles the focus screen plus history, stats and reports.

use chrono::Local;
use colored::Colorize;

use crate::cli::args::{FocusCommands, OutputFormat};
use crate::error::MypaError;
use crate::features::focus::{FocusReport, FocusStorage, ReportPeriod};
use crate::features::planner::TaskStore;
use crate::output::{format_fold_outcome, format_report, format_sessions, format_stats, to_json};
use crate::storage::KeyValueStore;
use crate::tui;

/// Execute focus subcommands.
///
/// # Errors
///
/// Returns an error if the task cannot be found or the focus screen fails.
pub fn focus(
    store: &dyn KeyValueStore,
    cmd: FocusCommands,
    format: OutputFormat,
) -> Result<String, MypaError> {
    let storage = FocusStorage::new(store);

    match cmd {
        FocusCommands::Run { task } => run_session(store, &storage, &task, format),

        FocusCommands::Status => format_stats(&storage.load_stats(), format),

        FocusCommands::History { limit } => {
            let history = storage.load_history();
            format_sessions(&history[..limit.min(history.len())], format)
        }

        FocusCommands::Report { period } => {
            let report = FocusReport::from_history(
                &storage.load_history(),
                ReportPeriod::parse(&period),
                Local::now().date_naive(),
            );
            format_report(&report, format)
        }
    }
}

/// Open the focus screen on a task, then persist what happened.
fn run_session(
    store: &dyn KeyValueStore,
    storage: &FocusStorage<'_>,
    task_id: &str,
    format: OutputFormat,
) -> Result<String, MypaError> {
    let tasks = TaskStore::new(store);
    let task = tasks.find(task_id)?;
    if task.completed {
        log::info!("starting focus on already completed task {}", task.short_id());
    }

    let run = tui::run_focus(task.clone(), storage.load_tracker())?;

    if run.outcome.as_ref().is_some_and(|o| o.session().is_some()) {
        storage.persist(&run.tracker);
    }
    if run.task_completed {
        tasks.complete(&task.id)?;
    }

    match run.outcome {
        Some(outcome) => format_fold_outcome(&outcome, format),
        None => match format {
            OutputFormat::Json => to_json(&serde_json::json!({ "result": "interrupted" })),
            OutputFormat::Pretty => Ok("Focus screen closed".dimmed().to_string()),
        },
    }
}
