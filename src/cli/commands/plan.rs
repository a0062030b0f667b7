//! Auto Plan commands.

use chrono::Local;

use crate::cli::args::{OutputFormat, PlanCommands};
use crate::core::parse_date;
use crate::error::MypaError;
use crate::features::planner::{replan, ReplanResult, TaskStore};
use crate::output::{format_replan, format_tasks};
use crate::storage::KeyValueStore;

/// Execute plan subcommands.
///
/// # Errors
///
/// Returns an error if the date does not parse or there is nothing to undo.
pub fn plan(
    store: &dyn KeyValueStore,
    cmd: PlanCommands,
    format: OutputFormat,
) -> Result<String, MypaError> {
    let tasks = TaskStore::new(store);

    match cmd {
        PlanCommands::Auto { date, dry_run } => {
            let today = Local::now().date_naive();
            let day = date
                .as_deref()
                .map_or(Ok(today), |d| parse_date(d, today))?;

            let result = replan(&tasks.load(), day);
            if let ReplanResult::Replanned(plan) = &result {
                if !dry_run {
                    tasks.commit_replan(&plan.tasks, &plan.snapshot)?;
                }
            }
            format_replan(&result, dry_run, format)
        }
        PlanCommands::Undo => {
            let restored = tasks.undo()?;
            format_tasks(&restored, "Restored plan", format)
        }
    }
}
