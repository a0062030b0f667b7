//! Task list commands.

use chrono::{Local, NaiveDate};

use crate::cli::args::{AddTaskArgs, OutputFormat, TaskCommands};
use crate::config::Config;
use crate::core::{parse_date, parse_duration_minutes, parse_time};
use crate::error::MypaError;
use crate::features::planner::{Category, Priority, Task, TaskStore};
use crate::output::{format_task, format_tasks};
use crate::storage::KeyValueStore;

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if input does not parse or the task cannot be found.
pub fn task(
    store: &dyn KeyValueStore,
    config: &Config,
    cmd: TaskCommands,
    format: OutputFormat,
) -> Result<String, MypaError> {
    let tasks = TaskStore::new(store);
    let today = Local::now().date_naive();

    match cmd {
        TaskCommands::Add(args) => {
            let task = build_task(&args, config, today)?;
            let added = tasks.add(task)?;
            format_task(&added, "Added:", format)
        }
        TaskCommands::List { date, all } => {
            if all {
                let mut everything = tasks.load();
                everything.sort_by_key(|t| (t.date, t.time));
                return format_tasks(&everything, "All tasks", format);
            }

            let date = date
                .as_deref()
                .map_or(Ok(today), |d| parse_date(d, today))?;
            format_tasks(&tasks.for_date(date), &day_title(date, today), format)
        }
        TaskCommands::Done { id } => {
            let task = tasks.complete(&id)?;
            format_task(&task, "Completed:", format)
        }
        TaskCommands::Rm { id } => {
            let task = tasks.remove(&id)?;
            format_task(&task, "Removed:", format)
        }
    }
}

/// Build a task from `task add` arguments, filling gaps from config.
fn build_task(args: &AddTaskArgs, config: &Config, today: NaiveDate) -> Result<Task, MypaError> {
    let defaults = &config.tasks;

    let date = args
        .date
        .as_deref()
        .map_or(Ok(today), |d| parse_date(d, today))?;
    let time = parse_time(args.time.as_deref().unwrap_or(&defaults.default_time))?;
    let duration = args
        .duration
        .as_deref()
        .map_or(Ok(defaults.default_duration_minutes), parse_duration_minutes)?;
    let category = args
        .category
        .as_deref()
        .map_or(Ok(defaults.default_category), Category::parse)?;
    let priority = args
        .priority
        .as_deref()
        .map_or(Ok(Priority::default()), Priority::parse)?;

    let task = Task::new(args.title.as_str(), date, time, duration)?
        .with_category(category)
        .with_priority(priority);

    Ok(if args.fixed { task.fixed() } else { task })
}

fn day_title(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %Y-%m-%d").to_string(),
    }
}
