use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use crate::features::focus::{
    format_minutes, render_progress_bar, FocusReport, FocusSession, FocusStats, FoldOutcome,
    Outcome,
};
use crate::features::planner::{Priority, ReplanResult, Task};

fn status_icon(task: &Task) -> ColoredString {
    if task.completed {
        "[x]".green()
    } else {
        "[ ]".white()
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "!high".red(),
        Priority::Normal => "".normal(),
        Priority::Low => "low".dimmed(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

fn task_line(task: &Task) -> String {
    let title = if task.completed {
        task.title.strikethrough().to_string()
    } else {
        task.title.bold().to_string()
    };

    let mut line = format!(
        "{} {}  {}  {}",
        status_icon(task),
        task.time.format("%H:%M").to_string().yellow(),
        title,
        format!("{}m", task.duration_minutes).dimmed()
    );

    let _ = write!(line, "  {}", task.category.to_string().cyan());

    let priority = priority_label(task.priority);
    if !priority.is_empty() {
        let _ = write!(line, "  {priority}");
    }
    if task.is_fixed {
        let _ = write!(line, "  {}", "fixed".magenta());
    }
    let _ = write!(line, "  {}", task.short_id().dimmed());
    line
}

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 tasks)\n  No tasks");
    }

    let mut output = format!("{} ({} tasks)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    let mut current_date = None;
    let spans_days = tasks.iter().any(|t| t.date != tasks[0].date);

    for task in tasks {
        if spans_days && current_date != Some(task.date) {
            current_date = Some(task.date);
            let _ = writeln!(output, "{}", task.date.format("%a %Y-%m-%d").to_string().bold());
        }
        output.push_str(&task_line(task));
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task, heading: &str) -> String {
    let mut output = format!("{} {}\n", heading.green(), task.title.bold());
    let _ = writeln!(output, "  {}: {}", "ID".dimmed(), task.id);
    let _ = writeln!(
        output,
        "  {}: {} {}",
        "When".dimmed(),
        task.date,
        task.time.format("%H:%M")
    );
    let _ = writeln!(
        output,
        "  {}: {}",
        "Duration".dimmed(),
        format_minutes(u64::from(task.duration_minutes))
    );
    let _ = writeln!(output, "  {}: {}", "Category".dimmed(), task.category);
    let _ = writeln!(output, "  {}: {}", "Priority".dimmed(), task.priority);
    if task.is_fixed {
        let _ = writeln!(output, "  {}: yes", "Fixed".dimmed());
    }
    if task.completed {
        let _ = writeln!(output, "  {}: {}", "Status".dimmed(), "completed".green());
    }
    output
}

/// Format focus session history
pub fn format_sessions_pretty(sessions: &[FocusSession]) -> String {
    if sessions.is_empty() {
        return "No focus sessions found.\n\nStart one with: mypa focus run <task-id>".to_string();
    }

    let mut output = Vec::new();
    output.push("Focus Session History".bold().to_string());
    output.push("═".repeat(60));
    output.push(format!(
        "{:<17} {:>8} {:>5}  {:<25} {}",
        "Started", "Duration", "Done", "Task", "Result"
    ));
    output.push("─".repeat(60));

    for session in sessions {
        let result = match session.outcome() {
            Some(Outcome::Completed) => "✓".green(),
            Some(Outcome::Abandoned) => "✗".red(),
            None => "-".normal(),
        };
        output.push(format!(
            "{:<17} {:>7}m {:>4}%  {:<25} {}",
            session.start_time_local().format("%Y-%m-%d %H:%M"),
            session.focus_minutes(),
            session.percent_complete,
            truncate(&session.task_title, 25),
            result
        ));
    }

    output.join("\n")
}

/// Format streaks and totals
pub fn format_stats_pretty(stats: &FocusStats) -> String {
    let mut output = Vec::new();
    output.push("Focus Stats".bold().to_string());
    output.push("─".repeat(40));

    let streak = if stats.current_streak > 0 {
        format!("{} days", stats.current_streak).green()
    } else {
        "0 days".normal()
    };
    output.push(format!("  Current streak:      {streak}"));
    output.push(format!("  Best streak:         {} days", stats.best_streak));
    output.push(format!(
        "  Total focus time:    {}",
        format_minutes(stats.total_focus_minutes)
    ));
    output.push(format!(
        "  Sessions:            {} ({} completed, {} abandoned)",
        stats.total_sessions, stats.completed_sessions, stats.abandoned_sessions
    ));
    output.push(format!(
        "  Completion rate:     {:.0}%",
        stats.completion_rate() * 100.0
    ));
    output.push(format!(
        "  Average completion:  {}% {}",
        stats.average_completion,
        render_progress_bar(u64::from(stats.average_completion), 100, 20)
    ));
    if let Some(last) = stats.last_session_date {
        output.push(format!("  Last session:        {last}"));
    }

    output.join("\n")
}

/// Format a focus report
pub fn format_report_pretty(report: &FocusReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Focus Report: {}", report.period).bold().to_string());
    lines.push("═".repeat(50));

    if report.is_empty() {
        lines.push("  No focus sessions in this period.".to_string());
        return lines.join("\n");
    }

    lines.push(String::new());
    lines.push("Summary".to_string());
    lines.push("─".repeat(40));
    lines.push(format!(
        "  Total focus time:    {}",
        format_minutes(report.total_minutes)
    ));
    lines.push(format!("  Completed sessions:  {}", report.completed_sessions));
    lines.push(format!("  Abandoned sessions:  {}", report.abandoned_sessions));
    lines.push(format!("  Average completion:  {}%", report.average_percent));
    lines.push(format!(
        "  Longest session:     {} minutes",
        report.longest_session_minutes
    ));
    lines.push(String::new());

    if !report.by_category.is_empty() {
        lines.push("By Category".to_string());
        lines.push("─".repeat(40));
        let max = report
            .by_category
            .iter()
            .map(|c| c.minutes)
            .max()
            .unwrap_or(1)
            .max(1);
        for entry in &report.by_category {
            lines.push(format!(
                "  {:<9} {:>4}m {}",
                entry.category.to_string(),
                entry.minutes,
                render_progress_bar(entry.minutes, max, 20)
            ));
        }
        lines.push(String::new());
    }

    if !report.by_task.is_empty() {
        lines.push("Top Tasks".to_string());
        lines.push("─".repeat(40));
        for task in report.by_task.iter().take(5) {
            lines.push(format!(
                "  {:<25} {:>4}m ({} sessions)",
                truncate(&task.task_title, 25),
                task.minutes,
                task.sessions
            ));
        }
        lines.push(String::new());
    }

    lines.push("Recent Days".to_string());
    lines.push("─".repeat(40));
    for day in report.daily.iter().take(7) {
        lines.push(format!(
            "  {} {:>4}m ({} sessions)",
            day.date, day.minutes, day.sessions
        ));
    }

    lines.join("\n")
}

/// Format the result of an Auto Plan
pub fn format_replan_pretty(result: &ReplanResult, dry_run: bool) -> String {
    let replan = match result {
        ReplanResult::NothingToReplan { reason } => return reason.clone(),
        ReplanResult::Replanned(replan) => replan,
    };

    let mut output = Vec::new();
    let heading = if dry_run {
        "Auto Plan preview (not saved)".yellow()
    } else {
        "Auto Plan applied".green()
    };
    output.push(heading.bold().to_string());
    output.push(replan.summary.message());
    output.push("─".repeat(60));

    for (after, before) in replan.tasks.iter().zip(&replan.snapshot) {
        if after.date == before.date && after.time == before.time {
            continue;
        }
        output.push(format!(
            "  {:<25} {} {} -> {} {}",
            truncate(&after.title, 25),
            before.date,
            before.time.format("%H:%M"),
            after.date,
            after.time.format("%H:%M").to_string().yellow()
        ));
    }

    if output.len() == 3 {
        output.push("  Already in priority order".dimmed().to_string());
    }
    if !dry_run {
        output.push(String::new());
        output.push("Undo with: mypa plan undo".dimmed().to_string());
    }

    output.join("\n")
}

/// Format what happened to a finished focus timer
pub fn format_fold_outcome_pretty(outcome: &FoldOutcome) -> String {
    match outcome {
        FoldOutcome::Discarded { elapsed_seconds } => format!(
            "Session discarded ({elapsed_seconds}s is too short to record)"
        )
        .dimmed()
        .to_string(),
        FoldOutcome::Recorded(session) => {
            let verdict = if session.was_completed {
                "Session completed".green()
            } else {
                "Session abandoned".yellow()
            };
            format!(
                "{}: {} ({} min, {}%)",
                verdict.bold(),
                session.task_title,
                session.focus_minutes(),
                session.percent_complete
            )
        }
    }
}
