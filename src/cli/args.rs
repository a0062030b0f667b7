use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "mypa")]
#[command(about = "Plan your day, focus on one task at a time, and keep your streak")]
#[command(long_about = "mypa - a personal planning assistant

Keeps a dated task list, runs focus timers against tasks, tracks completion
streaks, and re-plans a crowded day by priority.

QUICK START:
  mypa task add \"Write report\" --time 9:00 --duration 45m --priority high
  mypa task list                 Show today's plan
  mypa focus run <task-id>       Start a focus timer
  mypa plan auto                 Reorder today's flexible tasks by priority

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

Data lives in ~/.mypa (override with MYPA_HOME). Set MYPA_LOG=debug for
diagnostic logs.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output, or 'json' for
    /// machine-readable output suitable for scripting. Defaults to the
    /// `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the task list
    ///
    /// Tasks have a date, a start time, a planned duration, a category and
    /// a priority. Fixed tasks are never moved by Auto Plan.
    ///
    /// # Examples
    ///
    ///   mypa task add "Gym" --time 7am --category health --fixed
    ///   mypa task list --date tomorrow
    ///   mypa task done 3f2a
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Focus sessions and streaks
    ///
    /// Run a timer against a task, then review history, stats and reports.
    /// Sessions under 5 seconds are discarded. Stopping after more than 30
    /// seconds asks for confirmation. A stopped session counts as completed
    /// at 80 % of the planned duration.
    ///
    /// # Examples
    ///
    ///   mypa focus run 3f2a          Open the focus screen
    ///   mypa focus status            Streaks and totals
    ///   mypa focus history -n 20     Recent sessions
    ///   mypa focus report month      Last 30 days
    #[command(alias = "f")]
    Focus(FocusArgs),

    /// Auto Plan: re-plan a day by priority
    ///
    /// Flexible tasks on the day are reordered High, Normal, Low onto the
    /// start times they already occupy. Tasks that do not fit move to the
    /// next day. Fixed tasks stay put. The previous plan can be restored
    /// once with 'mypa plan undo'.
    ///
    /// # Examples
    ///
    ///   mypa plan auto --dry-run     Preview without saving
    ///   mypa plan auto               Apply to today
    ///   mypa plan undo               Restore the previous plan
    #[command(alias = "p")]
    Plan(PlanArgs),

    /// Generate shell completions
    ///
    /// Outputs a completion script for the given shell.
    ///
    /// Example: mypa completions zsh > ~/.zsh/completions/_mypa
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for task commands.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    ///
    /// Omitted fields come from the `tasks` section of the config file.
    ///
    /// Examples:
    ///   mypa task add "Write report"
    ///   mypa task add "Standup" --time 9:30 --duration 15m --fixed
    ///   mypa task add "Read paper" -d tomorrow -t 2pm -c learning -p low
    #[command(alias = "a")]
    Add(AddTaskArgs),

    /// List tasks for a day, ordered by start time
    #[command(alias = "ls")]
    List {
        /// Day to list (today, tomorrow, friday, 2024-12-15)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// List every task regardless of date
        #[arg(long, short = 'a', conflicts_with = "date")]
        all: bool,
    },

    /// Mark a task completed
    Done {
        /// Task ID or unique ID prefix
        id: String,
    },

    /// Delete a task
    #[command(alias = "remove")]
    Rm {
        /// Task ID or unique ID prefix
        id: String,
    },
}

/// Arguments for `task add`.
#[derive(Args)]
pub struct AddTaskArgs {
    /// Task title
    pub title: String,

    /// Day (today, tomorrow, friday, in 3 days, 2024-12-15)
    #[arg(long, short = 'd')]
    pub date: Option<String>,

    /// Start time (9:00, 14:30, 9am, 2:30pm)
    #[arg(long, short = 't')]
    pub time: Option<String>,

    /// Planned duration (25, 25m, 1h30m)
    #[arg(long)]
    pub duration: Option<String>,

    /// Category (work, health, personal, learning)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Priority (high, normal, low)
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// Never move this task during Auto Plan
    #[arg(long)]
    pub fixed: bool,
}

/// Arguments for focus commands.
#[derive(Args)]
pub struct FocusArgs {
    #[command(subcommand)]
    pub command: FocusCommands,
}

/// Focus subcommands.
#[derive(Subcommand)]
pub enum FocusCommands {
    /// Run a focus timer on a task
    ///
    /// Opens the focus screen. Keys:
    ///   space/p  pause or resume
    ///   c        complete the task
    ///   s        stop (asks y/n after 30 seconds)
    ///   q        quit, same as stop
    #[command(alias = "start")]
    Run {
        /// Task ID or unique ID prefix
        task: String,
    },

    /// Show streaks and session totals
    Status,

    /// View session history, newest first
    History {
        /// Number of sessions to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Generate a focus report
    Report {
        /// Time period (today, week, month, all)
        #[arg(default_value = "week")]
        period: String,
    },
}

/// Arguments for plan commands.
#[derive(Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommands,
}

/// Plan subcommands.
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Re-plan a day by priority
    Auto {
        /// Day to re-plan (defaults to today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Show the result without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Restore the plan from before the last Auto Plan
    Undo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_output_defaults_to_config() {
        let cli = Cli::try_parse_from(["mypa", "focus", "status"]).unwrap();
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_output_format_json() {
        let cli = Cli::try_parse_from(["mypa", "--output", "json", "focus", "status"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mypa", "task", "list", "-o", "json", "-vv"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_task_add() {
        let cli = Cli::try_parse_from([
            "mypa",
            "task",
            "add",
            "Write report",
            "--time",
            "2:30pm",
            "--duration",
            "45m",
            "-p",
            "high",
            "--fixed",
        ])
        .unwrap();

        if let Commands::Task(args) = cli.command {
            if let TaskCommands::Add(add) = args.command {
                assert_eq!(add.title, "Write report");
                assert_eq!(add.time.as_deref(), Some("2:30pm"));
                assert_eq!(add.duration.as_deref(), Some("45m"));
                assert_eq!(add.priority.as_deref(), Some("high"));
                assert!(add.fixed);
                assert!(add.date.is_none());
            } else {
                panic!("Expected Add subcommand");
            }
        } else {
            panic!("Expected Task command");
        }
    }

    #[test]
    fn test_cli_task_list_all_conflicts_with_date() {
        assert!(Cli::try_parse_from(["mypa", "task", "list", "--all", "--date", "today"]).is_err());
    }

    #[test]
    fn test_cli_focus_run() {
        let cli = Cli::try_parse_from(["mypa", "focus", "run", "abc"]).unwrap();
        if let Commands::Focus(args) = cli.command {
            assert!(matches!(args.command, FocusCommands::Run { task } if task == "abc"));
        } else {
            panic!("Expected Focus command");
        }
    }

    #[test]
    fn test_cli_focus_report_default_period() {
        let cli = Cli::try_parse_from(["mypa", "focus", "report"]).unwrap();
        if let Commands::Focus(args) = cli.command {
            assert!(matches!(args.command, FocusCommands::Report { period } if period == "week"));
        } else {
            panic!("Expected Focus command");
        }
    }

    #[test]
    fn test_cli_plan_auto_dry_run() {
        let cli = Cli::try_parse_from(["mypa", "plan", "auto", "--dry-run"]).unwrap();
        if let Commands::Plan(args) = cli.command {
            assert!(matches!(
                args.command,
                PlanCommands::Auto { date: None, dry_run: true }
            ));
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_completions_shell() {
        let cli = Cli::try_parse_from(["mypa", "completions", "bash"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Bash }));
        assert!(Cli::try_parse_from(["mypa", "completions", "tcsh"]).is_err());
    }
}
