use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use mypa::cli::args::{Cli, Commands};
use mypa::cli::commands;
use mypa::config::Config;
use mypa::logging;
use mypa::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let open_db = || Database::open().context("Failed to open the mypa database");

    let output = match cli.command {
        Commands::Task(args) => commands::task(&open_db()?, &config, args.command, format)?,
        Commands::Focus(args) => commands::focus(&open_db()?, args.command, format)?,
        Commands::Plan(args) => commands::plan(&open_db()?, args.command, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
