pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "larder",
    about = "Larder operator CLI",
    long_about = "Inspect configuration, check readiness, manage the SQLite store, and run menu suggestions offline.",
    after_help = "Examples:\n  larder doctor --json\n  larder seed\n  larder suggest --input snapshot.json --today 2026-10-19"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the demo household into an empty SQLite store")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, storage backend, and DB connectivity checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Run the suggestion engine over a JSON snapshot file")]
    Suggest {
        #[arg(long, help = "Path to a `{ ingredients, sales, familyMembers }` JSON file")]
        input: PathBuf,
        #[arg(long, help = "Reference date (YYYY-MM-DD) for sale activity; defaults to today")]
        today: Option<NaiveDate>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Suggest { input, today } => commands::suggest::run(&input, today),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
