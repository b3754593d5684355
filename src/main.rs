//! Warfront CLI - validate scenarios and run scripted turns.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Warfront - a deterministic turn/phase strategy simulation
#[derive(Parser, Debug)]
#[command(name = "warfront")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario for a number of turns
    Run {
        /// Scenario file (default: built-in 1939 scenario)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// JSON file with a list of commands to execute before advancing
        #[arg(long)]
        script: Option<PathBuf>,

        /// Full turns to advance after the script (default: 1)
        #[arg(short, long, default_value = "1")]
        turns: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Validate a scenario file
    Validate {
        /// Scenario file to validate
        #[arg(required = true)]
        scenario: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp(None)
        .init();

    let result = match args.command {
        Commands::Run {
            scenario,
            script,
            turns,
            format,
        } => cli::run::execute(scenario.as_deref(), script.as_deref(), turns, format),

        Commands::Validate { scenario } => cli::validate::execute(&scenario),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
