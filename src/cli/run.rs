//! Run command implementation.

use super::output::{JsonRunResult, ScriptStep, format_report, format_standings, format_step, standings};
use super::{CliError, OutputFormat};
use std::fs;
use std::path::Path;
use warfront::{Command, Engine, Scenario};

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the scenario or script cannot be loaded.
pub(crate) fn execute(
    scenario: Option<&Path>,
    script: Option<&Path>,
    turns: u32,
    format: OutputFormat,
) -> Result<(), CliError> {
    let scenario = match scenario {
        Some(path) => Scenario::load(path)
            .map_err(|e| CliError::new(format!("Failed to load {}: {e}", path.display())))?,
        None => Scenario::builtin()?,
    };
    let mut engine = Engine::new(&scenario)?;

    let commands: Vec<Command> = match script {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| {
                CliError::new(format!("Failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&text)?
        }
        None => Vec::new(),
    };

    let mut steps = Vec::with_capacity(commands.len());
    for command in commands {
        let result = engine.execute(command.clone());
        if let Err(e) = &result {
            log::warn!("{command:?} rejected: {e}");
        }
        steps.push(ScriptStep::new(command, result));
    }

    let mut reports = Vec::new();
    for _ in 0..turns {
        reports.extend(engine.advance_turn());
    }

    match format {
        OutputFormat::Text => {
            if !steps.is_empty() {
                println!("Script ({} commands):", steps.len());
                for step in &steps {
                    print!("{}", format_step(step));
                }
                println!();
            }
            for report in &reports {
                print!("{}", format_report(report));
            }
            if !reports.is_empty() {
                println!();
            }
            print!("{}", format_standings(engine.world()));
        }
        OutputFormat::Json => {
            let result = JsonRunResult {
                script: &steps,
                phases: &reports,
                standings: standings(engine.world()),
                world: engine.world(),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
