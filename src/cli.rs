//! CLI command implementations for Warfront.

pub(crate) mod run;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use thiserror::Error;
use warfront::ScenarioError;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A failure described in place, with its context.
    #[error("{0}")]
    Message(String),

    /// Script or output JSON failed to (de)serialize.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The scenario failed to load or validate.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_error_displays_unchanged() {
        let error = CliError::from(ScenarioError::NoNations);
        assert!(matches!(error, CliError::Scenario(_)));
        assert_eq!(error.to_string(), ScenarioError::NoNations.to_string());
    }

    #[test]
    fn test_message_displays_verbatim() {
        let error = CliError::new("Failed to read script.json: missing");
        assert_eq!(error.to_string(), "Failed to read script.json: missing");
    }
}
