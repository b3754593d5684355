//! Output formatting utilities for CLI.

use serde::Serialize;
use warfront::game::{BattleOutcome, PhaseOutcome};
use warfront::{Command, CommandError, CommandOutcome, NationId, PhaseReport, World};

/// One executed script command.
#[derive(Debug, Serialize)]
pub(super) struct ScriptStep {
    /// The command as read from the script.
    pub(super) command: Command,
    /// What it produced, if accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) outcome: Option<CommandOutcome>,
    /// Why it was rejected, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) error: Option<String>,
}

impl ScriptStep {
    /// Record a command and its result.
    pub(super) fn new(command: Command, result: Result<CommandOutcome, CommandError>) -> Self {
        match result {
            Ok(outcome) => Self {
                command,
                outcome: Some(outcome),
                error: None,
            },
            Err(e) => Self {
                command,
                outcome: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// JSON-serializable nation standing.
#[derive(Debug, Serialize)]
pub(super) struct JsonStanding {
    /// Nation ID.
    pub(super) nation: NationId,
    /// Display name.
    pub(super) name: String,
    /// Territories owned.
    pub(super) territories: usize,
    /// Troops across owned territories.
    pub(super) troops: u64,
    /// Resource stockpile.
    pub(super) resources: u32,
}

/// JSON-serializable run result.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunResult<'a> {
    /// Script commands, in order.
    pub(super) script: &'a [ScriptStep],
    /// Reports from the advanced turns.
    pub(super) phases: &'a [PhaseReport],
    /// Per-nation summary of the final world.
    pub(super) standings: Vec<JsonStanding>,
    /// The final world.
    pub(super) world: &'a World,
}

/// Summarize every nation in the world.
pub(super) fn standings(world: &World) -> Vec<JsonStanding> {
    world
        .nations()
        .values()
        .map(|nation| {
            let owned: Vec<_> = world.territories_owned_by(&nation.id).collect();
            JsonStanding {
                nation: nation.id.clone(),
                name: nation.name.clone(),
                territories: owned.len(),
                troops: owned.iter().map(|t| u64::from(t.troops)).sum(),
                resources: nation.resources,
            }
        })
        .collect()
}

fn side(nation: Option<&NationId>) -> String {
    nation.map_or_else(|| "neutral".to_string(), ToString::to_string)
}

/// Format a script step as one line of text.
pub(super) fn format_step(step: &ScriptStep) -> String {
    match (&step.outcome, &step.error) {
        (_, Some(error)) => format!("  ! {:?} rejected: {error}\n", step.command),
        (Some(CommandOutcome::PhaseAdvanced(report)), _) => format_report(report),
        (Some(CommandOutcome::MoveQueued { id }), _) => format!("  queued move {id}\n"),
        (Some(CommandOutcome::SupplyDistributed { supply }), _) => {
            format!("  supply set to {supply}\n")
        }
        (Some(CommandOutcome::MovesCleared { count }), _) => format!("  cleared {count} moves\n"),
        (Some(CommandOutcome::MoveCancelled { cancelled }), _) => match cancelled {
            Some(m) => format!("  cancelled move {} ({} troops back to {})\n", m.id, m.troops, m.from),
            None => "  no such move\n".to_string(),
        },
        (Some(CommandOutcome::Done) | None, None) => format!("  {:?}\n", step.command),
    }
}

/// Format a phase report as human-readable text.
pub(super) fn format_report(report: &PhaseReport) -> String {
    let mut output = format!(
        "Turn {} | {} -> {}\n",
        report.turn, report.exited, report.entered
    );

    match &report.outcome {
        PhaseOutcome::Unchanged => {}
        PhaseOutcome::Battles(battles) => {
            for b in battles {
                let result = match b.outcome {
                    BattleOutcome::AttackerWins => "captured",
                    BattleOutcome::DefenderHolds => "held",
                    BattleOutcome::Stalemate => "stalemate",
                };
                output.push_str(&format!(
                    "  battle at {}: {} {:.1} vs {} {:.1} -> {result}, {} survivors\n",
                    b.territory,
                    side(b.attacker.as_ref()),
                    b.attack_strength,
                    side(b.defender.as_ref()),
                    b.defence_strength,
                    b.survivors
                ));
            }
        }
        PhaseOutcome::Arrivals(arrivals) => {
            for a in arrivals {
                output.push_str(&format!("  {} troops arrived at {}\n", a.troops, a.territory));
            }
        }
        PhaseOutcome::Production(gains) => {
            for g in gains {
                output.push_str(&format!(
                    "  {}: +{} resources (total: {})\n",
                    g.nation, g.gained, g.total
                ));
            }
        }
        PhaseOutcome::Attrition(losses) => {
            for l in losses {
                output.push_str(&format!(
                    "  {}: {} troops lost to attrition ({} remaining)\n",
                    l.territory, l.lost, l.remaining
                ));
            }
        }
        PhaseOutcome::InfrastructureBudgets(budgets) => {
            for b in budgets {
                output.push_str(&format!("  {} infrastructure budget: {:.1}\n", b.nation, b.budget));
            }
        }
    }

    output
}

/// Format nation standings as a table.
pub(super) fn format_standings(world: &World) -> String {
    let mut output = format!(
        "Standings after turn {} ({})\n",
        world.turn(),
        world.phase()
    );
    output.push_str(&format!(
        "  {:<20} {:>11} {:>7} {:>9}\n",
        "Nation", "Territories", "Troops", "Resources"
    ));
    for s in standings(world) {
        output.push_str(&format!(
            "  {:<20} {:>11} {:>7} {:>9}\n",
            s.name, s.territories, s.troops, s.resources
        ));
    }
    output
}
