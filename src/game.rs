//! Simulation core.
//!
//! Implements the turn/phase state machine on top of a world of nations and
//! territories:
//! - World model (nations, territories, queued moves)
//! - Static adjacency graph
//! - Move ledger with debit-on-queue
//! - Phase engine and one exit rule per phase
//! - Combat, production and consumption rules
//! - Invariant checks

mod adjacency;
mod combat;
mod economy;
mod engine;
mod invariants;
mod moves;
mod nation;
mod phase;
mod rules;
mod state;
mod territory;
mod update;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use adjacency::AdjacencyGraph;
pub use combat::{
    BattleOutcome, BattleReport, BattleResult, Strength, effective_strength, resolve_battle,
};
pub use economy::{AttritionLoss, InfrastructureBudget, ResourceGain};
pub use engine::{Command, CommandOutcome, Engine};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use moves::{MoveId, TroopMove};
pub use nation::{Nation, NationId, ProductionAllocation, Sector, WorkforceSplit};
pub use phase::Phase;
pub use rules::{Arrival, PhaseOutcome, PhaseReport, RuleSet, SupplyPolicy};
pub use state::World;
pub use territory::{Territory, TerritoryId};
pub use update::{NationUpdate, TerritoryUpdate};

pub(crate) use combat::resolve_combat;
pub(crate) use economy::{accrue_resources, apply_consumption, infrastructure_budgets};
pub(crate) use moves::{cancel_move, clear_moves, queue_move};
pub(crate) use rules::exit_rule;
pub(crate) use update::{distribute_supply, update_nation, update_territory};
