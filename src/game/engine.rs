//! Phase engine: the sole owner and writer of the world.

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult, ScenarioError};
use crate::game::{
    AdjacencyGraph, MoveId, NationId, NationUpdate, Phase, PhaseReport, RuleSet, TerritoryId,
    TerritoryUpdate, TroopMove, World, assert_invariants, cancel_move, clear_moves,
    distribute_supply, exit_rule, queue_move, update_nation, update_territory,
};
use crate::scenario::Scenario;

/// A command against the world, in serializable form.
///
/// Every [`Engine`] method with a side effect has a matching variant, so a
/// session can be scripted as a list of commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Hand control to another nation.
    SwitchActiveNation {
        /// Nation to control.
        nation: NationId,
    },
    /// Select a territory, or clear the selection.
    SelectTerritory {
        /// Territory to select.
        territory: Option<TerritoryId>,
    },
    /// Edit one field of a territory.
    UpdateTerritory {
        /// Territory to edit.
        territory: TerritoryId,
        /// The edit.
        update: TerritoryUpdate,
    },
    /// Edit one field of a nation.
    UpdateNation {
        /// Nation to edit.
        nation: NationId,
        /// The edit.
        update: NationUpdate,
    },
    /// Deliver supply to a territory, capped by infrastructure.
    DistributeSupply {
        /// Receiving territory.
        territory: TerritoryId,
        /// Requested amount.
        amount: u32,
    },
    /// Queue a troop move.
    QueueMove {
        /// Source territory.
        from: TerritoryId,
        /// Destination territory.
        to: TerritoryId,
        /// Troops to move.
        troops: u32,
    },
    /// Cancel a queued move.
    CancelMove {
        /// Move to cancel.
        id: MoveId,
    },
    /// Cancel every queued move.
    ClearMoves,
    /// Run the current phase's exit rule and move to the next phase.
    AdvancePhase,
    /// Return to the starting state.
    Reset,
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The command had no result beyond its effect.
    Done,
    /// Supply applied after capping.
    SupplyDistributed {
        /// Supply now in the territory.
        supply: u32,
    },
    /// A move was queued.
    MoveQueued {
        /// Identifier of the new move.
        id: MoveId,
    },
    /// A cancel ran; `None` if the id was unknown.
    MoveCancelled {
        /// The removed move.
        cancelled: Option<TroopMove>,
    },
    /// Moves were cleared.
    MovesCleared {
        /// Number of moves cancelled.
        count: usize,
    },
    /// The phase advanced.
    PhaseAdvanced(PhaseReport),
}

/// The phase state machine.
///
/// Every command takes `&mut self` and runs to completion, so the world is
/// only ever observed between commands. A failed command leaves it untouched.
#[derive(Debug, Clone)]
pub struct Engine {
    world: World,
    initial: World,
    adjacency: AdjacencyGraph,
    rules: RuleSet,
}

impl Engine {
    /// Build an engine from a scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario fails validation.
    pub fn new(scenario: &Scenario) -> Result<Self, ScenarioError> {
        let (world, adjacency) = scenario.build()?;
        log::info!(
            "loaded {} nations, {} territories, {} connected",
            world.nations().len(),
            world.territories().len(),
            adjacency.len()
        );
        Ok(Self {
            initial: world.clone(),
            world,
            adjacency,
            rules: scenario.rules,
        })
    }

    /// Read-only snapshot of the world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The adjacency graph.
    #[must_use]
    pub const fn adjacency(&self) -> &AdjacencyGraph {
        &self.adjacency
    }

    /// Active rule settings.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Hand control to another nation.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownNation`] if the nation does not exist.
    pub fn switch_active_nation(&mut self, nation: &NationId) -> CommandResult<()> {
        if self.world.nation(nation).is_none() {
            return Err(CommandError::UnknownNation(nation.clone()));
        }
        self.world.active_nation = nation.clone();
        log::debug!("active nation is now {nation}");
        Ok(())
    }

    /// Select a territory, or clear the selection with `None`.
    ///
    /// Has no simulation effect.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownTerritory`] if the territory does not exist.
    pub fn select_territory(&mut self, territory: Option<&TerritoryId>) -> CommandResult<()> {
        if let Some(id) = territory
            && self.world.territory(id).is_none()
        {
            return Err(CommandError::UnknownTerritory(id.clone()));
        }
        self.world.selected = territory.cloned();
        Ok(())
    }

    /// Edit one field of a territory.
    ///
    /// # Errors
    ///
    /// Returns an error if the territory or a referenced owner does not exist,
    /// or if the edit would put supply above infrastructure.
    pub fn update_territory(
        &mut self,
        territory: &TerritoryId,
        update: TerritoryUpdate,
    ) -> CommandResult<()> {
        log::debug!("update {territory}: {update:?}");
        update_territory(&mut self.world, territory, update)?;
        assert_invariants(&self.world);
        Ok(())
    }

    /// Edit one field of a nation.
    ///
    /// # Errors
    ///
    /// Returns an error if the nation does not exist or a split is invalid.
    pub fn update_nation(&mut self, nation: &NationId, update: NationUpdate) -> CommandResult<()> {
        log::debug!("update {nation}: {update:?}");
        update_nation(&mut self.world, nation, update)?;
        assert_invariants(&self.world);
        Ok(())
    }

    /// Set a territory's supply to `min(amount, infrastructure)`.
    ///
    /// Returns the supply actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnknownTerritory`] if the territory does not exist.
    pub fn distribute_supply(&mut self, territory: &TerritoryId, amount: u32) -> CommandResult<u32> {
        let applied = distribute_supply(&mut self.world, territory, amount)?;
        log::debug!("supply {territory}: requested {amount}, applied {applied}");
        Ok(applied)
    }

    /// Queue a troop move, debiting the source immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unknown, holds too few troops, is
    /// not adjacent to the destination, or the destination is already under
    /// attack by another nation.
    pub fn queue_move(
        &mut self,
        from: &TerritoryId,
        to: &TerritoryId,
        troops: u32,
    ) -> CommandResult<MoveId> {
        let id = queue_move(&mut self.world, &self.adjacency, from, to, troops)?;
        assert_invariants(&self.world);
        Ok(id)
    }

    /// Cancel a queued move and credit its troops back.
    ///
    /// Returns the removed move, or `None` if no such move is pending.
    pub fn cancel_move(&mut self, id: MoveId) -> Option<TroopMove> {
        cancel_move(&mut self.world, id)
    }

    /// Cancel every queued move. Returns how many were cancelled.
    pub fn clear_moves(&mut self) -> usize {
        let count = clear_moves(&mut self.world);
        log::debug!("cleared {count} moves");
        count
    }

    /// Run the current phase's exit rule, then move to the next phase.
    ///
    /// The turn counter increments when the cycle wraps back to the first
    /// phase.
    pub fn advance_phase(&mut self) -> PhaseReport {
        let exited = self.world.phase;
        let delta = exit_rule(exited, &self.world, &self.rules);
        let outcome = delta.apply(&mut self.world);

        let entered = exited.next();
        self.world.phase = entered;
        if entered == Phase::FIRST {
            self.world.turn += 1;
            log::info!("turn {} begins", self.world.turn);
        }
        log::debug!("{exited} -> {entered}");

        assert_invariants(&self.world);

        PhaseReport {
            exited,
            entered,
            turn: self.world.turn,
            outcome,
        }
    }

    /// Advance through every phase until the next turn begins.
    ///
    /// Returns one report per phase exited.
    pub fn advance_turn(&mut self) -> Vec<PhaseReport> {
        let start = self.world.turn;
        let mut reports = Vec::with_capacity(Phase::ALL.len());
        while self.world.turn == start {
            reports.push(self.advance_phase());
        }
        reports
    }

    /// Restore the starting state.
    pub fn reset(&mut self) {
        self.world = self.initial.clone();
        log::info!("world reset");
    }

    /// Run a [`Command`].
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying command.
    pub fn execute(&mut self, command: Command) -> CommandResult<CommandOutcome> {
        let outcome = match command {
            Command::SwitchActiveNation { nation } => {
                self.switch_active_nation(&nation)?;
                CommandOutcome::Done
            }
            Command::SelectTerritory { territory } => {
                self.select_territory(territory.as_ref())?;
                CommandOutcome::Done
            }
            Command::UpdateTerritory { territory, update } => {
                self.update_territory(&territory, update)?;
                CommandOutcome::Done
            }
            Command::UpdateNation { nation, update } => {
                self.update_nation(&nation, update)?;
                CommandOutcome::Done
            }
            Command::DistributeSupply { territory, amount } => CommandOutcome::SupplyDistributed {
                supply: self.distribute_supply(&territory, amount)?,
            },
            Command::QueueMove { from, to, troops } => CommandOutcome::MoveQueued {
                id: self.queue_move(&from, &to, troops)?,
            },
            Command::CancelMove { id } => CommandOutcome::MoveCancelled {
                cancelled: self.cancel_move(id),
            },
            Command::ClearMoves => CommandOutcome::MovesCleared {
                count: self.clear_moves(),
            },
            Command::AdvancePhase => CommandOutcome::PhaseAdvanced(self.advance_phase()),
            Command::Reset => {
                self.reset();
                CommandOutcome::Done
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_helpers::{nid, test_scenario, tid};
    use crate::game::{BattleOutcome, PhaseOutcome, SupplyPolicy};

    fn engine() -> Engine {
        Engine::new(&test_scenario()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = engine();
        assert_eq!(engine.world().phase(), Phase::CombatMove);
        assert_eq!(engine.world().turn(), 1);
        assert_eq!(engine.world().active_nation(), &nid("n1"));
    }

    #[test]
    fn test_full_cycle_increments_turn_once() {
        let mut engine = engine();
        for _ in 0..7 {
            let report = engine.advance_phase();
            assert_eq!(report.turn, 1);
        }
        let report = engine.advance_phase();
        assert_eq!(report.exited, Phase::InfrastructureUpdate);
        assert_eq!(report.entered, Phase::CombatMove);
        assert_eq!(report.turn, 2);
    }

    #[test]
    fn test_advance_turn_reports_every_phase() {
        let mut engine = engine();
        let reports = engine.advance_turn();
        assert_eq!(reports.len(), 8);
        assert_eq!(engine.world().turn(), 2);
        assert_eq!(engine.world().phase(), Phase::CombatMove);
    }

    #[test]
    fn test_attack_captures_territory() {
        let mut engine = engine();
        engine.queue_move(&tid("A"), &tid("B"), 10).unwrap();
        assert_eq!(engine.world().territory(&tid("A")).unwrap().troops, 10);

        engine.advance_phase(); // CombatMove -> Combat
        let report = engine.advance_phase(); // Combat -> NonCombatMove

        let PhaseOutcome::Battles(battles) = report.outcome else {
            panic!("expected battles");
        };
        assert_eq!(battles[0].outcome, BattleOutcome::AttackerWins);
        let b = engine.world().territory(&tid("B")).unwrap();
        assert_eq!(b.owner, Some(nid("n1")));
        assert_eq!(b.troops, 5);
        assert!(engine.world().pending_moves().is_empty());
    }

    #[test]
    fn test_switch_active_nation() {
        let mut engine = engine();
        engine.switch_active_nation(&nid("n2")).unwrap();
        assert_eq!(engine.world().active_nation(), &nid("n2"));
        assert_eq!(
            engine.switch_active_nation(&nid("ghost")),
            Err(CommandError::UnknownNation(nid("ghost")))
        );
        assert_eq!(engine.world().active_nation(), &nid("n2"));
    }

    #[test]
    fn test_select_territory() {
        let mut engine = engine();
        engine.select_territory(Some(&tid("B"))).unwrap();
        assert_eq!(engine.world().selected(), Some(&tid("B")));
        engine.select_territory(None).unwrap();
        assert_eq!(engine.world().selected(), None);
        assert!(engine.select_territory(Some(&tid("ZZZ"))).is_err());
    }

    #[test]
    fn test_reset_restores_initial_world() {
        let mut engine = engine();
        let initial = engine.world().clone();
        engine.queue_move(&tid("A"), &tid("B"), 3).unwrap();
        engine.advance_turn();
        assert_ne!(engine.world(), &initial);

        engine.reset();
        assert_eq!(engine.world(), &initial);
    }

    #[test]
    fn test_execute_scripted_commands() {
        let mut engine = engine();
        let script: Vec<Command> = serde_json::from_str(
            r#"[
                {"command": "distribute_supply", "territory": "B", "amount": 99},
                {"command": "queue_move", "from": "A", "to": "B", "troops": 4},
                {"command": "advance_phase"}
            ]"#,
        )
        .unwrap();

        let outcomes: Vec<_> = script
            .into_iter()
            .map(|c| engine.execute(c).unwrap())
            .collect();

        assert_eq!(outcomes[0], CommandOutcome::SupplyDistributed { supply: 10 });
        assert!(matches!(outcomes[1], CommandOutcome::MoveQueued { .. }));
        assert_eq!(engine.world().phase(), Phase::Combat);
    }

    #[test]
    fn test_attrition_policy_end_to_end() {
        let mut scenario = test_scenario();
        scenario.rules.supply_policy = SupplyPolicy::Attrition;
        let mut engine = Engine::new(&scenario).unwrap();

        // Advance to the end of Consumption (exit of phase index 6).
        for _ in 0..7 {
            engine.advance_phase();
        }
        // C had 8 troops and no supply.
        assert_eq!(engine.world().territory(&tid("C")).unwrap().troops, 0);
        assert_eq!(engine.world().phase(), Phase::InfrastructureUpdate);
    }

    #[test]
    fn test_production_credits_resources() {
        let mut engine = engine();
        for _ in 0..4 {
            engine.advance_phase();
        }
        // n1 owns A, a resource node.
        assert_eq!(engine.world().nation(&nid("n1")).unwrap().resources, 110);
        assert_eq!(engine.world().nation(&nid("n2")).unwrap().resources, 100);
    }
}
