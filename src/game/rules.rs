//! Phase-exit rules.
//!
//! Each phase maps to exactly one rule in [`exit_rule`]. A rule reads the
//! world immutably and returns a [`PhaseDelta`]; the engine applies the delta
//! and moves to the next phase in the same call.

use serde::{Deserialize, Serialize};

use crate::game::{
    AttritionLoss, BattleReport, InfrastructureBudget, Nation, Phase, ResourceGain, Territory,
    TerritoryId, World, accrue_resources, apply_consumption, infrastructure_budgets,
    resolve_combat,
};

/// How logistics shortfalls are punished. Exactly one applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyPolicy {
    /// Unsupplied troops fight at half weight; consumption changes nothing.
    #[default]
    CombatPenalty,
    /// Unsupplied troops die when consumption ends; combat ignores supply.
    Attrition,
}

/// Tunable rule settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Logistics penalty model.
    pub supply_policy: SupplyPolicy,
    /// Resources paid per owned resource node each production phase.
    pub resource_node_yield: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            supply_policy: SupplyPolicy::default(),
            resource_node_yield: 10,
        }
    }
}

/// Troops arriving at a territory from non-combat moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arrival {
    /// Destination.
    pub territory: TerritoryId,
    /// Troops added.
    pub troops: u32,
}

/// What a phase-exit rule did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// No rule ran, or the rule changed nothing.
    Unchanged,
    /// Combat was resolved.
    Battles(Vec<BattleReport>),
    /// Non-combat moves arrived.
    Arrivals(Vec<Arrival>),
    /// Resource nodes paid out.
    Production(Vec<ResourceGain>),
    /// Unsupplied troops were lost.
    Attrition(Vec<AttritionLoss>),
    /// Infrastructure budgets were computed (not applied).
    InfrastructureBudgets(Vec<InfrastructureBudget>),
}

/// Result of one phase advance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseReport {
    /// Phase that was left.
    pub exited: Phase,
    /// Phase now current.
    pub entered: Phase,
    /// Turn after the advance.
    pub turn: u32,
    /// What the exit rule did.
    pub outcome: PhaseOutcome,
}

/// State changes produced by an exit rule.
#[derive(Debug, Clone)]
pub(crate) struct PhaseDelta {
    nations: Vec<Nation>,
    territories: Vec<Territory>,
    clear_moves: bool,
    outcome: PhaseOutcome,
}

impl PhaseDelta {
    fn unchanged() -> Self {
        Self {
            nations: Vec::new(),
            territories: Vec::new(),
            clear_moves: false,
            outcome: PhaseOutcome::Unchanged,
        }
    }

    /// Write the delta into the world. Returns the rule's outcome.
    pub(crate) fn apply(self, world: &mut World) -> PhaseOutcome {
        for nation in self.nations {
            world.nations.insert(nation.id.clone(), nation);
        }
        for territory in self.territories {
            world.territories.insert(territory.id.clone(), territory);
        }
        if self.clear_moves {
            world.pending_moves.clear();
        }
        self.outcome
    }
}

/// Compute the exit rule for `phase` against the current world.
pub(crate) fn exit_rule(phase: Phase, world: &World, rules: &RuleSet) -> PhaseDelta {
    match phase {
        // Staged attacks carry over into combat untouched.
        Phase::CombatMove | Phase::Allocation | Phase::SupplyDistribution => {
            PhaseDelta::unchanged()
        }
        Phase::Combat => {
            let resolution = resolve_combat(world, rules.supply_policy);
            PhaseDelta {
                nations: Vec::new(),
                territories: resolution.territories,
                clear_moves: true,
                outcome: PhaseOutcome::Battles(resolution.battles),
            }
        }
        Phase::NonCombatMove => {
            let (territories, arrivals) = arrive_moves(world);
            PhaseDelta {
                nations: Vec::new(),
                territories,
                clear_moves: true,
                outcome: PhaseOutcome::Arrivals(arrivals),
            }
        }
        Phase::Production => {
            let (nations, gains) = accrue_resources(world, rules.resource_node_yield);
            PhaseDelta {
                nations,
                territories: Vec::new(),
                clear_moves: false,
                outcome: PhaseOutcome::Production(gains),
            }
        }
        Phase::Consumption => {
            let (territories, losses) = apply_consumption(world, rules.supply_policy);
            let outcome = if losses.is_empty() {
                PhaseOutcome::Unchanged
            } else {
                PhaseOutcome::Attrition(losses)
            };
            PhaseDelta {
                nations: Vec::new(),
                territories,
                clear_moves: false,
                outcome,
            }
        }
        Phase::InfrastructureUpdate => PhaseDelta {
            outcome: PhaseOutcome::InfrastructureBudgets(infrastructure_budgets(world)),
            ..PhaseDelta::unchanged()
        },
    }
}

/// Add every pending move's troops to its destination without a fight.
fn arrive_moves(world: &World) -> (Vec<Territory>, Vec<Arrival>) {
    let mut territories: Vec<Territory> = Vec::new();
    let mut arrivals = Vec::with_capacity(world.pending_moves().len());

    for m in world.pending_moves() {
        let index = match territories.iter().position(|t| t.id == m.to) {
            Some(index) => index,
            None => {
                let Some(destination) = world.territory(&m.to) else {
                    continue;
                };
                territories.push(destination.clone());
                territories.len() - 1
            }
        };
        let destination = &mut territories[index];
        destination.troops = destination.troops.saturating_add(m.troops);
        arrivals.push(Arrival {
            territory: m.to.clone(),
            troops: m.troops,
        });
    }

    (territories, arrivals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_helpers::{nid, stage, tid, two_nation_world};

    #[test]
    fn test_combat_move_exit_preserves_moves() {
        let mut world = two_nation_world();
        stage(&mut world, "A", "B", 5);
        let before = world.clone();

        let outcome = exit_rule(Phase::CombatMove, &world, &RuleSet::default()).apply(&mut world);

        assert_eq!(outcome, PhaseOutcome::Unchanged);
        assert_eq!(world, before);
    }

    #[test]
    fn test_combat_exit_consumes_moves() {
        let mut world = two_nation_world();
        world.territory_mut(&tid("A")).unwrap().troops = 10;
        stage(&mut world, "A", "B", 10);

        let outcome = exit_rule(Phase::Combat, &world, &RuleSet::default()).apply(&mut world);

        assert!(matches!(outcome, PhaseOutcome::Battles(ref b) if b.len() == 1));
        assert!(world.pending_moves().is_empty());
        assert_eq!(world.territory(&tid("B")).unwrap().owner, Some(nid("n1")));
    }

    #[test]
    fn test_non_combat_exit_adds_troops() {
        let mut world = two_nation_world();
        world.territory_mut(&tid("A")).unwrap().troops = 12;
        stage(&mut world, "A", "B", 3);
        stage(&mut world, "A", "B", 5);

        let outcome =
            exit_rule(Phase::NonCombatMove, &world, &RuleSet::default()).apply(&mut world);

        let PhaseOutcome::Arrivals(arrivals) = outcome else {
            panic!("expected arrivals");
        };
        assert_eq!(arrivals.len(), 2);
        // No combat check: B keeps its owner and gains all 8.
        let b = world.territory(&tid("B")).unwrap();
        assert_eq!(b.troops, 13);
        assert_eq!(b.owner, Some(nid("n2")));
        assert!(world.pending_moves().is_empty());
    }

    #[test]
    fn test_consumption_outcome_depends_on_policy() {
        let world = two_nation_world();

        let penalty = exit_rule(Phase::Consumption, &world, &RuleSet::default());
        assert_eq!(penalty.outcome, PhaseOutcome::Unchanged);

        let attrition = RuleSet {
            supply_policy: SupplyPolicy::Attrition,
            ..RuleSet::default()
        };
        let delta = exit_rule(Phase::Consumption, &world, &attrition);
        assert!(matches!(delta.outcome, PhaseOutcome::Attrition(_)));
    }

    #[test]
    fn test_infrastructure_update_changes_nothing() {
        let mut world = two_nation_world();
        let before = world.clone();

        let outcome =
            exit_rule(Phase::InfrastructureUpdate, &world, &RuleSet::default()).apply(&mut world);

        assert!(matches!(outcome, PhaseOutcome::InfrastructureBudgets(ref b) if b.len() == 2));
        assert_eq!(world, before);
    }

    #[test]
    fn test_rule_set_deserializes_with_defaults() {
        let rules: RuleSet = serde_json::from_str(r#"{"supply_policy": "attrition"}"#).unwrap();
        assert_eq!(rules.supply_policy, SupplyPolicy::Attrition);
        assert_eq!(rules.resource_node_yield, 10);
    }
}
