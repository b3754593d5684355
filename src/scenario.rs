//! Scenario files: the starting roster, map and rule settings.
//!
//! A scenario is a JSON document:
//!
//! ```json
//! {
//!   "nations": [{ "id": "usa", "name": "United States", ... }],
//!   "territories": [{ "id": "USA", "owner": "usa", "infrastructure": 40, ... }],
//!   "adjacency": { "USA": ["MEX", "CAN"] },
//!   "active_nation": "usa",
//!   "rules": { "supply_policy": "combat_penalty" }
//! }
//! ```
//!
//! `active_nation` defaults to the first nation, and `rules` to
//! [`RuleSet::default`].

use std::collections::{BTreeMap, btree_map::Entry};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::game::{AdjacencyGraph, Nation, NationId, RuleSet, Territory, TerritoryId, World};

const BUILTIN: &str = include_str!("../data/world_war.json");

/// A starting configuration for an [`Engine`](crate::game::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Nation roster, in declaration order.
    pub nations: Vec<Nation>,
    /// Territories, in declaration order.
    pub territories: Vec<Territory>,
    /// Neighbor lists. One-sided entries are mirrored on load.
    #[serde(default)]
    pub adjacency: BTreeMap<TerritoryId, Vec<TerritoryId>>,
    /// Nation controlled at the start.
    #[serde(default)]
    pub active_nation: Option<NationId>,
    /// Rule settings.
    #[serde(default)]
    pub rules: RuleSet,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if the text does not match the schema.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The built-in 1939 scenario: four powers and eighteen territories.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is malformed.
    pub fn builtin() -> Result<Self, ScenarioError> {
        Self::from_json(BUILTIN)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the scenario and build the starting world and graph.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn build(&self) -> Result<(World, AdjacencyGraph), ScenarioError> {
        let first = self.nations.first().ok_or(ScenarioError::NoNations)?;

        let mut nations = BTreeMap::new();
        for nation in &self.nations {
            check_splits(nation)?;
            match nations.entry(nation.id.clone()) {
                Entry::Occupied(_) => return Err(ScenarioError::DuplicateNation(nation.id.clone())),
                Entry::Vacant(slot) => {
                    slot.insert(nation.clone());
                }
            }
        }

        let mut territories = BTreeMap::new();
        for territory in &self.territories {
            if let Some(owner) = &territory.owner
                && !nations.contains_key(owner)
            {
                return Err(ScenarioError::UnknownOwner {
                    territory: territory.id.clone(),
                    owner: owner.clone(),
                });
            }
            if territory.supply > territory.infrastructure {
                return Err(ScenarioError::SupplyAboveInfrastructure(territory.id.clone()));
            }
            match territories.entry(territory.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(ScenarioError::DuplicateTerritory(territory.id.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(territory.clone());
                }
            }
        }

        let active = self.active_nation.clone().unwrap_or_else(|| first.id.clone());
        if !nations.contains_key(&active) {
            return Err(ScenarioError::UnknownActiveNation(active));
        }

        let graph = AdjacencyGraph::from_lists(&self.adjacency, |id| territories.contains_key(id))?;

        Ok((World::new(nations, territories, active), graph))
    }
}

fn check_splits(nation: &Nation) -> Result<(), ScenarioError> {
    let workforce = nation.workforce.total();
    if workforce != 100 {
        return Err(ScenarioError::BadSplit {
            nation: nation.id.clone(),
            split: "workforce",
            total: workforce,
        });
    }
    let allocation = nation.allocation.total();
    if allocation != 100 {
        return Err(ScenarioError::BadSplit {
            nation: nation.id.clone(),
            split: "allocation",
            total: allocation,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_helpers::{nid, test_scenario, tid};

    #[test]
    fn test_builtin_scenario_is_valid() {
        let scenario = Scenario::builtin().unwrap();
        let (world, graph) = scenario.build().unwrap();

        assert_eq!(world.nations().len(), 4);
        assert_eq!(world.territories().len(), 18);
        assert_eq!(world.active_nation(), &nid("usa"));
        assert!(graph.are_adjacent(&tid("USA"), &tid("CAN")));
        assert!(graph.are_adjacent(&tid("CAN"), &tid("USA")));
        assert!(!graph.are_adjacent(&tid("USA"), &tid("GBR")));
    }

    #[test]
    fn test_active_nation_defaults_to_first() {
        let mut scenario = test_scenario();
        scenario.active_nation = None;
        let (world, _) = scenario.build().unwrap();
        assert_eq!(world.active_nation(), &nid("n1"));
    }

    #[test]
    fn test_empty_roster_rejected() {
        let mut scenario = test_scenario();
        scenario.nations.clear();
        assert!(matches!(scenario.build(), Err(ScenarioError::NoNations)));
    }

    #[test]
    fn test_duplicate_territory_rejected() {
        let mut scenario = test_scenario();
        let copy = scenario.territories[0].clone();
        scenario.territories.push(copy);
        assert!(matches!(
            scenario.build(),
            Err(ScenarioError::DuplicateTerritory(id)) if id == tid("A")
        ));
    }

    #[test]
    fn test_unknown_owner_rejected() {
        let mut scenario = test_scenario();
        scenario.territories[2].owner = Some(nid("ghost"));
        assert!(matches!(scenario.build(), Err(ScenarioError::UnknownOwner { .. })));
    }

    #[test]
    fn test_bad_allocation_rejected() {
        let mut scenario = test_scenario();
        scenario.nations[1].allocation.research = 0;
        assert!(matches!(
            scenario.build(),
            Err(ScenarioError::BadSplit { split: "allocation", total: 80, .. })
        ));
    }

    #[test]
    fn test_supply_above_infrastructure_rejected() {
        let mut scenario = test_scenario();
        scenario.territories[1].supply = 11;
        assert!(matches!(
            scenario.build(),
            Err(ScenarioError::SupplyAboveInfrastructure(_))
        ));
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let scenario = Scenario::from_json(
            r##"{
                "nations": [{
                    "id": "x", "name": "X", "color": "#000000",
                    "production": 10, "resources": 0, "manpower": 0,
                    "workforce": {"industry": 50, "military": 50},
                    "allocation": {"supply": 100, "infrastructure": 0, "research": 0}
                }],
                "territories": [
                    {"id": "T", "name": "T", "owner": "x", "infrastructure": 5, "troops": 3}
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(scenario.rules, RuleSet::default());
        let (world, graph) = scenario.build().unwrap();
        assert!(graph.is_empty());
        assert_eq!(world.territory(&tid("T")).unwrap().supply, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let scenario = test_scenario();
        let text = scenario.to_json().unwrap();
        assert_eq!(Scenario::from_json(&text).unwrap(), scenario);
    }
}
