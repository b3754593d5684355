//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::game::{
    AdjacencyGraph, MoveId, Nation, NationId, ProductionAllocation, RuleSet, Territory,
    TerritoryId, TroopMove, World, WorkforceSplit,
};
use crate::scenario::Scenario;

pub(crate) fn nid(id: &str) -> NationId {
    NationId::new(id)
}

pub(crate) fn tid(id: &str) -> TerritoryId {
    TerritoryId::new(id)
}

fn nation(id: &str) -> Nation {
    Nation {
        id: nid(id),
        name: id.to_uppercase(),
        color: "#888888".to_string(),
        production: 100,
        resources: 100,
        manpower: 100,
        workforce: WorkforceSplit {
            industry: 70,
            military: 30,
        },
        allocation: ProductionAllocation {
            supply: 50,
            infrastructure: 30,
            research: 20,
        },
    }
}

fn territory(
    id: &str,
    owner: Option<&str>,
    infrastructure: u32,
    troops: u32,
    supply: u32,
    node: bool,
) -> Territory {
    Territory {
        owner: owner.map(nid),
        troops,
        supply,
        has_resource_node: node,
        ..Territory::new(tid(id), id, infrastructure)
    }
}

/// Nations n1 and n2 on a three-territory line `A - B - C`.
///
/// A is n1's (20 troops, fully supplied, resource node), B is n2's (5 troops,
/// fully supplied), C is neutral (8 troops, no supply).
pub(crate) fn test_scenario() -> Scenario {
    let mut adjacency = BTreeMap::new();
    adjacency.insert(tid("A"), vec![tid("B")]);
    adjacency.insert(tid("B"), vec![tid("A"), tid("C")]);
    adjacency.insert(tid("C"), vec![tid("B")]);

    Scenario {
        nations: vec![nation("n1"), nation("n2")],
        territories: vec![
            territory("A", Some("n1"), 30, 20, 20, true),
            territory("B", Some("n2"), 10, 5, 5, false),
            territory("C", None, 10, 8, 0, false),
        ],
        adjacency,
        active_nation: Some(nid("n1")),
        rules: RuleSet::default(),
    }
}

pub(crate) fn two_nation_world() -> World {
    test_scenario().build().unwrap().0
}

pub(crate) fn line_graph() -> AdjacencyGraph {
    test_scenario().build().unwrap().1
}

/// Push a move without validating or debiting the source.
pub(crate) fn stage(world: &mut World, from: &str, to: &str, troops: u32) {
    let nation = world.territory(&tid(from)).and_then(|t| t.owner.clone());
    let id = MoveId::new(world.allocate_move_id());
    world.pending_moves.push(TroopMove {
        id,
        from: tid(from),
        to: tid(to),
        troops,
        nation,
    });
}
