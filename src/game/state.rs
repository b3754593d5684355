//! World state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::game::{Nation, NationId, Phase, Territory, TerritoryId, TroopMove};

/// Complete simulation state.
///
/// Owned by [`Engine`](crate::game::Engine), which is its only writer.
/// Nations and territories live in ordered maps so every rule iterates them
/// in the same order on every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    pub(crate) phase: Phase,
    pub(crate) turn: u32,
    pub(crate) active_nation: NationId,
    pub(crate) nations: BTreeMap<NationId, Nation>,
    pub(crate) territories: BTreeMap<TerritoryId, Territory>,
    pub(crate) selected: Option<TerritoryId>,
    pub(crate) pending_moves: Vec<TroopMove>,
    #[serde(skip)]
    pub(crate) next_move_id: u64,
}

impl World {
    /// Create a world at the start of turn 1.
    ///
    /// Callers are responsible for validating the roster first.
    pub(crate) fn new(
        nations: BTreeMap<NationId, Nation>,
        territories: BTreeMap<TerritoryId, Territory>,
        active_nation: NationId,
    ) -> Self {
        Self {
            phase: Phase::FIRST,
            turn: 1,
            active_nation,
            nations,
            territories,
            selected: None,
            pending_moves: Vec::new(),
            next_move_id: 1,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current turn (1-indexed).
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Nation currently being controlled.
    #[must_use]
    pub const fn active_nation(&self) -> &NationId {
        &self.active_nation
    }

    /// All nations, keyed by id.
    #[must_use]
    pub const fn nations(&self) -> &BTreeMap<NationId, Nation> {
        &self.nations
    }

    /// Get a nation by id.
    #[must_use]
    pub fn nation(&self, id: &NationId) -> Option<&Nation> {
        self.nations.get(id)
    }

    /// All territories, keyed by id.
    #[must_use]
    pub const fn territories(&self) -> &BTreeMap<TerritoryId, Territory> {
        &self.territories
    }

    /// Get a territory by id.
    #[must_use]
    pub fn territory(&self, id: &TerritoryId) -> Option<&Territory> {
        self.territories.get(id)
    }

    /// Territories owned by a nation.
    pub fn territories_owned_by<'a>(
        &'a self,
        nation: &'a NationId,
    ) -> impl Iterator<Item = &'a Territory> {
        self.territories.values().filter(move |t| t.is_owned_by(nation))
    }

    /// Currently selected territory, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&TerritoryId> {
        self.selected.as_ref()
    }

    /// Pending troop moves, in the order they were queued.
    #[must_use]
    pub fn pending_moves(&self) -> &[TroopMove] {
        &self.pending_moves
    }

    /// Total troops across all territories plus troops in transit.
    #[must_use]
    pub fn total_troops(&self) -> u64 {
        let garrisons: u64 = self.territories.values().map(|t| u64::from(t.troops)).sum();
        let in_transit: u64 = self.pending_moves.iter().map(|m| u64::from(m.troops)).sum();
        garrisons + in_transit
    }

    pub(crate) fn territory_mut(&mut self, id: &TerritoryId) -> Option<&mut Territory> {
        self.territories.get_mut(id)
    }

    pub(crate) fn allocate_move_id(&mut self) -> u64 {
        let id = self.next_move_id;
        self.next_move_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use crate::game::test_helpers::{nid, tid, two_nation_world};

    #[test]
    fn test_world_starts_at_turn_one() {
        let world = two_nation_world();
        assert_eq!(world.turn(), 1);
        assert_eq!(world.phase(), crate::game::Phase::CombatMove);
        assert!(world.pending_moves().is_empty());
        assert!(world.selected().is_none());
    }

    #[test]
    fn test_territories_owned_by() {
        let world = two_nation_world();
        let n1 = nid("n1");
        let owned: Vec<_> = world.territories_owned_by(&n1).map(|t| t.id.clone()).collect();
        assert_eq!(owned, vec![tid("A")]);
    }

    #[test]
    fn test_move_ids_are_monotonic() {
        let mut world = two_nation_world();
        let a = world.allocate_move_id();
        let b = world.allocate_move_id();
        assert!(b > a);
    }

    #[test]
    fn test_total_troops() {
        let world = two_nation_world();
        assert_eq!(world.total_troops(), 20 + 5 + 8);
    }
}
