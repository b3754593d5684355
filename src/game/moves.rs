//! Move ledger: queued troop movements.
//!
//! Queuing debits the source garrison immediately, so validation always sees
//! the already-debited count and the moves queued out of one territory can
//! never add up to more than it originally held. Cancelling credits the
//! troops back exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult};
use crate::game::{AdjacencyGraph, NationId, Phase, TerritoryId, World};

/// Identifier of a queued move. Never reused within a world.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MoveId(u64);

impl MoveId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed but unresolved movement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroopMove {
    /// Unique identifier.
    pub id: MoveId,
    /// Source territory (already debited).
    pub from: TerritoryId,
    /// Destination territory.
    pub to: TerritoryId,
    /// Troops in transit. Always positive.
    pub troops: u32,
    /// Owner of the source when the move was queued (None = neutral forces).
    pub nation: Option<NationId>,
}

/// Queue a move, debiting the source garrison.
pub(crate) fn queue_move(
    world: &mut World,
    graph: &AdjacencyGraph,
    from: &TerritoryId,
    to: &TerritoryId,
    troops: u32,
) -> CommandResult<MoveId> {
    let source = world
        .territory(from)
        .ok_or_else(|| CommandError::InvalidSource(from.clone()))?;

    if troops == 0 {
        return Err(CommandError::InvalidTroopCount);
    }
    if troops > source.troops {
        return Err(CommandError::InsufficientTroops {
            from: from.clone(),
            requested: troops,
            available: source.troops,
        });
    }
    if !graph.are_adjacent(from, to) {
        return Err(CommandError::NotAdjacent {
            from: from.clone(),
            to: to.clone(),
        });
    }

    let nation = source.owner.clone();
    let destination = world
        .territory(to)
        .ok_or_else(|| CommandError::UnknownTerritory(to.clone()))?;

    // One attacking nation per destination. Non-combat moves arrive unopposed.
    if world.phase != Phase::NonCombatMove && nation != destination.owner {
        let rival = world.pending_moves.iter().find(|m| {
            &m.to == to && m.nation != destination.owner && m.nation != nation
        });
        if let Some(rival) = rival {
            return Err(CommandError::MixedAttackers {
                to: to.clone(),
                existing: rival
                    .nation
                    .as_ref()
                    .map_or_else(|| "neutral forces".to_string(), ToString::to_string),
            });
        }
    }

    if let Some(source) = world.territory_mut(from) {
        source.troops -= troops;
    }
    let id = MoveId::new(world.allocate_move_id());
    world.pending_moves.push(TroopMove {
        id,
        from: from.clone(),
        to: to.clone(),
        troops,
        nation,
    });

    log::debug!("queued move {id}: {troops} troops {from} -> {to}");
    Ok(id)
}

/// Cancel a move, crediting its troops back. Unknown ids are a no-op.
pub(crate) fn cancel_move(world: &mut World, id: MoveId) -> Option<TroopMove> {
    let index = world.pending_moves.iter().position(|m| m.id == id)?;
    let removed = world.pending_moves.remove(index);
    credit_source(world, &removed);
    log::debug!("cancelled move {id}");
    Some(removed)
}

/// Cancel every pending move. Returns how many were cleared.
pub(crate) fn clear_moves(world: &mut World) -> usize {
    let moves = std::mem::take(&mut world.pending_moves);
    for m in &moves {
        credit_source(world, m);
    }
    moves.len()
}

fn credit_source(world: &mut World, m: &TroopMove) {
    if let Some(source) = world.territory_mut(&m.from) {
        source.troops = source.troops.saturating_add(m.troops);
    }
}
