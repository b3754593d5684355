//! Error types for commands and scenario loading.

use thiserror::Error;

use crate::game::{NationId, TerritoryId};

/// A command was rejected. The world is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The source territory of a move does not exist.
    #[error("invalid move source: territory {0} does not exist")]
    InvalidSource(TerritoryId),
    /// A referenced territory does not exist.
    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),
    /// A referenced nation does not exist.
    #[error("unknown nation {0}")]
    UnknownNation(NationId),
    /// A move asked for more troops than the source currently holds.
    #[error("insufficient troops in {from}: requested {requested}, available {available}")]
    InsufficientTroops {
        /// Source territory.
        from: TerritoryId,
        /// Troops requested by the move.
        requested: u32,
        /// Troops currently garrisoned at the source.
        available: u32,
    },
    /// Source and destination do not border each other.
    #[error("{from} is not adjacent to {to}")]
    NotAdjacent {
        /// Source territory.
        from: TerritoryId,
        /// Destination territory.
        to: TerritoryId,
    },
    /// A move must carry at least one troop.
    #[error("a move must carry at least one troop")]
    InvalidTroopCount,
    /// Another nation is already attacking the destination this phase.
    #[error("{to} is already under attack by {existing}")]
    MixedAttackers {
        /// Contested destination.
        to: TerritoryId,
        /// Nation whose attack is already queued.
        existing: String,
    },
    /// A direct supply edit exceeded the territory's infrastructure.
    #[error("supply {supply} exceeds infrastructure {infrastructure}")]
    SupplyExceedsInfrastructure {
        /// Requested supply.
        supply: u32,
        /// Infrastructure ceiling.
        infrastructure: u32,
    },
    /// A percentage outside `0..=100`.
    #[error("percentage {0} is outside 0..=100")]
    InvalidPercentage(u8),
    /// Production allocation shares do not sum to 100.
    #[error("production allocation sums to {0}, expected 100")]
    InvalidAllocation(u32),
}

/// Result type for world commands.
pub type CommandResult<T> = Result<T, CommandError>;

/// A scenario could not be loaded or failed validation.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Reading the scenario file failed.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    /// The scenario is not valid JSON for the expected schema.
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    /// The scenario declares no nations.
    #[error("scenario declares no nations")]
    NoNations,
    /// Two nations share an identifier.
    #[error("duplicate nation id {0}")]
    DuplicateNation(NationId),
    /// Two territories share an identifier.
    #[error("duplicate territory id {0}")]
    DuplicateTerritory(TerritoryId),
    /// A territory is owned by a nation that does not exist.
    #[error("territory {territory} is owned by unknown nation {owner}")]
    UnknownOwner {
        /// Offending territory.
        territory: TerritoryId,
        /// Owner that is not in the roster.
        owner: NationId,
    },
    /// The initially active nation does not exist.
    #[error("active nation {0} is not in the roster")]
    UnknownActiveNation(NationId),
    /// A nation's workforce or allocation split does not sum to 100.
    #[error("nation {nation}: {split} sums to {total}, expected 100")]
    BadSplit {
        /// Offending nation.
        nation: NationId,
        /// Which split is wrong.
        split: &'static str,
        /// Actual sum.
        total: u32,
    },
    /// A territory starts with more supply than infrastructure.
    #[error("territory {0} starts with supply above infrastructure")]
    SupplyAboveInfrastructure(TerritoryId),
    /// The adjacency table references a territory that does not exist.
    #[error("adjacency references unknown territory {0}")]
    UnknownAdjacency(TerritoryId),
    /// The adjacency table links a territory to itself.
    #[error("territory {0} is listed as its own neighbor")]
    SelfAdjacency(TerritoryId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_troops_message() {
        let err = CommandError::InsufficientTroops {
            from: TerritoryId::new("USA"),
            requested: 30,
            available: 20,
        };
        let msg = err.to_string();
        assert!(msg.contains("USA"));
        assert!(msg.contains("30"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn test_bad_split_message() {
        let err = ScenarioError::BadSplit {
            nation: NationId::new("usa"),
            split: "workforce",
            total: 90,
        };
        assert_eq!(err.to_string(), "nation usa: workforce sums to 90, expected 100");
    }
}
