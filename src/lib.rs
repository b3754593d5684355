// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Warfront: a deterministic turn/phase simulation core for grand-strategy
//! prototypes.
//!
//! A fixed cycle of eight phases advances a world of nations and
//! territories. Each phase boundary runs one rule: combat resolution,
//! troop arrival, resource production, supply consumption, or the
//! infrastructure budget report.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Commands (Engine / Command enum)  │
//! ├─────────────────────────────────────┤
//! │   Phase Engine  ->  Phase Rules     │
//! ├─────────────────────────────────────┤
//! │   Move Ledger   |  Adjacency Graph  │
//! ├─────────────────────────────────────┤
//! │   World Model (nations, territories)│
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use warfront::{Engine, Scenario, TerritoryId};
//!
//! let scenario = Scenario::builtin().unwrap();
//! let mut engine = Engine::new(&scenario).unwrap();
//!
//! engine
//!     .queue_move(&TerritoryId::new("DEU"), &TerritoryId::new("POL"), 5)
//!     .unwrap();
//! let report = engine.advance_phase();
//! assert_eq!(report.turn, 1);
//! ```

pub mod error;
pub mod game;
pub mod scenario;

pub use error::{CommandError, CommandResult, ScenarioError};
pub use scenario::Scenario;

// Re-export key game types at crate root for convenience
pub use game::{
    Command, CommandOutcome, Engine, Nation, NationId, Phase, PhaseReport, RuleSet,
    SupplyPolicy, Territory, TerritoryId, World,
};
