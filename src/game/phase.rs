//! The fixed eight-step phase cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One stage of the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Attack orders are staged.
    CombatMove,
    /// Staged attacks are resolved when this phase ends.
    Combat,
    /// Friendly repositioning; arrives when this phase ends.
    NonCombatMove,
    /// Resource nodes pay out when this phase ends.
    Production,
    /// Player checkpoint for workforce and production settings.
    Allocation,
    /// Player checkpoint for distributing supply.
    SupplyDistribution,
    /// Logistics pressure is applied when this phase ends.
    Consumption,
    /// Infrastructure budgets are reported when this phase ends.
    InfrastructureUpdate,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Phase; 8] = [
        Phase::CombatMove,
        Phase::Combat,
        Phase::NonCombatMove,
        Phase::Production,
        Phase::Allocation,
        Phase::SupplyDistribution,
        Phase::Consumption,
        Phase::InfrastructureUpdate,
    ];

    /// The phase every turn starts in.
    pub const FIRST: Phase = Phase::CombatMove;

    /// Position of this phase in the cycle.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The phase that follows this one. Wraps to [`Phase::FIRST`].
    #[must_use]
    pub const fn next(self) -> Phase {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Whether leaving this phase runs a rule that can change the world.
    ///
    /// `Allocation` and `SupplyDistribution` are pure player checkpoints.
    #[must_use]
    pub const fn has_exit_rule(self) -> bool {
        !matches!(self, Phase::Allocation | Phase::SupplyDistribution)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Phase::CombatMove => "Combat Move",
            Phase::Combat => "Combat Resolution",
            Phase::NonCombatMove => "Non-Combat Move",
            Phase::Production => "Production",
            Phase::Allocation => "Allocation",
            Phase::SupplyDistribution => "Supply Distribution",
            Phase::Consumption => "Consumption",
            Phase::InfrastructureUpdate => "Infrastructure Update",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
