//! World invariants - sanity checks that detect bugs.
//!
//! Every command validates its input before writing, so none of these should
//! ever trigger. If one does, a rule or command has a bug.

use std::collections::BTreeSet;

use crate::game::World;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all world invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violation = |message: String| violations.push(InvariantViolation { message });

    if world.turn == 0 {
        violation("turn counter is 0".to_string());
    }

    if !world.nations.contains_key(&world.active_nation) {
        violation(format!("active nation {} does not exist", world.active_nation));
    }

    if let Some(selected) = &world.selected
        && !world.territories.contains_key(selected)
    {
        violation(format!("selected territory {selected} does not exist"));
    }

    for (id, nation) in &world.nations {
        if id != &nation.id {
            violation(format!("nation keyed {id} has id {}", nation.id));
        }
        if nation.workforce.total() != 100 {
            violation(format!(
                "nation {id} workforce sums to {}",
                nation.workforce.total()
            ));
        }
        if nation.allocation.total() != 100 {
            violation(format!(
                "nation {id} allocation sums to {}",
                nation.allocation.total()
            ));
        }
    }

    for (id, territory) in &world.territories {
        if id != &territory.id {
            violation(format!("territory keyed {id} has id {}", territory.id));
        }
        if territory.supply > territory.infrastructure {
            violation(format!(
                "territory {id} has supply {} > infrastructure {}",
                territory.supply, territory.infrastructure
            ));
        }
        if let Some(owner) = &territory.owner
            && !world.nations.contains_key(owner)
        {
            violation(format!("territory {id} owned by unknown nation {owner}"));
        }
    }

    let mut seen = BTreeSet::new();
    for m in &world.pending_moves {
        if m.troops == 0 {
            violation(format!("move {} carries no troops", m.id));
        }
        if !seen.insert(m.id) {
            violation(format!("move id {} is used twice", m.id));
        }
        if m.id.get() >= world.next_move_id {
            violation(format!(
                "move id {} not below next id {}",
                m.id, world.next_move_id
            ));
        }
        if !world.territories.contains_key(&m.from) || !world.territories.contains_key(&m.to) {
            violation(format!("move {} references an unknown territory", m.id));
        }
    }

    violations
}

/// Assert all invariants hold (panics in debug builds if violated).
///
/// In release builds, this is a no-op.
///
/// # Panics
///
/// Panics listing every violation if any invariant is broken.
#[cfg(debug_assertions)]
pub fn assert_invariants(world: &World) {
    let violations = check_invariants(world);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
        panic!("Invariant violations:\n{}", messages.join("\n"));
    }
}

/// Assert all invariants hold (no-op in release builds).
#[cfg(not(debug_assertions))]
pub const fn assert_invariants(_world: &World) {}
