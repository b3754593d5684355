//! Combat resolution.
//!
//! Troops that outnumber the supply reaching their territory fight at half
//! weight. Strength is tracked in half-troop units so every comparison is
//! exact integer arithmetic and ties are well defined.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::game::{NationId, SupplyPolicy, Territory, TerritoryId, TroopMove, World};

/// Combat power after the supply penalty, in half-troop units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Strength(u64);

impl Strength {
    /// Strength of `troops` fighting with `supply` under `policy`.
    ///
    /// Under [`SupplyPolicy::CombatPenalty`] the unsupplied shortfall counts
    /// half. Under [`SupplyPolicy::Attrition`] undersupply was already paid
    /// for in troops, so every troop counts fully.
    #[must_use]
    pub fn of(troops: u32, supply: u32, policy: SupplyPolicy) -> Self {
        let troops = u64::from(troops);
        match policy {
            SupplyPolicy::CombatPenalty => Self(troops + troops.min(u64::from(supply))),
            SupplyPolicy::Attrition => Self(troops * 2),
        }
    }

    /// Strength in whole-troop units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }

    /// Raw half-troop units.
    #[must_use]
    pub const fn half_units(self) -> u64 {
        self.0
    }
}

impl std::ops::Add for Strength {
    type Output = Strength;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Strength {
    fn sum<I: Iterator<Item = Strength>>(iter: I) -> Self {
        iter.fold(Strength::default(), |acc, s| acc + s)
    }
}

/// Effective strength of a troop count given its supply.
///
/// Fully supplied troops (`supply >= troops`) count at face value; the
/// shortfall fights at half weight: `(troops - shortfall) + shortfall * 0.5`.
#[must_use]
pub fn effective_strength(troops: u32, supply: u32) -> f64 {
    Strength::of(troops, supply, SupplyPolicy::CombatPenalty).as_f64()
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    /// The attacker captured the territory.
    AttackerWins,
    /// The defender held.
    DefenderHolds,
    /// Equal strength: both sides annihilated, ownership unchanged.
    Stalemate,
}

/// Outcome of a single battle and the garrison left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleResult {
    /// Who won.
    pub outcome: BattleOutcome,
    /// Troops left in the territory.
    pub survivors: u32,
}

/// Resolve one battle from raw troop counts and effective strengths.
///
/// The winner keeps `floor(difference × raw / strength)` troops: the strength
/// margin converted back into real troops at the winner's own
/// troops-per-strength rate. A capturing force always leaves at least one
/// occupier.
#[must_use]
pub fn resolve_battle(
    attacking_troops: u64,
    attack: Strength,
    defending_troops: u64,
    defence: Strength,
) -> BattleResult {
    match attack.cmp(&defence) {
        Ordering::Greater => BattleResult {
            outcome: BattleOutcome::AttackerWins,
            survivors: survivors(attack.0 - defence.0, attacking_troops, attack.0).max(1),
        },
        Ordering::Less => BattleResult {
            outcome: BattleOutcome::DefenderHolds,
            survivors: survivors(defence.0 - attack.0, defending_troops, defence.0),
        },
        Ordering::Equal => BattleResult {
            outcome: BattleOutcome::Stalemate,
            survivors: 0,
        },
    }
}

fn survivors(margin: u64, raw: u64, strength: u64) -> u32 {
    if strength == 0 {
        return 0;
    }
    let kept = u128::from(margin) * u128::from(raw) / u128::from(strength);
    u32::try_from(kept).unwrap_or(u32::MAX)
}

/// Record of one contested territory after combat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleReport {
    /// Contested territory.
    pub territory: TerritoryId,
    /// Attacking nation (None = neutral forces).
    pub attacker: Option<NationId>,
    /// Owner before the battle.
    pub defender: Option<NationId>,
    /// Raw attacking troops.
    pub attacking_troops: u64,
    /// Attacker effective strength.
    pub attack_strength: f64,
    /// Raw defending troops, including same-turn reinforcements.
    pub defending_troops: u64,
    /// Defender effective strength.
    pub defence_strength: f64,
    /// Who won.
    pub outcome: BattleOutcome,
    /// Troops left in the territory.
    pub survivors: u32,
}

/// Territory changes and battle reports produced by combat.
#[derive(Debug, Clone, Default)]
pub(crate) struct CombatResolution {
    pub(crate) territories: Vec<Territory>,
    pub(crate) battles: Vec<BattleReport>,
}

/// Resolve every pending move as of the end of the combat phase.
///
/// Moves are grouped by destination. Moves by the destination's owner
/// reinforce the garrison before the fight; all other moves into that
/// destination form a single attacking force, credited to the nation of the
/// first such move. Every read comes from the pre-combat world, so the order
/// destinations are processed in cannot change any result.
pub(crate) fn resolve_combat(world: &World, policy: SupplyPolicy) -> CombatResolution {
    let mut by_destination: BTreeMap<&TerritoryId, Vec<&TroopMove>> = BTreeMap::new();
    for m in world.pending_moves() {
        by_destination.entry(&m.to).or_default().push(m);
    }

    let mut resolution = CombatResolution::default();

    for (destination, moves) in by_destination {
        let Some(territory) = world.territory(destination) else {
            continue;
        };

        let (friendly, hostile): (Vec<&TroopMove>, Vec<&TroopMove>) =
            moves.into_iter().partition(|m| m.nation == territory.owner);

        let reinforcements: u64 = friendly.iter().map(|m| u64::from(m.troops)).sum();
        let garrison = u64::from(territory.troops) + reinforcements;

        let mut updated = territory.clone();

        let Some(first_hostile) = hostile.first() else {
            updated.troops = clamp_troops(garrison);
            resolution.territories.push(updated);
            continue;
        };

        let attacker = first_hostile.nation.clone();
        let attacking_troops: u64 = hostile.iter().map(|m| u64::from(m.troops)).sum();
        let attack: Strength = hostile
            .iter()
            .map(|m| {
                let origin_supply = world.territory(&m.from).map_or(0, |t| t.supply);
                Strength::of(m.troops, origin_supply, policy)
            })
            .sum();
        let defence = Strength::of(clamp_troops(garrison), territory.supply, policy);

        let result = resolve_battle(attacking_troops, attack, garrison, defence);

        updated.troops = result.survivors;
        if result.outcome == BattleOutcome::AttackerWins {
            updated.owner.clone_from(&attacker);
        }

        log::info!(
            "battle at {}: attack {:.1} vs defence {:.1} -> {:?}, {} survivors",
            territory.name,
            attack.as_f64(),
            defence.as_f64(),
            result.outcome,
            result.survivors
        );

        resolution.battles.push(BattleReport {
            territory: destination.clone(),
            attacker,
            defender: territory.owner.clone(),
            attacking_troops,
            attack_strength: attack.as_f64(),
            defending_troops: garrison,
            defence_strength: defence.as_f64(),
            outcome: result.outcome,
            survivors: result.survivors,
        });
        resolution.territories.push(updated);
    }

    resolution
}

fn clamp_troops(troops: u64) -> u32 {
    u32::try_from(troops).unwrap_or(u32::MAX)
}
