#![no_main]

//! Battle resolution fuzzer.
//!
//! Drives `resolve_battle` with arbitrary troop and supply counts and checks
//! the outcome against the strength comparison.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use warfront::SupplyPolicy;
use warfront::game::{BattleOutcome, Strength, resolve_battle};

/// Structured input for battle fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    attackers: u32,
    attack_supply: u32,
    defenders: u32,
    defence_supply: u32,
    attrition: bool,
}

fuzz_target!(|input: CombatInput| {
    let policy = if input.attrition {
        SupplyPolicy::Attrition
    } else {
        SupplyPolicy::CombatPenalty
    };

    let attack = Strength::of(input.attackers, input.attack_supply, policy);
    let defence = Strength::of(input.defenders, input.defence_supply, policy);

    // Undersupply never makes a force stronger than its raw size.
    assert!(attack.half_units() <= u64::from(input.attackers) * 2);
    assert!(defence.half_units() <= u64::from(input.defenders) * 2);

    let result = resolve_battle(
        u64::from(input.attackers),
        attack,
        u64::from(input.defenders),
        defence,
    );

    match result.outcome {
        BattleOutcome::AttackerWins => {
            assert!(attack > defence);
            assert!(result.survivors >= 1);
            assert!(result.survivors <= input.attackers);
        }
        BattleOutcome::DefenderHolds => {
            assert!(defence > attack);
            assert!(result.survivors <= input.defenders);
        }
        BattleOutcome::Stalemate => {
            assert_eq!(attack, defence);
            assert_eq!(result.survivors, 0);
        }
    }
});
