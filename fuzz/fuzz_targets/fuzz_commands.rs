#![no_main]

//! Command sequence fuzzer.
//!
//! Runs arbitrary command sequences against the built-in scenario and checks
//! that every world invariant holds after each command, and that rejected
//! commands leave the world untouched. Move ledger commands must conserve the
//! total troop count.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use warfront::game::{MoveId, NationUpdate, Sector, TerritoryUpdate, check_invariants};
use warfront::{Command, Engine, NationId, Scenario, TerritoryId};

/// A fuzzer-generated command, indexing into the scenario's ids.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzCommand {
    Queue { from: u8, to: u8, troops: u16 },
    Cancel { id: u8 },
    Clear,
    Supply { territory: u8, amount: u16 },
    Infrastructure { territory: u8, value: u16 },
    SetSupply { territory: u8, value: u16 },
    Troops { territory: u8, value: u16 },
    Owner { territory: u8, nation: Option<u8> },
    Industry { nation: u8, value: u8 },
    Share { nation: u8, sector: u8, percent: u8 },
    Switch { nation: u8 },
    Advance,
    Reset,
}

fn pick<T: Clone>(items: &[T], index: u8) -> T {
    items[usize::from(index) % items.len()].clone()
}

fn to_command(cmd: FuzzCommand, territories: &[TerritoryId], nations: &[NationId]) -> Command {
    match cmd {
        FuzzCommand::Queue { from, to, troops } => Command::QueueMove {
            from: pick(territories, from),
            to: pick(territories, to),
            troops: u32::from(troops),
        },
        FuzzCommand::Cancel { id } => Command::CancelMove {
            id: MoveId::new(u64::from(id)),
        },
        FuzzCommand::Clear => Command::ClearMoves,
        FuzzCommand::Supply { territory, amount } => Command::DistributeSupply {
            territory: pick(territories, territory),
            amount: u32::from(amount),
        },
        FuzzCommand::Infrastructure { territory, value } => Command::UpdateTerritory {
            territory: pick(territories, territory),
            update: TerritoryUpdate::Infrastructure(u32::from(value)),
        },
        FuzzCommand::SetSupply { territory, value } => Command::UpdateTerritory {
            territory: pick(territories, territory),
            update: TerritoryUpdate::Supply(u32::from(value)),
        },
        FuzzCommand::Troops { territory, value } => Command::UpdateTerritory {
            territory: pick(territories, territory),
            update: TerritoryUpdate::Troops(u32::from(value)),
        },
        FuzzCommand::Owner { territory, nation } => Command::UpdateTerritory {
            territory: pick(territories, territory),
            update: TerritoryUpdate::Owner(nation.map(|n| pick(nations, n))),
        },
        FuzzCommand::Industry { nation, value } => Command::UpdateNation {
            nation: pick(nations, nation),
            update: NationUpdate::WorkforceIndustry(value),
        },
        FuzzCommand::Share {
            nation,
            sector,
            percent,
        } => Command::UpdateNation {
            nation: pick(nations, nation),
            update: NationUpdate::AllocationShare {
                sector: pick(&[Sector::Supply, Sector::Infrastructure, Sector::Research], sector),
                percent,
            },
        },
        FuzzCommand::Switch { nation } => Command::SwitchActiveNation {
            nation: pick(nations, nation),
        },
        FuzzCommand::Advance => Command::AdvancePhase,
        FuzzCommand::Reset => Command::Reset,
    }
}

fuzz_target!(|commands: Vec<FuzzCommand>| {
    let Ok(scenario) = Scenario::builtin() else {
        return;
    };
    let Ok(mut engine) = Engine::new(&scenario) else {
        return;
    };
    let territories: Vec<_> = engine.world().territories().keys().cloned().collect();
    let nations: Vec<_> = engine.world().nations().keys().cloned().collect();

    for cmd in commands.into_iter().take(200) {
        let command = to_command(cmd, &territories, &nations);
        let before = engine.world().clone();

        if engine.execute(command.clone()).is_err() {
            assert_eq!(engine.world(), &before, "rejected {command:?} changed the world");
        }

        if matches!(
            command,
            Command::QueueMove { .. } | Command::CancelMove { .. } | Command::ClearMoves
        ) {
            assert_eq!(
                engine.world().total_troops(),
                before.total_troops(),
                "{command:?} changed the troop total"
            );
        }

        let violations = check_invariants(engine.world());
        assert!(
            violations.is_empty(),
            "Invariants violated after {command:?}: {violations:?}"
        );
    }
});
