//! Scenario validation command implementation.

use super::CliError;
use std::path::Path;
use warfront::Scenario;
use warfront::game::check_invariants;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be read or fails validation.
pub(crate) fn execute(path: &Path) -> Result<(), CliError> {
    println!("Validating: {}", path.display());
    println!();

    let scenario = Scenario::load(path);
    print_check("Readable JSON", scenario.is_ok());
    let scenario = scenario?;

    let built = scenario.build();
    print_check("Roster, territories and adjacency", built.is_ok());
    let (world, graph) = built?;

    let violations = check_invariants(&world);
    print_check("World invariants", violations.is_empty());
    if let Some(first) = violations.first() {
        return Err(CliError::new(first.to_string()));
    }

    println!();
    println!("Summary:");
    println!("  Nations:       {}", world.nations().len());
    println!("  Territories:   {}", world.territories().len());
    println!("  Connected:     {}", graph.len());
    println!("  Active nation: {}", world.active_nation());
    println!("  Supply policy: {:?}", scenario.rules.supply_policy);

    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
