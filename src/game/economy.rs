//! Economy and logistics rules: resource accrual, attrition, and
//! infrastructure budgets.
//!
//! # Production
//!
//! Each resource node a nation owns pays a flat `resource_node_yield`
//! (10 by default) into its stockpile when the production phase ends.
//!
//! # Consumption
//!
//! Every troop needs one unit of supply. What happens to unsupplied troops
//! depends on the [`SupplyPolicy`]: under `Attrition` they die when the
//! consumption phase ends; under `CombatPenalty` nothing happens here and
//! they fight at half weight instead.

use serde::Serialize;

use crate::game::{Nation, NationId, SupplyPolicy, Territory, TerritoryId, World};

/// Resources credited to a nation in one production phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceGain {
    /// Receiving nation.
    pub nation: NationId,
    /// Amount credited.
    pub gained: u32,
    /// Stockpile after crediting.
    pub total: u32,
}

/// Troops lost to attrition in one territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttritionLoss {
    /// Affected territory.
    pub territory: TerritoryId,
    /// Troops lost.
    pub lost: u32,
    /// Troops remaining.
    pub remaining: u32,
}

/// A nation's infrastructure budget for the turn. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfrastructureBudget {
    /// Nation.
    pub nation: NationId,
    /// `production × industry% × infrastructure%`.
    pub budget: f64,
}

/// Compute each nation's resource income and the resulting nation records.
pub(crate) fn accrue_resources(
    world: &World,
    resource_node_yield: u32,
) -> (Vec<Nation>, Vec<ResourceGain>) {
    let mut nations = Vec::with_capacity(world.nations().len());
    let mut gains = Vec::with_capacity(world.nations().len());

    for nation in world.nations().values() {
        let nodes = world
            .territories_owned_by(&nation.id)
            .filter(|t| t.has_resource_node)
            .count();
        let gained = u32::try_from(nodes)
            .unwrap_or(u32::MAX)
            .saturating_mul(resource_node_yield);

        let mut updated = nation.clone();
        updated.resources = updated.resources.saturating_add(gained);

        log::info!(
            "{}: +{gained} resources (total: {})",
            nation.name,
            updated.resources
        );

        gains.push(ResourceGain {
            nation: nation.id.clone(),
            gained,
            total: updated.resources,
        });
        nations.push(updated);
    }

    (nations, gains)
}

/// Apply the consumption phase under `policy`.
///
/// Returns the changed territories and the losses, both empty under
/// [`SupplyPolicy::CombatPenalty`].
pub(crate) fn apply_consumption(
    world: &World,
    policy: SupplyPolicy,
) -> (Vec<Territory>, Vec<AttritionLoss>) {
    if policy == SupplyPolicy::CombatPenalty {
        return (Vec::new(), Vec::new());
    }

    let mut territories = Vec::new();
    let mut losses = Vec::new();

    for territory in world.territories().values() {
        let lost = territory.unsupplied();
        if lost == 0 {
            continue;
        }

        let mut updated = territory.clone();
        updated.troops -= lost;

        log::info!(
            "{}: {lost} troops lost to attrition ({} remaining)",
            territory.name,
            updated.troops
        );

        losses.push(AttritionLoss {
            territory: territory.id.clone(),
            lost,
            remaining: updated.troops,
        });
        territories.push(updated);
    }

    (territories, losses)
}

/// Compute every nation's infrastructure budget without applying it.
pub(crate) fn infrastructure_budgets(world: &World) -> Vec<InfrastructureBudget> {
    world
        .nations()
        .values()
        .map(|nation| {
            let budget = nation.infrastructure_budget();
            log::info!("{} infrastructure budget: {budget}", nation.name);
            InfrastructureBudget {
                nation: nation.id.clone(),
                budget,
            }
        })
        .collect()
}
