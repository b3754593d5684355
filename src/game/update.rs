//! Typed field updates for territories and nations.
//!
//! Each variant sets one field, and is validated before anything is written,
//! so an update either applies completely or not at all.

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult};
use crate::game::{
    NationId, ProductionAllocation, Sector, TerritoryId, World, WorkforceSplit,
};

/// A single-field edit to a territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TerritoryUpdate {
    /// Rename.
    Name(String),
    /// Change owner (None = neutral).
    Owner(Option<NationId>),
    /// Set infrastructure. Supply above the new ceiling is lowered to it.
    Infrastructure(u32),
    /// Set the garrison.
    Troops(u32),
    /// Set supply directly. Must not exceed infrastructure.
    Supply(u32),
    /// Add or remove the resource node.
    ResourceNode(bool),
}

/// A single-field edit to a nation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum NationUpdate {
    /// Rename.
    Name(String),
    /// Change the map color tag.
    Color(String),
    /// Set production.
    Production(u32),
    /// Set the resource stockpile.
    Resources(u32),
    /// Set manpower.
    Manpower(u32),
    /// Set the industry share; military takes the rest.
    WorkforceIndustry(u8),
    /// Replace the whole production allocation. Must sum to 100.
    Allocation(ProductionAllocation),
    /// Set one sector's share, rebalancing the other two.
    AllocationShare {
        /// Sector to set.
        sector: Sector,
        /// New share in percent.
        percent: u8,
    },
}

pub(crate) fn update_territory(
    world: &mut World,
    id: &TerritoryId,
    update: TerritoryUpdate,
) -> CommandResult<()> {
    if let TerritoryUpdate::Owner(Some(owner)) = &update
        && world.nation(owner).is_none()
    {
        return Err(CommandError::UnknownNation(owner.clone()));
    }

    let territory = world
        .territory_mut(id)
        .ok_or_else(|| CommandError::UnknownTerritory(id.clone()))?;

    match update {
        TerritoryUpdate::Name(name) => territory.name = name,
        TerritoryUpdate::Owner(owner) => territory.owner = owner,
        TerritoryUpdate::Infrastructure(infrastructure) => {
            territory.infrastructure = infrastructure;
            if territory.supply > infrastructure {
                log::debug!(
                    "{}: supply {} lowered to new infrastructure {infrastructure}",
                    territory.name,
                    territory.supply
                );
                territory.supply = infrastructure;
            }
        }
        TerritoryUpdate::Troops(troops) => territory.troops = troops,
        TerritoryUpdate::Supply(supply) => {
            if supply > territory.infrastructure {
                return Err(CommandError::SupplyExceedsInfrastructure {
                    supply,
                    infrastructure: territory.infrastructure,
                });
            }
            territory.supply = supply;
        }
        TerritoryUpdate::ResourceNode(flag) => territory.has_resource_node = flag,
    }
    Ok(())
}

pub(crate) fn update_nation(
    world: &mut World,
    id: &NationId,
    update: NationUpdate,
) -> CommandResult<()> {
    let nation = world
        .nations
        .get_mut(id)
        .ok_or_else(|| CommandError::UnknownNation(id.clone()))?;

    match update {
        NationUpdate::Name(name) => nation.name = name,
        NationUpdate::Color(color) => nation.color = color,
        NationUpdate::Production(value) => nation.production = value,
        NationUpdate::Resources(value) => nation.resources = value,
        NationUpdate::Manpower(value) => nation.manpower = value,
        NationUpdate::WorkforceIndustry(industry) => {
            nation.workforce = WorkforceSplit::from_industry(industry)?;
        }
        NationUpdate::Allocation(allocation) => {
            nation.allocation = ProductionAllocation::new(
                allocation.supply,
                allocation.infrastructure,
                allocation.research,
            )?;
        }
        NationUpdate::AllocationShare { sector, percent } => {
            nation.allocation = nation.allocation.with_share(sector, percent)?;
        }
    }
    Ok(())
}

/// Set a territory's supply, capped at its infrastructure.
///
/// Returns the supply actually applied.
pub(crate) fn distribute_supply(
    world: &mut World,
    id: &TerritoryId,
    amount: u32,
) -> CommandResult<u32> {
    let territory = world
        .territory_mut(id)
        .ok_or_else(|| CommandError::UnknownTerritory(id.clone()))?;
    territory.supply = amount.min(territory.infrastructure);
    Ok(territory.supply)
}
