//! Territory state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::NationId;

/// Unique identifier for a territory, e.g. `"USA"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryId(String);

impl TerritoryId {
    /// Create a territory identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A controllable region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Unique identifier.
    pub id: TerritoryId,
    /// Display name.
    pub name: String,
    /// Controlling nation (None = neutral).
    pub owner: Option<NationId>,
    /// Supply throughput ceiling per turn.
    pub infrastructure: u32,
    /// Garrison strength.
    pub troops: u32,
    /// Supply delivered this turn. Never above `infrastructure`.
    #[serde(default)]
    pub supply: u32,
    /// Grants flat resource income to the owner each production phase.
    #[serde(default)]
    pub has_resource_node: bool,
}

impl Territory {
    /// Create an unowned territory with no troops or supply.
    #[must_use]
    pub fn new(id: TerritoryId, name: impl Into<String>, infrastructure: u32) -> Self {
        Self {
            id,
            name: name.into(),
            owner: None,
            infrastructure,
            troops: 0,
            supply: 0,
            has_resource_node: false,
        }
    }

    /// Check whether `nation` controls this territory.
    #[must_use]
    pub fn is_owned_by(&self, nation: &NationId) -> bool {
        self.owner.as_ref() == Some(nation)
    }

    /// Troops beyond what current supply can sustain.
    #[must_use]
    pub const fn unsupplied(&self) -> u32 {
        self.troops.saturating_sub(self.supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_territory_is_neutral() {
        let territory = Territory::new(TerritoryId::new("CHN"), "China", 15);
        assert_eq!(territory.owner, None);
        assert_eq!(territory.troops, 0);
        assert_eq!(territory.supply, 0);
        assert!(!territory.has_resource_node);
    }

    #[test]
    fn test_unsupplied() {
        let mut territory = Territory::new(TerritoryId::new("FRA"), "France", 30);
        territory.troops = 15;
        territory.supply = 10;
        assert_eq!(territory.unsupplied(), 5);

        territory.supply = 20;
        assert_eq!(territory.unsupplied(), 0);
    }

    #[test]
    fn test_is_owned_by() {
        let mut territory = Territory::new(TerritoryId::new("GBR"), "Great Britain", 30);
        let uk = NationId::new("uk");
        assert!(!territory.is_owned_by(&uk));
        territory.owner = Some(uk.clone());
        assert!(territory.is_owned_by(&uk));
    }
}
