//! Nation state: stockpiles and allocation settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, CommandResult};

/// Unique identifier for a nation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationId(String);

impl NationId {
    /// Create a nation identifier.
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

impl fmt::Display for NationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Share of the workforce assigned to industry versus the military.
///
/// Always sums to 100; `military` is derived from `industry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceSplit {
    /// Percent of the workforce in industry.
    pub industry: u8,
    /// Percent of the workforce in the military.
    pub military: u8,
}

impl WorkforceSplit {
    /// Build a split from the industry share.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidPercentage`] if `industry > 100`.
    pub fn from_industry(industry: u8) -> CommandResult<Self> {
        if industry > 100 {
            return Err(CommandError::InvalidPercentage(industry));
        }
        Ok(Self {
            industry,
            military: 100 - industry,
        })
    }

    /// Sum of both shares.
    #[must_use]
    pub fn total(self) -> u32 {
        u32::from(self.industry) + u32::from(self.military)
    }
}

/// One of the three production sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// Supply for troops in the field.
    Supply,
    /// Roads, rail and depots.
    Infrastructure,
    /// Research.
    Research,
}

/// How a nation divides its production between sectors. Sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionAllocation {
    /// Percent to supply.
    pub supply: u8,
    /// Percent to infrastructure.
    pub infrastructure: u8,
    /// Percent to research.
    pub research: u8,
}

impl ProductionAllocation {
    /// Build an allocation from explicit shares.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidAllocation`] unless the shares sum to 100.
    pub fn new(supply: u8, infrastructure: u8, research: u8) -> CommandResult<Self> {
        let allocation = Self {
            supply,
            infrastructure,
            research,
        };
        match allocation.total() {
            100 => Ok(allocation),
            total => Err(CommandError::InvalidAllocation(total)),
        }
    }

    /// Sum of all three shares.
    #[must_use]
    pub fn total(self) -> u32 {
        u32::from(self.supply) + u32::from(self.infrastructure) + u32::from(self.research)
    }

    /// Share assigned to `sector`.
    #[must_use]
    pub const fn share(self, sector: Sector) -> u8 {
        match sector {
            Sector::Supply => self.supply,
            Sector::Infrastructure => self.infrastructure,
            Sector::Research => self.research,
        }
    }

    fn share_mut(&mut self, sector: Sector) -> &mut u8 {
        match sector {
            Sector::Supply => &mut self.supply,
            Sector::Infrastructure => &mut self.infrastructure,
            Sector::Research => &mut self.research,
        }
    }

    /// Set one sector's share and rebalance the other two so the total stays 100.
    ///
    /// The remainder is split between the other sectors in proportion to their
    /// current shares, or evenly if both are zero. Integer rounding favors the
    /// first of the two in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidPercentage`] if `percent > 100`.
    pub fn with_share(self, sector: Sector, percent: u8) -> CommandResult<Self> {
        if percent > 100 {
            return Err(CommandError::InvalidPercentage(percent));
        }

        let others: [Sector; 2] = match sector {
            Sector::Supply => [Sector::Infrastructure, Sector::Research],
            Sector::Infrastructure => [Sector::Supply, Sector::Research],
            Sector::Research => [Sector::Supply, Sector::Infrastructure],
        };

        let remainder = 100 - u32::from(percent);
        let weight_a = u32::from(self.share(others[0]));
        let weight_b = u32::from(self.share(others[1]));
        let weight_total = weight_a + weight_b;

        let second = if weight_total == 0 {
            remainder / 2
        } else {
            remainder * weight_b / weight_total
        };
        let first = remainder - second;

        let mut result = self;
        *result.share_mut(sector) = percent;
        // Both values are bounded by `remainder <= 100`.
        *result.share_mut(others[0]) = u8::try_from(first).unwrap_or(100);
        *result.share_mut(others[1]) = u8::try_from(second).unwrap_or(100);
        Ok(result)
    }
}

/// State for a single nation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
    /// Unique identifier.
    pub id: NationId,
    /// Display name.
    pub name: String,
    /// Map color tag, e.g. `#3b82f6`.
    pub color: String,
    /// Industrial output per turn.
    pub production: u32,
    /// Stockpile of raw materials.
    pub resources: u32,
    /// Available workers and soldiers.
    pub manpower: u32,
    /// Industry/military workforce split.
    pub workforce: WorkforceSplit,
    /// Production allocation between sectors.
    pub allocation: ProductionAllocation,
}

impl Nation {
    /// Infrastructure budget implied by current output and settings.
    ///
    /// `production × industry% × infrastructure%`. Informational only.
    #[must_use]
    pub fn infrastructure_budget(&self) -> f64 {
        f64::from(self.production)
            * (f64::from(self.workforce.industry) / 100.0)
            * (f64::from(self.allocation.infrastructure) / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_nation() -> Nation {
        Nation {
            id: NationId::new("usa"),
            name: "United States".to_string(),
            color: "#3b82f6".to_string(),
            production: 100,
            resources: 100,
            manpower: 100,
            workforce: WorkforceSplit {
                industry: 70,
                military: 30,
            },
            allocation: ProductionAllocation {
                supply: 50,
                infrastructure: 30,
                research: 20,
            },
        }
    }

    #[test]
    fn test_workforce_from_industry() {
        let split = WorkforceSplit::from_industry(65).unwrap();
        assert_eq!(split.military, 35);
        assert_eq!(split.total(), 100);
        assert_eq!(
            WorkforceSplit::from_industry(101),
            Err(CommandError::InvalidPercentage(101))
        );
    }

    #[test]
    fn test_allocation_must_sum_to_100() {
        assert!(ProductionAllocation::new(50, 30, 20).is_ok());
        assert_eq!(
            ProductionAllocation::new(50, 30, 30),
            Err(CommandError::InvalidAllocation(110))
        );
    }

    #[test]
    fn test_with_share_rebalances_proportionally() {
        let alloc = ProductionAllocation::new(50, 30, 20).unwrap();
        let updated = alloc.with_share(Sector::Supply, 80).unwrap();
        // 20 remaining split 30:20 between infrastructure and research.
        assert_eq!(updated.supply, 80);
        assert_eq!(updated.infrastructure, 12);
        assert_eq!(updated.research, 8);
        assert_eq!(updated.total(), 100);
    }

    #[test]
    fn test_with_share_even_split_when_others_zero() {
        let alloc = ProductionAllocation::new(100, 0, 0).unwrap();
        let updated = alloc.with_share(Sector::Supply, 41).unwrap();
        assert_eq!(updated.infrastructure, 30);
        assert_eq!(updated.research, 29);
        assert_eq!(updated.total(), 100);
    }

    #[test]
    fn test_with_share_rejects_over_100() {
        let alloc = ProductionAllocation::new(50, 30, 20).unwrap();
        assert!(alloc.with_share(Sector::Research, 120).is_err());
    }

    #[test]
    fn test_infrastructure_budget() {
        let nation = test_nation();
        // 100 * 0.7 * 0.3 = 21
        assert!((nation.infrastructure_budget() - 21.0).abs() < 1e-9);
    }
}
