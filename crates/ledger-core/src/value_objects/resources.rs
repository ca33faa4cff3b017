//! Resource quantities contributed to the alliance treasury

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the four treasury resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Food,
    Wood,
    Stone,
    Gold,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [Self::Food, Self::Wood, Self::Stone, Self::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Gold => "gold",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four non-negative resource counters
///
/// Counters are whole units. Each counter is capped at [`Resources::MAX_COUNTER`]
/// so it always fits a signed 64-bit database column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub food: u64,
    #[serde(default)]
    pub wood: u64,
    #[serde(default)]
    pub stone: u64,
    #[serde(default)]
    pub gold: u64,
}

impl Resources {
    pub const MAX_COUNTER: u64 = i64::MAX as u64;

    pub const fn new(food: u64, wood: u64, stone: u64, gold: u64) -> Self {
        Self {
            food,
            wood,
            stone,
            gold,
        }
    }

    /// Build from signed inputs, rejecting negative counters
    pub fn try_from_signed(
        food: i64,
        wood: i64,
        stone: i64,
        gold: i64,
    ) -> Result<Self, DomainError> {
        let field = |kind: ResourceKind, value: i64| {
            u64::try_from(value).map_err(|_| {
                DomainError::InvalidResources(format!("{kind} must not be negative, got {value}"))
            })
        };

        Ok(Self {
            food: field(ResourceKind::Food, food)?,
            wood: field(ResourceKind::Wood, wood)?,
            stone: field(ResourceKind::Stone, stone)?,
            gold: field(ResourceKind::Gold, gold)?,
        })
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Gold => self.gold,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::Food => &mut self.food,
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Gold => &mut self.gold,
        }
    }

    /// Add `amount` into one counter
    pub fn deposit(&mut self, kind: ResourceKind, amount: u64) -> Result<(), DomainError> {
        let slot = self.slot_mut(kind);
        let updated = slot
            .checked_add(amount)
            .filter(|v| *v <= Self::MAX_COUNTER)
            .ok_or(DomainError::ResourceOverflow)?;
        *slot = updated;
        Ok(())
    }

    /// True when every counter is zero
    pub fn is_empty(&self) -> bool {
        ResourceKind::ALL.iter().all(|kind| self.get(*kind) == 0)
    }

    /// Sum of all four counters
    ///
    /// Four capped counters can exceed `u64`, so the sum is widened.
    pub fn total(&self) -> u128 {
        ResourceKind::ALL
            .iter()
            .map(|kind| u128::from(self.get(*kind)))
            .sum()
    }

    /// Check that these resources may be persisted as a contribution
    pub fn validate_contribution(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::InvalidResources(
                "at least one of food, wood, stone or gold must be positive".to_string(),
            ));
        }
        if let Some(kind) = ResourceKind::ALL
            .iter()
            .find(|kind| self.get(**kind) > Self::MAX_COUNTER)
        {
            return Err(DomainError::InvalidResources(format!(
                "{kind} exceeds the maximum of {}",
                Self::MAX_COUNTER
            )));
        }
        Ok(())
    }
}

/// Running per-kind sums over many [`Resources`]
///
/// Each counter of a single record fits `i64`, but a sum over records does
/// not fit `u64` in general. Counters here are `u128`, which holds more than
/// `2^64` capped records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceTotals {
    pub food: u128,
    pub wood: u128,
    pub stone: u128,
    pub gold: u128,
}

impl ResourceTotals {
    pub fn get(&self, kind: ResourceKind) -> u128 {
        match kind {
            ResourceKind::Food => self.food,
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Gold => self.gold,
        }
    }

    /// Sum of all four counters
    pub fn total(&self) -> u128 {
        ResourceKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

impl AddAssign<Resources> for ResourceTotals {
    fn add_assign(&mut self, rhs: Resources) {
        self.food += u128::from(rhs.food);
        self.wood += u128::from(rhs.wood);
        self.stone += u128::from(rhs.stone);
        self.gold += u128::from(rhs.gold);
    }
}
