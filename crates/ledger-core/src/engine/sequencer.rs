//! Period sequencing
//!
//! Periods for a member are filled strictly in order starting at 1. A new
//! period may only be created in the first gap of the member's recorded
//! periods; recorded periods can be corrected at any time.

use std::collections::BTreeSet;

use crate::error::DomainError;

/// Default administrative upper bound for period numbers
pub const DEFAULT_PERIOD_CEILING: u32 = 100;

/// Lowest period not present in `existing`
///
/// Duplicates and zero are ignored. Runs in O(n log n) for the sort.
pub fn next_eligible_period<I>(existing: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let sorted: BTreeSet<u32> = existing.into_iter().collect();
    let mut expected = 1u32;
    for period in sorted {
        if period < expected {
            continue;
        }
        if period > expected {
            break;
        }
        expected = expected.saturating_add(1);
    }
    expected
}

/// Outcome of validating a create against the recorded periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateDecision {
    /// The period is new and is the next eligible one
    Insert,
    /// The period is already recorded; the write is a correction
    Update,
}

/// Validates periods against the sequencing rule and the administrative ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSequencer {
    ceiling: u32,
}

impl PeriodSequencer {
    /// Create a sequencer with the given ceiling (clamped to at least 1)
    pub fn new(ceiling: u32) -> Self {
        Self {
            ceiling: ceiling.max(1),
        }
    }

    #[inline]
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Check `period` lies in `1..=ceiling` and narrow it to `u32`
    pub fn check_range(&self, period: i64) -> Result<u32, DomainError> {
        u32::try_from(period)
            .ok()
            .filter(|p| (1..=self.ceiling).contains(p))
            .ok_or(DomainError::PeriodOutOfRange {
                period,
                ceiling: self.ceiling,
            })
    }

    pub fn next_eligible(&self, existing: &[u32]) -> u32 {
        next_eligible_period(existing.iter().copied())
    }

    /// Decide whether `proposed` may be written for a member with `existing` periods
    pub fn validate_create(
        &self,
        existing: &[u32],
        proposed: u32,
    ) -> Result<CreateDecision, DomainError> {
        let proposed = self.check_range(i64::from(proposed))?;

        if existing.contains(&proposed) {
            return Ok(CreateDecision::Update);
        }

        let expected = self.next_eligible(existing);
        if expected > self.ceiling {
            return Err(DomainError::PeriodOutOfRange {
                period: i64::from(expected),
                ceiling: self.ceiling,
            });
        }
        if proposed != expected {
            return Err(DomainError::SequenceGap { expected });
        }

        Ok(CreateDecision::Insert)
    }

    /// Error for a create whose slot was filled by another writer first
    ///
    /// `existing` must already include the contested period.
    pub fn slot_taken(&self, existing: &[u32]) -> DomainError {
        DomainError::SequenceGap {
            expected: self.next_eligible(existing),
        }
    }
}

impl Default for PeriodSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD_CEILING)
    }
}
