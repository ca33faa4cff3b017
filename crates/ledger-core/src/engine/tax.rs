//! Tax reduction
//!
//! Converts gross resource amounts into net amounts under one flat tax rate
//! shared by a whole batch. Amounts are whole resource units; the rate is an
//! exact decimal percentage. Tax for each entry is
//! `round_half_up(gross * rate / 100)` and the net is whatever remains, so
//! `net + tax == gross` always holds.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::DomainError;

/// Maximum number of decimal places accepted in a rate
const MAX_RATE_SCALE: u32 = 4;

/// Flat tax rate as a percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub fn new(percent: Decimal) -> Result<Self, DomainError> {
        if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::InvalidTaxRate(format!(
                "rate must be between 0 and 100, got {percent}"
            )));
        }
        let percent = percent.normalize();
        if percent.scale() > MAX_RATE_SCALE {
            return Err(DomainError::InvalidTaxRate(format!(
                "rate supports at most {MAX_RATE_SCALE} decimal places, got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    #[inline]
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// Split a gross amount into tax and net
    pub fn split(&self, gross: u64) -> TaxEntry {
        let tax = (Decimal::from(gross) * self.0 / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .map_or(gross, |tax| tax.min(gross));

        TaxEntry {
            gross,
            tax,
            net: gross - tax,
        }
    }
}

/// One gross amount after tax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxEntry {
    pub gross: u64,
    pub tax: u64,
    pub net: u64,
}

/// Batch totals for a tax session
///
/// Sums are `u128`: a batch of entries near `i64::MAX` does not fit `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxTotals {
    pub total_gross: u128,
    pub total_tax: u128,
    pub total_net: u128,
    /// `total_tax / total_gross * 100`, two decimal places, zero for an empty batch
    pub average_tax_percent: Decimal,
}

/// An ordered batch of entries taxed at a single rate
#[derive(Debug, Clone, Default)]
pub struct TaxSession {
    rate: Option<TaxRate>,
    entries: Vec<TaxEntry>,
}

impl TaxSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with its rate already set
    pub fn with_rate(percent: Decimal) -> Result<Self, DomainError> {
        let mut session = Self::new();
        session.set_rate(percent)?;
        Ok(session)
    }

    /// Set the rate for the session
    ///
    /// The rate is fixed once entries exist; setting the same rate again is a no-op.
    pub fn set_rate(&mut self, percent: Decimal) -> Result<(), DomainError> {
        let rate = TaxRate::new(percent)?;
        if !self.entries.is_empty() && self.rate != Some(rate) {
            return Err(DomainError::TaxRateLocked);
        }
        self.rate = Some(rate);
        Ok(())
    }

    pub fn rate(&self) -> Option<TaxRate> {
        self.rate
    }

    /// Tax a gross amount and append it to the batch
    pub fn add_entry(&mut self, gross: i64) -> Result<TaxEntry, DomainError> {
        let rate = self.rate.ok_or(DomainError::TaxRateNotSet)?;
        let gross_units = u64::try_from(gross)
            .ok()
            .filter(|g| *g > 0)
            .ok_or(DomainError::InvalidGrossAmount(gross))?;

        let entry = rate.split(gross_units);
        self.entries.push(entry);
        Ok(entry)
    }

    /// Remove the entry at `index`; later entries shift down by one
    pub fn remove_entry(&mut self, index: usize) -> Result<TaxEntry, DomainError> {
        if index >= self.entries.len() {
            return Err(DomainError::TaxEntryNotFound(index));
        }
        Ok(self.entries.remove(index))
    }

    /// Take the entry at `index` out of the batch and hand back its net amount
    ///
    /// The caller adds the returned amount into a contribution's resource
    /// counter; nothing is written to the ledger here.
    pub fn deposit(&mut self, index: usize) -> Result<u64, DomainError> {
        self.remove_entry(index).map(|entry| entry.net)
    }

    pub fn entries(&self) -> &[TaxEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn totals(&self) -> TaxTotals {
        let (total_gross, total_tax, total_net) =
            self.entries
                .iter()
                .fold((0u128, 0u128, 0u128), |(gross, tax, net), entry| {
                    (
                        gross + u128::from(entry.gross),
                        tax + u128::from(entry.tax),
                        net + u128::from(entry.net),
                    )
                });

        TaxTotals {
            total_gross,
            total_tax,
            total_net,
            average_tax_percent: average_percent(total_tax, total_gross),
        }
    }
}

/// Bits kept from each sum so that `tax * 100` fits a `Decimal` mantissa
const AVERAGE_BITS: u32 = 89;

/// `tax / gross * 100` rounded to two places, zero when `gross` is zero
///
/// Sums wider than [`AVERAGE_BITS`] are shifted down together first, which
/// only drops digits far below the second decimal place.
fn average_percent(tax: u128, gross: u128) -> Decimal {
    if gross == 0 {
        return Decimal::ZERO;
    }
    let shift = (u128::BITS - gross.leading_zeros()).saturating_sub(AVERAGE_BITS);
    let tax = Decimal::from(tax >> shift);
    let gross = Decimal::from(gross >> shift);
    (tax * Decimal::ONE_HUNDRED / gross)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_rate_bounds() {
        assert!(TaxRate::new(pct("0")).is_ok());
        assert!(TaxRate::new(pct("100")).is_ok());
        assert!(TaxRate::new(pct("12.5")).is_ok());
        assert!(matches!(TaxRate::new(pct("-1")), Err(DomainError::InvalidTaxRate(_))));
        assert!(matches!(TaxRate::new(pct("100.01")), Err(DomainError::InvalidTaxRate(_))));
        assert!(TaxRate::new(pct("10.12345")).is_err());
    }

    #[test]
    fn test_split_rounds_half_up() {
        let rate = TaxRate::new(pct("10")).unwrap();
        // 10% of 25 is 2.5 -> 3
        assert_eq!(rate.split(25), TaxEntry { gross: 25, tax: 3, net: 22 });
        // 10% of 24 is 2.4 -> 2
        assert_eq!(rate.split(24), TaxEntry { gross: 24, tax: 2, net: 22 });
    }

    #[test]
    fn test_net_plus_tax_is_gross() {
        for rate in ["0", "3.3333", "12.5", "33", "99.99", "100"] {
            let rate = TaxRate::new(pct(rate)).unwrap();
            for gross in [1u64, 7, 99, 1_000, 123_457, 9_999_999_999] {
                let entry = rate.split(gross);
                assert_eq!(entry.net + entry.tax, gross);
                let expected_tax = (Decimal::from(gross) * rate.percent() / Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                assert_eq!(Decimal::from(entry.tax), expected_tax);
            }
        }
    }

    #[test]
    fn test_split_large_amount_does_not_overflow() {
        let rate = TaxRate::new(pct("100")).unwrap();
        let entry = rate.split(u64::MAX);
        assert_eq!(entry.tax, u64::MAX);
        assert_eq!(entry.net, 0);
    }

    #[test]
    fn test_session_requires_rate() {
        let mut session = TaxSession::new();
        assert!(matches!(session.add_entry(100), Err(DomainError::TaxRateNotSet)));
    }

    #[test]
    fn test_session_rejects_non_positive_gross() {
        let mut session = TaxSession::with_rate(pct("5")).unwrap();
        assert!(matches!(session.add_entry(0), Err(DomainError::InvalidGrossAmount(0))));
        assert!(matches!(session.add_entry(-10), Err(DomainError::InvalidGrossAmount(-10))));
        assert!(session.is_empty());
    }

    #[test]
    fn test_batch_totals_match_entries() {
        let mut session = TaxSession::with_rate(pct("12.5")).unwrap();
        for gross in [1_000, 333, 47] {
            session.add_entry(gross).unwrap();
        }

        let totals = session.totals();
        let entries = session.entries();
        assert_eq!(totals.total_gross, entries.iter().map(|e| u128::from(e.gross)).sum::<u128>());
        assert_eq!(totals.total_tax, entries.iter().map(|e| u128::from(e.tax)).sum::<u128>());
        assert_eq!(totals.total_net, entries.iter().map(|e| u128::from(e.net)).sum::<u128>());
        assert_eq!(totals.total_net + totals.total_tax, totals.total_gross);
        assert_eq!(totals.total_gross, 1_380);
    }

    #[test]
    fn test_average_matches_rate_up_to_rounding() {
        let mut session = TaxSession::with_rate(pct("20")).unwrap();
        session.add_entry(500).unwrap();
        session.add_entry(1_500).unwrap();
        assert_eq!(session.totals().average_tax_percent, pct("20"));
    }

    #[test]
    fn test_totals_of_huge_entries_are_exact() {
        let mut session = TaxSession::with_rate(pct("10")).unwrap();
        for _ in 0..3 {
            session.add_entry(i64::MAX).unwrap();
        }

        let totals = session.totals();
        assert_eq!(totals.total_gross, 27_670_116_110_564_327_421);
        assert_eq!(totals.total_net + totals.total_tax, totals.total_gross);
        assert_eq!(totals.total_tax, 3 * u128::from(session.entries()[0].tax));
        assert_eq!(totals.average_tax_percent, pct("10"));
    }

    #[test]
    fn test_average_of_very_wide_sums() {
        assert_eq!(average_percent(u128::MAX / 4, u128::MAX), pct("25"));
        assert_eq!(average_percent(0, u128::MAX), Decimal::ZERO);
    }

    #[test]
    fn test_empty_totals() {
        let totals = TaxSession::with_rate(pct("20")).unwrap().totals();
        assert_eq!(totals.total_gross, 0);
        assert_eq!(totals.average_tax_percent, Decimal::ZERO);
    }

    #[test]
    fn test_remove_and_deposit() {
        let mut session = TaxSession::with_rate(pct("10")).unwrap();
        session.add_entry(100).unwrap();
        session.add_entry(200).unwrap();
        session.add_entry(300).unwrap();

        let removed = session.remove_entry(0).unwrap();
        assert_eq!(removed.gross, 100);
        assert_eq!(session.len(), 2);

        // 200 is now at index 0
        assert_eq!(session.deposit(0).unwrap(), 180);
        assert_eq!(session.len(), 1);
        assert_eq!(session.entries()[0].gross, 300);

        assert!(matches!(session.deposit(5), Err(DomainError::TaxEntryNotFound(5))));
    }

    #[test]
    fn test_rate_locked_once_entries_exist() {
        let mut session = TaxSession::with_rate(pct("10")).unwrap();
        session.add_entry(100).unwrap();

        assert!(matches!(session.set_rate(pct("15")), Err(DomainError::TaxRateLocked)));
        assert!(session.set_rate(pct("10.0")).is_ok());

        session.remove_entry(0).unwrap();
        assert!(session.set_rate(pct("15")).is_ok());
    }
}
