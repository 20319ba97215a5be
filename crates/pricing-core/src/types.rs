//! # Domain Types
//!
//! Core types for order pricing.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Domain Types                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Percent      │   │   DiscountTable     │   │    TaxTable     │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  f64            │   │  Vec<Bracket>       │   │  region → %     │   │
//! │  │  5.0 = 5%       │   │  sorted ascending   │   │  BTreeMap       │   │
//! │  └─────────────────┘   └─────────────────────┘   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bracket Intervals
//! Brackets are half-open: `[threshold_k, threshold_k+1)`. The discount of a
//! bracket is the percentage stored at its *lower* threshold.
//! ```text
//!   0%        3%         5%        7%        10%
//! ──────┼──────────┼─────────┼─────────┼──────────────►  gross amount
//!     1000       5000      7000     10000
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TableError;

// =============================================================================
// Percent
// =============================================================================

/// A percentage value: `3.0` means 3%, `14.975` means 14.975%.
///
/// ## Why Not Basis Points?
/// Regional tax rates such as 14.975% are not whole basis points, so the
/// value is kept as the percentage the tables are written in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    /// Creates a percentage from its value in percent.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0.0)
    }

    /// Returns the value in percent.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction (`5%` → `0.05`).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    fn check_range(&self, field: &str) -> Result<(), TableError> {
        if !self.0.is_finite() {
            return Err(TableError::NonFinite {
                field: field.to_string(),
                value: self.0,
            });
        }
        if !(0.0..=100.0).contains(&self.0) {
            return Err(TableError::PercentOutOfRange {
                field: field.to_string(),
                value: self.0,
            });
        }
        Ok(())
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

impl From<f64> for Percent {
    fn from(value: f64) -> Self {
        Percent(value)
    }
}

// =============================================================================
// Bracket
// =============================================================================

/// A volume discount bracket: amounts at or above `threshold` (and below the
/// next bracket's threshold) receive `discount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Lower bound of the bracket, inclusive.
    pub threshold: f64,

    /// Discount applied within the bracket.
    pub discount: Percent,
}

impl Bracket {
    pub fn new(threshold: f64, discount: impl Into<Percent>) -> Self {
        Bracket {
            threshold,
            discount: discount.into(),
        }
    }
}

// =============================================================================
// Discount Table
// =============================================================================

/// Volume discount brackets, sorted ascending by threshold.
///
/// The input order never matters: brackets are sorted once at construction
/// with a stable sort. Equal thresholds keep their insertion order, and the
/// last one inserted is the one [`DiscountTable::select`] returns.
///
/// An empty table means no discount ever applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Bracket>", into = "Vec<Bracket>")]
pub struct DiscountTable {
    brackets: Vec<Bracket>,
}

impl DiscountTable {
    /// Creates an empty table (no discounts).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table from `(threshold, percent)` pairs in any order.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::DiscountTable;
    ///
    /// let table = DiscountTable::from_brackets([(5000.0, 5.0), (1000.0, 3.0)]);
    /// assert_eq!(table.brackets()[0].threshold, 1000.0);
    /// ```
    pub fn from_brackets<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        pairs
            .into_iter()
            .map(|(threshold, percent)| Bracket::new(threshold, percent))
            .collect::<Vec<_>>()
            .into()
    }

    /// Returns the brackets in ascending threshold order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Selects the discount for a gross amount.
    ///
    /// ## Selection Rules
    /// ```text
    /// brackets empty            → 0%
    /// amount <  lowest          → 0%
    /// amount >= highest         → highest bracket's discount
    /// t(i-1) <= amount < t(i)   → discount at t(i-1)
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::DiscountTable;
    ///
    /// let table = DiscountTable::from_brackets([(1000.0, 3.0), (5000.0, 5.0)]);
    /// assert_eq!(table.select(999.99).value(), 0.0);
    /// assert_eq!(table.select(1000.0).value(), 3.0);
    /// assert_eq!(table.select(4999.0).value(), 3.0);
    /// assert_eq!(table.select(5000.0).value(), 5.0);
    /// ```
    pub fn select(&self, amount: f64) -> Percent {
        let (lowest, highest) = match (self.brackets.first(), self.brackets.last()) {
            (Some(lowest), Some(highest)) => (lowest, highest),
            _ => return Percent::zero(),
        };

        if amount < lowest.threshold {
            return Percent::zero();
        }
        if amount >= highest.threshold {
            return highest.discount;
        }

        // Index of the first bracket whose threshold is above the amount.
        let upper = self.brackets.partition_point(|b| b.threshold <= amount);
        upper
            .checked_sub(1)
            .map_or(Percent::zero(), |i| self.brackets[i].discount)
    }

    /// Checks thresholds are finite and non-negative and discounts are
    /// within `[0, 100]`.
    pub fn validate(&self) -> Result<(), TableError> {
        for bracket in &self.brackets {
            if !bracket.threshold.is_finite() {
                return Err(TableError::NonFinite {
                    field: "discount threshold".to_string(),
                    value: bracket.threshold,
                });
            }
            if bracket.threshold < 0.0 {
                return Err(TableError::NegativeThreshold {
                    threshold: bracket.threshold,
                });
            }
            bracket.discount.check_range("discount")?;
        }
        Ok(())
    }
}

impl From<Vec<Bracket>> for DiscountTable {
    fn from(mut brackets: Vec<Bracket>) -> Self {
        // sort_by is stable: equal thresholds keep insertion order
        brackets.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        DiscountTable { brackets }
    }
}

impl From<DiscountTable> for Vec<Bracket> {
    fn from(table: DiscountTable) -> Self {
        table.brackets
    }
}

impl FromIterator<(f64, f64)> for DiscountTable {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        DiscountTable::from_brackets(iter)
    }
}

// =============================================================================
// Tax Table
// =============================================================================

/// Tax percentage per region code.
///
/// Backed by a `BTreeMap` so the valid codes reported in errors come out
/// in a stable, sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxTable {
    rates: BTreeMap<String, Percent>,
}

impl TaxTable {
    /// Creates a table from `(region, percent)` pairs.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::TaxTable;
    ///
    /// let taxes = TaxTable::from_rates([("ON", 13.0), ("QC", 14.975)]);
    /// assert_eq!(taxes.rate("QC").map(|r| r.value()), Some(14.975));
    /// assert!(taxes.rate("HELLO").is_none());
    /// ```
    pub fn from_rates<I, K>(rates: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        TaxTable {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.into(), Percent::new(rate)))
                .collect(),
        }
    }

    /// Returns the tax rate for a region, if known.
    pub fn rate(&self, region_code: &str) -> Option<Percent> {
        self.rates.get(region_code).copied()
    }

    pub fn contains(&self, region_code: &str) -> bool {
        self.rates.contains_key(region_code)
    }

    /// Returns every known region code, ascending.
    pub fn region_codes(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Checks every rate is finite and within `[0, 100]`.
    pub fn validate(&self) -> Result<(), TableError> {
        for (code, rate) in &self.rates {
            rate.check_range(&format!("tax rate for {}", code))?;
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for TaxTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        TaxTable::from_rates(iter)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_brackets() -> DiscountTable {
        DiscountTable::from_brackets([(1000.0, 3.0), (5000.0, 5.0), (7000.0, 7.0), (10000.0, 10.0)])
    }

    #[test]
    fn test_percent_fraction() {
        assert_eq!(Percent::new(5.0).fraction(), 0.05);
        assert!(Percent::zero().is_zero());
        assert_eq!(Percent::default(), Percent::zero());
    }

    #[test]
    fn test_empty_table_never_discounts() {
        let table = DiscountTable::empty();
        assert_eq!(table.select(0.01), Percent::zero());
        assert_eq!(table.select(1_000_000.0), Percent::zero());
    }

    #[test]
    fn test_below_lowest_bracket() {
        assert_eq!(standard_brackets().select(10.0), Percent::zero());
        assert_eq!(standard_brackets().select(999.999), Percent::zero());
    }

    #[test]
    fn test_at_or_above_highest_bracket() {
        let table = standard_brackets();
        assert_eq!(table.select(10000.0).value(), 10.0);
        assert_eq!(table.select(10001.0).value(), 10.0);
        assert_eq!(table.select(1e12).value(), 10.0);
    }

    #[test]
    fn test_intermediate_brackets_use_lower_threshold() {
        let table = standard_brackets();
        assert_eq!(table.select(1000.0).value(), 3.0);
        assert_eq!(table.select(1001.0).value(), 3.0);
        assert_eq!(table.select(4999.99).value(), 3.0);
        assert_eq!(table.select(5000.0).value(), 5.0);
        assert_eq!(table.select(5001.0).value(), 5.0);
        assert_eq!(table.select(7001.0).value(), 7.0);
        assert_eq!(table.select(9999.99).value(), 7.0);
    }

    #[test]
    fn test_single_bracket() {
        let table = DiscountTable::from_brackets([(10000.0, 10.0)]);
        assert_eq!(table.select(100.0), Percent::zero());
        assert_eq!(table.select(100000.0).value(), 10.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let unsorted = DiscountTable::from_brackets([
            (5000.0, 5.0),
            (10000.0, 10.0),
            (1000.0, 3.0),
            (7000.0, 7.0),
        ]);
        assert_eq!(unsorted, standard_brackets());
        let thresholds: Vec<f64> = unsorted.brackets().iter().map(|b| b.threshold).collect();
        assert_eq!(thresholds, vec![1000.0, 5000.0, 7000.0, 10000.0]);
    }

    #[test]
    fn test_equal_thresholds_last_inserted_wins() {
        let table = DiscountTable::from_brackets([(1000.0, 3.0), (1000.0, 4.0), (5000.0, 5.0)]);
        assert_eq!(table.select(1500.0).value(), 4.0);

        let top = DiscountTable::from_brackets([(5000.0, 6.0), (5000.0, 5.0)]);
        assert_eq!(top.select(5000.0).value(), 5.0);
    }

    #[test]
    fn test_nan_amount_gets_no_discount() {
        assert_eq!(standard_brackets().select(f64::NAN), Percent::zero());
    }

    #[test]
    fn test_discount_table_validation() {
        assert!(standard_brackets().validate().is_ok());
        assert!(DiscountTable::empty().validate().is_ok());

        let negative = DiscountTable::from_brackets([(-1.0, 3.0)]);
        assert_eq!(
            negative.validate(),
            Err(TableError::NegativeThreshold { threshold: -1.0 })
        );

        let too_big = DiscountTable::from_brackets([(1000.0, 130.0)]);
        assert!(matches!(
            too_big.validate(),
            Err(TableError::PercentOutOfRange { .. })
        ));

        let infinite = DiscountTable::from_brackets([(f64::INFINITY, 3.0)]);
        assert!(matches!(infinite.validate(), Err(TableError::NonFinite { .. })));
    }

    #[test]
    fn test_tax_table_lookup() {
        let taxes = TaxTable::from_rates([("ON", 13.0), ("AB", 5.0), ("DE", 0.0)]);
        assert_eq!(taxes.rate("AB"), Some(Percent::new(5.0)));
        assert_eq!(taxes.rate("DE"), Some(Percent::zero()));
        assert!(taxes.contains("ON"));
        assert!(!taxes.contains("on"));
        assert_eq!(taxes.region_codes(), vec!["AB", "DE", "ON"]);
    }

    #[test]
    fn test_tax_table_validation() {
        assert!(TaxTable::from_rates([("QC", 14.975)]).validate().is_ok());
        assert!(TaxTable::from_rates([("XX", -1.0)]).validate().is_err());
        assert!(TaxTable::from_rates([("XX", f64::NAN)]).validate().is_err());
    }

    #[test]
    fn test_discount_table_serde_sorts() {
        let json = r#"[{"threshold":5000.0,"discount":5.0},{"threshold":1000.0,"discount":3.0}]"#;
        let table: DiscountTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.brackets()[0].threshold, 1000.0);
    }
}
