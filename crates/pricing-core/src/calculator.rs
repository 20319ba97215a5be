//! # Pricing Calculator
//!
//! Computes the final amount of an order from quantity, unit price and tax
//! region.
//!
//! ## Amount Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  quantity × unit_price ──► gross                                       │
//! │                              │                                          │
//! │                              ▼                                          │
//! │            DiscountTable::select(gross) ──► discount %                 │
//! │                              │                                          │
//! │                              ▼                                          │
//! │            gross × (1 - discount/100) ──► discounted                   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │            TaxTable[region] ──► tax %                                  │
//! │                              │                                          │
//! │                              ▼                                          │
//! │            discounted × (1 + tax/100) ──► total                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator never mutates its tables after construction, so one
//! instance can be shared freely (including across threads).

use serde::Serialize;

use crate::error::{InvalidArgument, TableError};
use crate::request::OrderRequest;
use crate::types::{DiscountTable, Percent, TaxTable};
use crate::validation::{
    quantity_from_value, region_from_value, unit_price_from_value, validate_quantity,
    validate_region, validate_unit_price, ValidationResult,
};

// =============================================================================
// Quote
// =============================================================================

/// Breakdown of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub quantity: u64,
    pub unit_price: f64,
    pub region_code: String,

    /// `quantity × unit_price`
    pub gross: f64,

    /// Discount of the bracket `gross` falls in.
    pub discount: Percent,

    /// `gross` after the discount.
    pub discounted: f64,

    /// Tax rate of the region.
    pub tax: Percent,

    /// `discounted` after tax.
    pub total: f64,
}

// =============================================================================
// Pricing Calculator
// =============================================================================

/// Applies a tiered volume discount and a regional tax to orders.
///
/// ## Example
/// ```rust
/// use pricing_core::{DiscountTable, PricingCalculator, TaxTable};
///
/// let calculator = PricingCalculator::new(
///     DiscountTable::from_brackets([(1000.0, 3.0), (5000.0, 5.0)]),
///     TaxTable::from_rates([("AB", 5.0), ("DE", 0.0)]),
/// );
///
/// assert_eq!(calculator.calculate(1, 10.0, "DE").unwrap(), 10.0);
/// assert!(calculator.calculate(1, 10.0, "HELLO").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PricingCalculator {
    discounts: DiscountTable,
    taxes: TaxTable,
}

impl PricingCalculator {
    /// Creates a calculator that trusts its tables as given.
    pub fn new(discounts: DiscountTable, taxes: TaxTable) -> Self {
        PricingCalculator { discounts, taxes }
    }

    /// Creates a calculator after checking the tables.
    ///
    /// ## Rules
    /// - Thresholds finite and non-negative
    /// - Discount and tax percentages finite and within `[0, 100]`
    pub fn strict(discounts: DiscountTable, taxes: TaxTable) -> Result<Self, TableError> {
        discounts.validate()?;
        taxes.validate()?;
        Ok(Self::new(discounts, taxes))
    }

    pub fn discounts(&self) -> &DiscountTable {
        &self.discounts
    }

    pub fn taxes(&self) -> &TaxTable {
        &self.taxes
    }

    /// Returns the total amount after discount and tax.
    ///
    /// ## Errors
    /// Checked in order, before any arithmetic:
    /// - `NonPositiveQuantity` if `quantity <= 0`
    /// - `NonNumericPrice` if `unit_price` is NaN or infinite
    /// - `NonPositivePrice` if `unit_price <= 0`
    /// - `UnknownRegion` if the tax table has no entry for `region_code`
    pub fn calculate(
        &self,
        quantity: i64,
        unit_price: f64,
        region_code: &str,
    ) -> Result<f64, InvalidArgument> {
        self.quote(quantity, unit_price, region_code).map(|quote| quote.total)
    }

    /// Same as [`calculate`](Self::calculate), returning every intermediate
    /// amount.
    pub fn quote(
        &self,
        quantity: i64,
        unit_price: f64,
        region_code: &str,
    ) -> ValidationResult<Quote> {
        let quantity = validate_quantity(quantity)?;
        let unit_price = validate_unit_price(unit_price)?;
        let tax = validate_region(&self.taxes, region_code)?;

        Ok(self.compose(quantity, unit_price, region_code, tax))
    }

    /// Validates an untyped order and quotes it.
    ///
    /// This is the only path that can report `NonIntegerQuantity`, since
    /// the typed signature already rules it out.
    pub fn calculate_request(&self, request: &OrderRequest) -> ValidationResult<Quote> {
        let quantity = quantity_from_value(&request.quantity)?;
        let unit_price = unit_price_from_value(&request.unit_price)?;
        let (region_code, tax) = region_from_value(&self.taxes, &request.region_code)?;

        Ok(self.compose(quantity, unit_price, region_code, tax))
    }

    fn compose(&self, quantity: u64, unit_price: f64, region_code: &str, tax: Percent) -> Quote {
        let gross = quantity as f64 * unit_price;
        let discount = self.discounts.select(gross);
        let discounted = gross * (1.0 - discount.fraction());
        let total = discounted * (1.0 + tax.fraction());

        Quote {
            quantity,
            unit_price,
            region_code: region_code.to_string(),
            gross,
            discount,
            discounted,
            tax,
            total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
