//! # Validation Module
//!
//! Argument validation for the calculator.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Type system                                                  │
//! │  ├── quantity: i64  (integrality is a compile-time fact)               │
//! │  └── unit_price: f64                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Untyped JSON values → typed arguments (integral? numeric?)        │
//! │  └── Range checks (positive, finite, known region)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: PricingCalculator::quote                                     │
//! │  └── Arithmetic on arguments that are known to be valid                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::validation::{validate_quantity, validate_unit_price};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_unit_price(-10.0).is_err());
//! ```

use serde_json::Value;

use crate::error::InvalidArgument;
use crate::types::{Percent, TaxTable};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, InvalidArgument>;

// =============================================================================
// Typed Validators
// =============================================================================

/// Validates an item count.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(quantity: i64) -> ValidationResult<u64> {
    match u64::try_from(quantity) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(InvalidArgument::NonPositiveQuantity { received: quantity }),
    }
}

/// Validates a per-item price.
///
/// ## Rules
/// - Must be a finite number (NaN and infinities are not prices)
/// - Must be positive (> 0)
pub fn validate_unit_price(unit_price: f64) -> ValidationResult<f64> {
    if !unit_price.is_finite() {
        return Err(InvalidArgument::NonNumericPrice {
            received: unit_price.to_string(),
        });
    }

    if unit_price <= 0.0 {
        return Err(InvalidArgument::NonPositivePrice {
            received: unit_price,
        });
    }

    Ok(unit_price)
}

/// Looks up the tax rate for a region code.
///
/// ## Rules
/// - Must be present in the tax table (case-sensitive)
pub fn validate_region(taxes: &TaxTable, region_code: &str) -> ValidationResult<Percent> {
    taxes
        .rate(region_code)
        .ok_or_else(|| InvalidArgument::UnknownRegion {
            received: region_code.to_string(),
            valid: taxes.region_codes(),
        })
}

// =============================================================================
// Untyped Validators
// =============================================================================

/// Converts an untyped quantity into an item count.
///
/// ## Rules
/// - Must be a JSON integer; `3.4`, `3.0`, `"3"` and `true` are rejected
/// - Must be positive (> 0)
///
/// ## Example
/// ```rust
/// use pricing_core::validation::quantity_from_value;
/// use serde_json::json;
///
/// assert_eq!(quantity_from_value(&json!(12)).unwrap(), 12);
/// assert!(quantity_from_value(&json!(3.4)).is_err());
/// ```
pub fn quantity_from_value(value: &Value) -> ValidationResult<u64> {
    // Counts above i64::MAX only fit the unsigned form
    match (value.as_u64(), value.as_i64()) {
        (Some(count), _) if count > 0 => Ok(count),
        (_, Some(quantity)) => validate_quantity(quantity),
        _ => Err(InvalidArgument::NonIntegerQuantity {
            received: value.to_string(),
        }),
    }
}

/// Converts an untyped price into a per-item price.
///
/// ## Rules
/// - Must be a JSON number (integer or float); strings such as `"10.0"`
///   are rejected
/// - Must be positive (> 0)
pub fn unit_price_from_value(value: &Value) -> ValidationResult<f64> {
    match value.as_f64() {
        Some(price) => validate_unit_price(price),
        None => Err(InvalidArgument::NonNumericPrice {
            received: value.to_string(),
        }),
    }
}

/// Converts an untyped region code and looks up its tax rate.
///
/// Non-string values can never name a region and are reported as unknown.
pub fn region_from_value<'a>(
    taxes: &TaxTable,
    value: &'a Value,
) -> ValidationResult<(&'a str, Percent)> {
    match value.as_str() {
        Some(code) => validate_region(taxes, code).map(|rate| (code, rate)),
        None => Err(InvalidArgument::UnknownRegion {
            received: value.to_string(),
            valid: taxes.region_codes(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
