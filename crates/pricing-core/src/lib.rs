//! # pricing-core: Pure Order Pricing Logic
//!
//! This crate computes the final amount of an order: a tiered volume
//! discount on the gross amount, followed by a regional tax. It contains
//! pure functions only, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Pricing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  `price` CLI (pricing-config)                   │   │
//! │  │        args / --order JSON ──► OrderRequest ──► Quote          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               pricing-config (Table Loading)                    │   │
//! │  │       default paths, discounts.toml, tax_rates.toml            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DiscountTable, TaxTable                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │ calculator │  │  request  │  │ validation│ │   │
//! │  │   │  Bracket  │  │ Calculator │  │  untyped  │  │   rules   │ │   │
//! │  │   │ TaxTable  │  │   Quote    │  │  orders   │  │  checks   │ │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Percent, Bracket, DiscountTable, TaxTable
//! - [`calculator`] - PricingCalculator and Quote
//! - [`request`] - Untyped order requests (JSON / CLI text)
//! - [`validation`] - Argument validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pricing_core::{DiscountTable, PricingCalculator, TaxTable};
//!
//! let calculator = PricingCalculator::new(
//!     DiscountTable::from_brackets([(10000.0, 10.0)]),
//!     TaxTable::from_rates([("AB", 5.0)]),
//! );
//!
//! // 10 × 10000 = 100000, 10% off, 5% tax
//! let total = calculator.calculate(10, 10000.0, "AB").unwrap();
//! assert!((total - 94500.0).abs() < 1e-6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod request;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pricing_core::PricingCalculator` instead of
// `use pricing_core::calculator::PricingCalculator`

pub use calculator::{PricingCalculator, Quote};
pub use error::{ArgumentKind, InvalidArgument, TableError};
pub use request::OrderRequest;
pub use types::*;
