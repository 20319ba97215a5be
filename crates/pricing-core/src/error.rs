//! # Error Types
//!
//! Domain-specific error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricing-core errors (this file)                                       │
//! │  ├── InvalidArgument  - Per-call argument failures (5 kinds)           │
//! │  └── TableError       - Strict table validation at construction        │
//! │                                                                         │
//! │  pricing-config errors (separate crate)                                │
//! │  └── ConfigError      - Locating, reading, parsing table files         │
//! │                                                                         │
//! │  Flow: InvalidArgument → caller      TableError → ConfigError → CLI    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the received value in every argument error
//! 3. Errors are enum variants, never String
//! 4. Every argument error maps to exactly one [`ArgumentKind`]

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Argument Kind
// =============================================================================

/// The five ways a `calculate` argument can be rejected.
///
/// Machine-readable counterpart of [`InvalidArgument`], for callers that
/// branch on the failure without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArgumentKind {
    NonIntegerQuantity,
    NonPositiveQuantity,
    NonNumericPrice,
    NonPositivePrice,
    UnknownRegion,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ArgumentKind::NonIntegerQuantity => "NON_INTEGER_QUANTITY",
            ArgumentKind::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            ArgumentKind::NonNumericPrice => "NON_NUMERIC_PRICE",
            ArgumentKind::NonPositivePrice => "NON_POSITIVE_PRICE",
            ArgumentKind::UnknownRegion => "UNKNOWN_REGION",
        };
        f.write_str(code)
    }
}

// =============================================================================
// Invalid Argument
// =============================================================================

/// Per-call argument errors raised by the calculator.
///
/// These are caller input errors. They are detected before any arithmetic
/// runs and are never retried internally.
///
/// ## Check Order
/// ```text
/// quantity ──► integral? ──► > 0? ──► price ──► numeric? ──► > 0? ──► region known?
///                 │            │                   │           │            │
///                 ▼            ▼                   ▼           ▼            ▼
///         NonInteger   NonPositive         NonNumeric   NonPositive   UnknownRegion
///          Quantity     Quantity             Price         Price
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    /// Quantity was not a whole number (e.g. `3.4`, `"asd"`).
    #[error("quantity must be an integer, received {received}")]
    NonIntegerQuantity { received: String },

    /// Quantity was zero or negative.
    #[error("quantity must be positive, received {received}")]
    NonPositiveQuantity { received: i64 },

    /// Unit price was not a finite number (e.g. `"10.0"`, `NaN`).
    #[error("unit price must be numeric, received {received}")]
    NonNumericPrice { received: String },

    /// Unit price was zero or negative.
    #[error("unit price must be positive, received {received}")]
    NonPositivePrice { received: f64 },

    /// Region code has no entry in the tax table.
    ///
    /// `valid` lists every known code in ascending order.
    #[error("region code must be one of {valid:?}, received {received:?}")]
    UnknownRegion { received: String, valid: Vec<String> },
}

impl InvalidArgument {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ArgumentKind {
        match self {
            InvalidArgument::NonIntegerQuantity { .. } => ArgumentKind::NonIntegerQuantity,
            InvalidArgument::NonPositiveQuantity { .. } => ArgumentKind::NonPositiveQuantity,
            InvalidArgument::NonNumericPrice { .. } => ArgumentKind::NonNumericPrice,
            InvalidArgument::NonPositivePrice { .. } => ArgumentKind::NonPositivePrice,
            InvalidArgument::UnknownRegion { .. } => ArgumentKind::UnknownRegion,
        }
    }

    /// Returns the valid region codes if this is an `UnknownRegion` error.
    pub fn valid_regions(&self) -> Option<&[String]> {
        match self {
            InvalidArgument::UnknownRegion { valid, .. } => Some(valid),
            _ => None,
        }
    }
}

// =============================================================================
// Table Error
// =============================================================================

/// Table shape errors, only raised by strict construction.
///
/// The trusting constructors never produce these: well-formed tables are
/// the loader's responsibility.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A threshold, discount or tax value is NaN or infinite.
    #[error("{field} must be a finite number, found {value}")]
    NonFinite { field: String, value: f64 },

    /// A discount threshold is below zero.
    #[error("discount threshold must not be negative, found {threshold}")]
    NegativeThreshold { threshold: f64 },

    /// A discount or tax percentage is outside `[0, 100]`.
    #[error("{field} must be between 0 and 100, found {value}")]
    PercentOutOfRange { field: String, value: f64 },
}

// =============================================================================
// Unit Tests
// =============================================================================
