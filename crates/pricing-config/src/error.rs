//! # Config Error Types
//!
//! Error types for locating, reading and parsing pricing tables.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Config Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Locating     │  │    Reading      │  │     Content             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NoDefaultPath  │  │  Read           │  │  Parse                  │ │
//! │  │                 │  │                 │  │  InvalidThreshold       │ │
//! │  │                 │  │                 │  │  Table (strict mode)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these fall back to defaults: a table that cannot be loaded stops
//! construction of the calculator.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use pricing_core::TableError;

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which of the two tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Discounts,
    TaxRates,
}

impl TableKind {
    /// File name looked up in the default config directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Discounts => "discounts.toml",
            TableKind::TaxRates => "tax_rates.toml",
        }
    }

    /// Environment variable that overrides the default path.
    pub fn env_var(&self) -> &'static str {
        match self {
            TableKind::Discounts => "PRICING_DISCOUNTS_PATH",
            TableKind::TaxRates => "PRICING_TAX_RATES_PATH",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Discounts => write!(f, "discounts"),
            TableKind::TaxRates => write!(f, "tax rates"),
        }
    }
}

/// Config error type covering every table loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No explicit path, no env override, and no platform config directory.
    #[error("No path for the {table} table and no default config directory available")]
    NoDefaultPath { table: TableKind },

    /// Failed to open or read a table file.
    #[error("Could not open {table} table at {}: {source}", path.display())]
    Read {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table content is not valid TOML, or not a flat table of numbers.
    #[error("Could not parse {table} table from {origin}: {source}")]
    Parse {
        table: TableKind,
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// A discount key is not a number.
    #[error("Discount threshold '{key}' in {origin} is not a number")]
    InvalidThreshold { origin: String, key: String },

    /// Strict mode rejected a table value.
    #[error("Invalid pricing table: {0}")]
    Table(#[from] TableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidThreshold {
            origin: "discounts.toml".to_string(),
            key: "lots".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Discount threshold 'lots' in discounts.toml is not a number"
        );

        let err = ConfigError::NoDefaultPath {
            table: TableKind::TaxRates,
        };
        assert!(err.to_string().contains("tax rates"));
    }

    #[test]
    fn test_read_error_names_path() {
        let err = ConfigError::Read {
            table: TableKind::Discounts,
            path: PathBuf::from("/missing/discounts.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.starts_with("Could not open discounts table"));
        assert!(message.contains("/missing/discounts.toml"));
    }

    #[test]
    fn test_table_error_converts() {
        let err: ConfigError = TableError::NegativeThreshold { threshold: -1.0 }.into();
        assert!(matches!(err, ConfigError::Table(_)));
    }
}
