//! # pricing-config: Table Loading for Order Pricing
//!
//! Supplies the two mappings [`pricing_core::PricingCalculator`] is built
//! from: it resolves where the tables live, reads them and parses them,
//! surfacing every failure before a calculator exists.
//!
//! ## Modules
//!
//! - [`config`] - Path resolution, parsing, loading
//! - [`error`] - Config error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pricing_config::{load_calculator, LoadMode, TableSources};
//!
//! // Explicit discounts file, tax rates from env or the default directory
//! let sources = TableSources::new(Some("discounts.toml".into()), None);
//! let calculator = load_calculator(&sources, LoadMode::Strict).unwrap();
//!
//! let total = calculator.calculate(12, 212.5, "AB").unwrap();
//! println!("{total}");
//! ```

pub mod config;
pub mod error;

pub use config::{
    default_config_dir, load_calculator, load_discounts, load_tax_rates, parse_discounts,
    parse_tax_rates, resolve_path, LoadMode, ResolvedPaths, TableSources,
};
pub use error::{ConfigError, ConfigResult, TableKind};
