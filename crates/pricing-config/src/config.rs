//! # Pricing Tables
//!
//! Locating, reading and parsing the discount and tax tables.
//!
//! ## Path Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Path Priority (per table)                            │
//! │                                                                         │
//! │  1. Explicit path (highest priority)                                   │
//! │     --discounts ./discounts.toml                                       │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     PRICING_DISCOUNTS_PATH=/etc/pricing/discounts.toml                 │
//! │     PRICING_TAX_RATES_PATH=/etc/pricing/tax_rates.toml                 │
//! │                                                                         │
//! │  3. Platform config directory (lowest priority)                        │
//! │     ~/.config/order-pricing/discounts.toml (Linux)                     │
//! │     ~/Library/Application Support/com.pricing.order-pricing/ (macOS)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike optional settings, a table that is missing at its resolved path
//! is an error, never an empty default.
//!
//! ## File Formats
//! ```toml
//! # discounts.toml: threshold = discount percent
//! 1000 = 3
//! 5000 = 5
//! "7500.50" = 7   # decimal thresholds must be quoted
//! 10000 = 10
//! ```
//!
//! ```toml
//! # tax_rates.toml: region code = tax percent
//! AB = 5
//! ON = 13
//! QC = 14.975
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pricing_core::{DiscountTable, PricingCalculator, TaxTable};

use crate::error::{ConfigError, ConfigResult, TableKind};

// =============================================================================
// Load Mode
// =============================================================================

/// How much the loader checks table values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Tables are taken as written.
    #[default]
    Trusting,

    /// Thresholds must be non-negative and percentages within `[0, 100]`.
    Strict,
}

// =============================================================================
// Table Sources
// =============================================================================

/// Where to read the two tables from.
///
/// `None` means "use the environment override, else the default path".
#[derive(Debug, Clone, Default)]
pub struct TableSources {
    pub discounts: Option<PathBuf>,
    pub tax_rates: Option<PathBuf>,
}

/// Paths after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub discounts: PathBuf,
    pub tax_rates: PathBuf,
}

impl TableSources {
    pub fn new(discounts: Option<PathBuf>, tax_rates: Option<PathBuf>) -> Self {
        TableSources {
            discounts,
            tax_rates,
        }
    }

    /// Resolves both paths against the environment and default directory.
    pub fn resolve(&self) -> ConfigResult<ResolvedPaths> {
        let default_dir = default_config_dir();
        Ok(ResolvedPaths {
            discounts: resolve_path(
                TableKind::Discounts,
                self.discounts.clone(),
                env_override(TableKind::Discounts),
                default_dir.as_deref(),
            )?,
            tax_rates: resolve_path(
                TableKind::TaxRates,
                self.tax_rates.clone(),
                env_override(TableKind::TaxRates),
                default_dir.as_deref(),
            )?,
        })
    }
}

/// Picks the path for one table: explicit, then env override, then default.
pub fn resolve_path(
    table: TableKind,
    explicit: Option<PathBuf>,
    env_value: Option<String>,
    default_dir: Option<&Path>,
) -> ConfigResult<PathBuf> {
    if let Some(path) = explicit {
        debug!(%table, ?path, "Using explicit table path");
        return Ok(path);
    }

    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        debug!(%table, path = %value, var = table.env_var(), "Using table path from environment");
        return Ok(PathBuf::from(value));
    }

    match default_dir {
        Some(dir) => {
            let path = dir.join(table.file_name());
            debug!(%table, ?path, "Using default table path");
            Ok(path)
        }
        None => Err(ConfigError::NoDefaultPath { table }),
    }
}

fn env_override(table: TableKind) -> Option<String> {
    std::env::var(table.env_var()).ok()
}

/// Returns the platform config directory for the pricing tables.
pub fn default_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "pricing", "order-pricing")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses discount brackets from TOML text.
///
/// Keys are thresholds written as strings (`"1000"`, `"7500.50"`), values
/// are percentages.
pub fn parse_discounts(text: &str, origin: &str) -> ConfigResult<DiscountTable> {
    let raw: BTreeMap<String, f64> =
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            table: TableKind::Discounts,
            origin: origin.to_string(),
            source,
        })?;

    let brackets = raw
        .into_iter()
        .map(|(key, percent)| {
            key.trim()
                .parse::<f64>()
                .map(|threshold| (threshold, percent))
                .map_err(|_| ConfigError::InvalidThreshold {
                    origin: origin.to_string(),
                    key,
                })
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    Ok(DiscountTable::from_brackets(brackets))
}

/// Parses tax rates from TOML text.
pub fn parse_tax_rates(text: &str, origin: &str) -> ConfigResult<TaxTable> {
    let raw: BTreeMap<String, f64> =
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            table: TableKind::TaxRates,
            origin: origin.to_string(),
            source,
        })?;

    Ok(TaxTable::from_rates(raw))
}

// =============================================================================
// Loading
// =============================================================================

fn read_table(table: TableKind, path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        table,
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a discounts file.
pub fn load_discounts(path: &Path) -> ConfigResult<DiscountTable> {
    let text = read_table(TableKind::Discounts, path)?;
    let table = parse_discounts(&text, &path.display().to_string())?;
    info!(?path, brackets = table.len(), "Loaded discount table");
    Ok(table)
}

/// Reads and parses a tax rates file.
pub fn load_tax_rates(path: &Path) -> ConfigResult<TaxTable> {
    let text = read_table(TableKind::TaxRates, path)?;
    let table = parse_tax_rates(&text, &path.display().to_string())?;
    info!(?path, regions = table.len(), "Loaded tax rate table");
    Ok(table)
}

/// Resolves, reads and parses both tables and builds a calculator.
///
/// ## Load Order
/// 1. Resolve both paths
/// 2. Discounts
/// 3. Tax rates
/// 4. Strict checks (if requested)
pub fn load_calculator(sources: &TableSources, mode: LoadMode) -> ConfigResult<PricingCalculator> {
    let paths = sources.resolve()?;
    let discounts = load_discounts(&paths.discounts)?;
    let taxes = load_tax_rates(&paths.tax_rates)?;

    let calculator = match mode {
        LoadMode::Trusting => PricingCalculator::new(discounts, taxes),
        LoadMode::Strict => PricingCalculator::strict(discounts, taxes)?,
    };

    debug!(?mode, "Pricing calculator ready");
    Ok(calculator)
}

// =============================================================================
// Unit Tests
// =============================================================================
