//! # Order Price Calculator
//!
//! Prices a single order from the command line.
//!
//! ## Usage
//! ```bash
//! # Tables from the default config directory
//! cargo run -p pricing-config --bin price -- 12 212.5 AB
//!
//! # Explicit tables, full breakdown as JSON
//! cargo run -p pricing-config --bin price -- \
//!     --discounts ./discounts.toml --tax-rates ./tax_rates.toml --json 14 1008.42 QC
//!
//! # Order as a JSON document
//! cargo run -p pricing-config --bin price -- \
//!     --order '{"quantity": 12, "unit_price": 212.5, "region_code": "AB"}'
//! ```
//!
//! ## Exit Codes
//! - `0` - Order priced
//! - `1` - Tables could not be loaded (or output could not be written)
//! - `2` - Bad command line or rejected order

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use pricing_config::{load_calculator, LoadMode, TableSources};
use pricing_core::{OrderRequest, Quote};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

const USAGE: &str = "\
Usage: price [OPTIONS] <QUANTITY> <UNIT_PRICE> <REGION>
       price [OPTIONS] --order <JSON>

Options:
  -d, --discounts <PATH>   Discounts table (default: $PRICING_DISCOUNTS_PATH or config dir)
  -t, --tax-rates <PATH>   Tax rates table (default: $PRICING_TAX_RATES_PATH or config dir)
  -o, --order <JSON>       Order as {\"quantity\", \"unit_price\", \"region_code\"}
  -s, --strict             Reject negative thresholds and percentages outside 0-100
  -j, --json               Print the full breakdown as JSON
  -h, --help               Show this help message";

#[derive(Debug, Default, PartialEq)]
struct Options {
    discounts: Option<PathBuf>,
    tax_rates: Option<PathBuf>,
    order: Option<String>,
    strict: bool,
    json: bool,
    positional: Vec<String>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Price(Options),
}

impl Options {
    fn request(&self) -> Result<OrderRequest, String> {
        match (&self.order, self.positional.as_slice()) {
            (Some(json), []) => {
                serde_json::from_str(json).map_err(|e| format!("invalid --order JSON: {}", e))
            }
            (Some(_), _) => Err("--order cannot be combined with positional arguments".into()),
            (None, [quantity, unit_price, region]) => {
                Ok(OrderRequest::from_text(quantity, unit_price, region))
            }
            (None, args) => Err(format!(
                "expected QUANTITY UNIT_PRICE REGION, got {} argument(s)",
                args.len()
            )),
        }
    }

    fn sources(&self) -> TableSources {
        TableSources::new(self.discounts.clone(), self.tax_rates.clone())
    }

    fn mode(&self) -> LoadMode {
        if self.strict {
            LoadMode::Strict
        } else {
            LoadMode::Trusting
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--discounts" | "-d" | "--tax-rates" | "-t" | "--order" | "-o" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} requires a value", arg))?
                    .clone();
                match arg {
                    "--discounts" | "-d" => options.discounts = Some(PathBuf::from(value)),
                    "--tax-rates" | "-t" => options.tax_rates = Some(PathBuf::from(value)),
                    _ => options.order = Some(value),
                }
                i += 1;
            }
            "--strict" | "-s" => options.strict = true,
            "--json" | "-j" => options.json = true,
            "--help" | "-h" => return Ok(Command::Help),
            // Negative numbers are values, not flags
            other if other.starts_with('-') && other.parse::<f64>().is_err() => {
                return Err(format!("unknown option: {}", other));
            }
            other => options.positional.push(other.to_string()),
        }
        i += 1;
    }

    Ok(Command::Price(options))
}

fn render(quote: &Quote, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string_pretty(quote)
    } else {
        Ok(quote.total.to_string())
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let stdout = io::stdout();
    ExitCode::from(run(&args, &mut stdout.lock()))
}

/// Prices the order described by `args`, writing the result to `out`.
///
/// Returns the process exit code. Diagnostics go to stderr.
fn run(args: &[String], out: &mut impl Write) -> u8 {
    let options = match parse_args(args) {
        Ok(Command::Help) => return emit(out, USAGE),
        Ok(Command::Price(options)) => options,
        Err(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            return EXIT_USAGE;
        }
    };

    let request = match options.request() {
        Ok(request) => request,
        Err(message) => {
            eprintln!("error: {}\n\n{}", message, USAGE);
            return EXIT_USAGE;
        }
    };

    let calculator = match load_calculator(&options.sources(), options.mode()) {
        Ok(calculator) => calculator,
        Err(e) => {
            error!(error = %e, "Failed to load pricing tables");
            eprintln!("error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let quote = match calculator.calculate_request(&request) {
        Ok(quote) => quote,
        Err(e) => {
            debug!(kind = %e.kind(), "Order rejected");
            eprintln!("error [{}]: {}", e.kind(), e);
            return EXIT_USAGE;
        }
    };

    match render(&quote, options.json) {
        Ok(output) => emit(out, &output),
        Err(e) => {
            error!(error = %e, "Failed to serialize quote");
            eprintln!("error: {}", e);
            EXIT_FAILURE
        }
    }
}

fn emit(out: &mut impl Write, text: &str) -> u8 {
    match writeln!(out, "{}", text) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            error!(error = %e, "Failed to write output");
            eprintln!("error: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout only carries the result.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show path resolution and rejections
/// - Default: warnings, plus INFO for the pricing crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,pricing=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::NamedTempFile;

    const DISCOUNTS: &str = "1000 = 3\n5000 = 5\n7000 = 7\n10000 = 10\n";
    const TAX_RATES: &str = "AB = 5\nON = 13\nQC = 14.975\nMI = 6\nDE = 0\n";

    /// Table files that live as long as the fixture.
    struct Tables {
        discounts: NamedTempFile,
        tax_rates: NamedTempFile,
    }

    impl Tables {
        fn new() -> Self {
            Tables {
                discounts: temp_file(DISCOUNTS),
                tax_rates: temp_file(TAX_RATES),
            }
        }

        /// Runs the CLI with these tables, returning the exit code and stdout.
        fn run(&self, extra: &[&str]) -> (u8, String) {
            let mut list = vec![
                "-d".to_string(),
                self.discounts.path().display().to_string(),
                "-t".to_string(),
                self.tax_rates.path().display().to_string(),
            ];
            list.extend(args(extra));

            let mut out = Vec::new();
            let code = run(&list, &mut out);
            (code, String::from_utf8(out).unwrap())
        }
    }

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn options(list: &[&str]) -> Options {
        match parse_args(&args(list)).unwrap() {
            Command::Price(options) => options,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_positional_order() {
        let opts = options(&["-d", "d.toml", "--json", "12", "212.5", "AB"]);
        assert_eq!(opts.discounts, Some(PathBuf::from("d.toml")));
        assert!(opts.json);
        assert_eq!(opts.mode(), LoadMode::Trusting);

        let request = opts.request().unwrap();
        assert_eq!(request.quantity, json!(12));
        assert_eq!(request.region_code, json!("AB"));
    }

    #[test]
    fn test_negative_numbers_are_positional() {
        let opts = options(&["-5", "-10.0", "AB"]);
        assert_eq!(opts.positional, vec!["-5", "-10.0", "AB"]);
    }

    #[test]
    fn test_order_json() {
        let order = r#"{"quantity": 3.4, "unit_price": 1, "region_code": "AB"}"#;
        let opts = options(&["--strict", "--order", order]);
        assert_eq!(opts.mode(), LoadMode::Strict);
        assert_eq!(opts.request().unwrap().quantity, json!(3.4));
    }

    #[test]
    fn test_bad_command_lines() {
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["--discounts"])).is_err());
        assert!(options(&["1", "2"]).request().is_err());
        assert!(options(&["-o", "{}", "1", "2", "AB"]).request().is_err());
        assert!(options(&["-o", "not json"]).request().is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(&args(&["1", "-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_run_prints_total() {
        let (code, out) = Tables::new().run(&["12", "212.5", "AB"]);
        assert_eq!(code, EXIT_OK);

        let total: f64 = out.trim().parse().unwrap();
        assert!((total - 2597.175).abs() < 1e-6, "got {total}");
    }

    #[test]
    fn test_run_json_breakdown() {
        let (code, out) = Tables::new().run(&["--json", "12", "212.5", "AB"]);
        assert_eq!(code, EXIT_OK);

        let quote: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(quote["quantity"], json!(12));
        assert_eq!(quote["unit_price"], json!(212.5));
        assert_eq!(quote["region_code"], json!("AB"));
        assert_eq!(quote["gross"], json!(2550.0));
        assert_eq!(quote["discount"], json!(3.0));
        assert_eq!(quote["tax"], json!(5.0));
        assert!(quote["discounted"].is_f64());
        assert!(quote["total"].is_f64());
    }

    #[test]
    fn test_run_order_document() {
        let order = r#"{"quantity": 1, "unit_price": 10, "region_code": "DE"}"#;
        let (code, out) = Tables::new().run(&["--order", order]);
        assert_eq!(code, EXIT_OK);
        assert_eq!(out.trim(), "10");
    }

    #[test]
    fn test_run_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("discounts.toml");
        let tables = Tables::new();

        let list = args(&[
            "-d",
            &missing.display().to_string(),
            "-t",
            &tables.tax_rates.path().display().to_string(),
            "1",
            "10",
            "DE",
        ]);
        let mut out = Vec::new();
        assert_eq!(run(&list, &mut out), EXIT_FAILURE);
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_rejects_bad_arguments() {
        let tables = Tables::new();
        let rejected: [&[&str]; 8] = [
            &["--bogus"],
            &["1", "10"],
            &["asd", "10", "AB"],
            &["3.4", "10", "AB"],
            &["-5", "10", "AB"],
            &["1", "ten", "AB"],
            &["1", "-10", "AB"],
            &["1", "10", "HELLO"],
        ];

        for extra in rejected {
            let (code, out) = tables.run(extra);
            assert_eq!(code, EXIT_USAGE, "args {extra:?}");
            assert!(out.is_empty(), "args {extra:?}");
        }
    }

    #[test]
    fn test_run_help() {
        let (code, out) = Tables::new().run(&["--help"]);
        assert_eq!(code, EXIT_OK);
        assert!(out.starts_with("Usage: price"));
    }
}
