//! # Order Desk Library
//!
//! Orchestration layer for the manufacturing order workflow. All business
//! rules live in `orderdesk-core`; this crate wires configuration, catalog
//! and draft state to the commands the order form calls.
//!
//! ## Module Organization
//! ```text
//! orderdesk_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Clients, manufacturers, products
//! │   ├── draft.rs    ◄─── Draft state management
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── order.rs    ◄─── Parties, save, submit
//! │   ├── product.rs  ◄─── Variant grid, quick fill
//! │   ├── media.rs    ◄─── Reference files
//! │   ├── sample.rs   ◄─── Sample routing
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── script.rs       ◄─── JSON step runner
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod script;
pub mod state;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppError;
use script::{Desk, ScriptStep};
use state::{CatalogState, DeskConfig};

/// Runs the order desk against a catalog file and a script file, printing
/// the report as JSON on stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter (stderr)                       │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults, ORDERDESK_CONFIG file, ORDERDESK_* variables            │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • clients, manufacturers, products                                  │
/// │     • every entry validated, duplicates rejected                        │
/// │                                                                         │
/// │  4. Run Script ───────────────────────────────────────────────────────► │
/// │     • one command per step, stop at first failure                       │
/// │                                                                         │
/// │  5. Print Report ─────────────────────────────────────────────────────► │
/// │     • records + notification rows + final draft                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), AppError> {
    init_tracing();

    let (catalog_path, script_path) = parse_args(std::env::args().skip(1))?;

    let config = DeskConfig::load()?;
    info!(
        draft_prefix = %config.draft_prefix,
        order_prefix = %config.order_prefix,
        empty_dimensions = ?config.empty_dimensions,
        "Configuration loaded"
    );

    let catalog: CatalogState = read_json(&catalog_path)?;
    catalog.validate()?;
    info!(
        clients = catalog.clients.len(),
        manufacturers = catalog.manufacturers.len(),
        products = catalog.products.len(),
        "Catalog loaded"
    );

    let steps: Vec<ScriptStep> = read_json(&script_path)?;
    let report = Desk::new(catalog, config).run(steps)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orderdesk=trace` - Show trace for order desk crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orderdesk=debug"));

    // stdout carries the JSON report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args<I>(mut args: I) -> Result<(PathBuf, PathBuf), AppError>
where
    I: Iterator<Item = String>,
{
    match (args.next(), args.next(), args.next()) {
        (Some(catalog), Some(script), None) => Ok((PathBuf::from(catalog), PathBuf::from(script))),
        _ => Err(AppError::Usage),
    }
}

/// Reads and parses a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> std::vec::IntoIter<String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args() {
        let (catalog, script) = parse_args(args(&["catalog.json", "order.json"])).unwrap();
        assert_eq!(catalog, PathBuf::from("catalog.json"));
        assert_eq!(script, PathBuf::from("order.json"));

        assert!(matches!(parse_args(args(&["catalog.json"])), Err(AppError::Usage)));
        assert!(matches!(
            parse_args(args(&["a", "b", "c"])),
            Err(AppError::Usage)
        ));
    }

    #[test]
    fn test_read_json_errors_name_the_file() {
        let err = read_json::<CatalogState>(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, AppError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
