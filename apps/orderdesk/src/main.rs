//! # Order Desk Entry Point
//!
//! ```text
//! orderdesk <catalog.json> <script.json>
//! ```
//!
//! The actual setup is in lib.rs for testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    match orderdesk_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
