//! # Sweet Bakery Dashboard Entry Point
//!
//! Setup lives in `lib.rs` for testability.

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect();
    match bakery_dashboard::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
