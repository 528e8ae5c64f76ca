//! seomap CLI binary.

use std::process::ExitCode;

use colored::Colorize;
use seomap_cli::error::exit_code_from_error;

fn main() -> ExitCode {
    match seomap_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "Error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
