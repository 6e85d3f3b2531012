//! Main entry point for the `commit-check` CLI.

use commit_check::cli;
use std::error::Error as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            let mut detail = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                detail.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            eprintln!("An error occurred: {detail}");
            ExitCode::FAILURE
        },
    }
}
