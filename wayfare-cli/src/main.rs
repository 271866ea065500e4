//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use wayfare_cli::CliError;

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() -> ExitCode {
    match wayfare_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("wayfare: {err}");
            ExitCode::FAILURE
        }
    }
}
