//! btdash binary entrypoint.

use bittensor_dash::cli;
use bittensor_dash::cli::utils::print_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
