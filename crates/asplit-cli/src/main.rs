use asplit_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Fall back to stderr if the XDG state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("asplit error: {:#}", err);
        std::process::exit(1);
    }
}
