use bazel_hashes_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; stderr if the log file is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and run.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("bazel-hashes error: {:#}", err);
        std::process::exit(1);
    }
}
