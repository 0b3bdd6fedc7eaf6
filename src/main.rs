//! Binary entrypoint for the `postman-split` CLI.

use std::process::ExitCode;

use postman_split::RunError;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match postman_split::run(std::env::args()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(RunError::Args(err)) => {
            // clap prints help/version to stdout and usage errors to stderr.
            let _ = err.print();
            if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
