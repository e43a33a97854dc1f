use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use warung_cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());
    trace!("{args:?}");

    match warung_cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Exiting with error: {e:?}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber. RUST_LOG wins when set; otherwise
/// `level` applies to the warung crates only.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(
            ["warung_core", "warung_store", "warung_cli", env!("CARGO_BIN_NAME")]
                .iter()
                .map(|target| format!("{}={}", target, level))
                .collect::<Vec<_>>()
                .join(","),
        ),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
