//! # Warung Shell Library
//!
//! The command-line front end for the warung books: a line-driven shell
//! over one in-memory [`Session`](state::Session).
//!
//! ## Module Organization
//! ```text
//! warung_cli/
//! ├── lib.rs          ◄─── You are here (mode selection)
//! ├── args.rs         ◄─── Process arguments and shell line grammar (clap)
//! ├── shell.rs        ◄─── Tokenizer and read-eval-print loop
//! ├── output.rs       ◄─── Out, tables, key/value blocks
//! ├── state/
//! │   ├── mod.rs      ◄─── Session (books, cart, config, today)
//! │   └── config.rs   ◄─── warung.toml + WARUNG_* overrides
//! ├── commands/       ◄─── One module per screen
//! └── error.rs        ◄─── CliError
//! ```
//!
//! ## Modes
//! ```text
//! warung                         interactive shell on stdin
//! warung --script day.txt        every line of day.txt, then exit
//! warung -- report balance       a single command, then exit
//! warung --seed ...              any of the above, starting from demo data
//! ```

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod shell;
pub mod state;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};

use anyhow::{bail, Context};
use chrono::Local;
use tracing::{debug, info};
use warung_store::seed_demo;

pub use args::Args;
pub use error::{CliError, CliResult};

use shell::Shell;
use state::{Session, WarungConfig};

/// Builds the session from the configuration and runs the selected mode.
pub fn run(args: Args) -> anyhow::Result<()> {
    let common = args.common();
    let config = WarungConfig::load(common.config().cloned()).context("Loading configuration")?;
    let today = Local::now().date_naive();
    info!(store = %config.store.name, %today, "Opening books");

    let mut session = Session::new(config, today);
    if common.seed() {
        let summary = seed_demo(session.books_mut(), today).context("Loading demo data")?;
        info!(products = summary.products, "Demo data loaded");
    }

    let stdout = io::stdout();
    let mut shell = Shell::new(session, stdout.lock(), common.json());

    if !args.command().is_empty() {
        debug!(command = ?args.command(), "Running single command");
        shell.run_words(args.command())?;
        return Ok(());
    }

    if let Some(path) = args.script() {
        let file = File::open(path).with_context(|| format!("Opening {}", path.display()))?;
        let failures = shell.run(BufReader::new(file), false)?;
        if failures > 0 {
            bail!("{} line(s) of {} failed", failures, path.display());
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    shell.run(stdin.lock(), interactive)?;
    Ok(())
}
