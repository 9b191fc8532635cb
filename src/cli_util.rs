use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::config::{resolve_table, TableOverrides};
use crate::robot::Table;

/// Env var holding the tracing filter directives (e.g. `ROBOT_LOG=debug`).
pub const LOG_ENV: &str = "ROBOT_LOG";

/// Table bound flags shared by `run` and `repl`.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Inclusive upper bound for x (fallback ROBOT_MAX_X; default 5)
    #[arg(long = "max-x", value_name = "N", allow_negative_numbers = true)]
    pub max_x: Option<i32>,

    /// Inclusive upper bound for y (fallback ROBOT_MAX_Y; default 5)
    #[arg(long = "max-y", value_name = "N", allow_negative_numbers = true)]
    pub max_y: Option<i32>,

    /// Read table bounds from PATH instead of the default robot.toml
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl TableArgs {
    pub fn overrides(&self) -> TableOverrides {
        TableOverrides {
            max_x: self.max_x,
            max_y: self.max_y,
            config: self.config.clone(),
        }
    }
}

/// Install the stderr tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Print `program: message` to stderr and flush.
pub fn print_error(program: &str, err: &dyn std::error::Error) {
    eprintln!("{program}: {err}");
    let _ = io::stderr().flush();
}

/// Resolve the table for a subcommand, printing the error on failure.
pub fn table_or_report(program: &str, args: &TableArgs) -> Option<Table> {
    match resolve_table(&args.overrides()) {
        Ok(table) => Some(table),
        Err(e) => {
            print_error(program, &e);
            None
        }
    }
}

/// Open the command source: the file at `path`, or stdin when `None`.
pub fn open_input(path: Option<&str>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(p) => Ok(Box::new(BufReader::new(File::open(p)?))),
        None => Ok(Box::new(io::stdin().lock())),
    }
}
