//! Subcommand entry points. Each returns the process exit code.

pub mod repl;
pub mod run;
