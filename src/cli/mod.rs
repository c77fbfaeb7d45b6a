//! CLI module for aerofind
//!
//! Provides the command-line interface:
//! - repl: load the dataset and enter the interactive prompt loop
//! - query: one-shot prefix-and-filter query

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{run, run_command, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{prompt_line, write_no_prefix, write_outcome};
