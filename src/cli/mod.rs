//! Command-line interface.
//!
//! Each subcommand is implemented in its own submodule under `commands`.

mod commands;

pub use commands::{Cli, Commands, run_command};
