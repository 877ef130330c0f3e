//! CLI command handling module
//!
//! Handles the diagnostic subcommands and logging setup for the binary.

mod commands;
mod logging;

pub use commands::{ConfigSubcommand, ExtractArgs, handle_charts, handle_config_command, handle_extract};
pub use logging::init_logging;
