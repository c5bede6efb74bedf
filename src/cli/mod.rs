//! Command-line front end.

mod commands;
pub mod interactive;
mod logging;
pub mod output;

pub use commands::{Cli, Mode, OutputFormat};
pub use logging::initialize_logging;
