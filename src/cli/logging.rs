//! Logging initialization.

use super::{Cli, OutputFormat};
use color_eyre::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Log level for the given flags. JSON output keeps stderr to errors unless
/// verbose logging was asked for.
pub fn log_level(cli: &Cli) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || cli.output == OutputFormat::Json {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Install the global tracing subscriber, writing to stderr.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn level(args: &[&str]) -> Level {
        let mut argv = vec!["indentnav", "a.py"];
        argv.extend_from_slice(args);
        log_level(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_levels() {
        assert_eq!(level(&[]), Level::WARN);
        assert_eq!(level(&["-v"]), Level::DEBUG);
        assert_eq!(level(&["-q"]), Level::ERROR);
        assert_eq!(level(&["-o", "json"]), Level::ERROR);
        assert_eq!(level(&["-o", "json", "-v"]), Level::DEBUG);
    }
}
