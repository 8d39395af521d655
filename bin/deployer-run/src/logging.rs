//! Logging configuration for the runner.
//!
//! `RUST_LOG` takes precedence over the `-v` flags. Without either, logging is off.

use std::{fs::File, path::PathBuf};

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{Result, RunError};

/// Crates whose events the `-v` flags enable.
const LOG_TARGETS: &[&str] = &["deployer_run", "child_deployer"];

/// Flags controlling where the runner's trace output goes.
#[derive(Debug, Clone, Default, Parser)]
pub struct LogArgs {
    /// Verbosity of the runner and contract logs. Repeat for more detail, from `-v` (errors
    /// only) to `-vvvvv` (every host call).
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr. The file is truncated first.
    #[arg(long = "log.file", visible_aliases = ["log-file"], global = true)]
    pub log_file: Option<PathBuf>,

    /// Print stderr logs without ANSI colors. File logs never carry colors.
    #[arg(long = "log.no-color", visible_aliases = ["log-no-color"], global = true)]
    pub log_no_color: bool,
}

impl LogArgs {
    /// The level selected by the `-v` flags, or `None` when logging is off.
    pub const fn level(&self) -> Option<Level> {
        Some(match self.verbose {
            0 => return None,
            1 => Level::ERROR,
            2 => Level::WARN,
            3 => Level::INFO,
            4 => Level::DEBUG,
            _ => Level::TRACE,
        })
    }

    /// The filter directive for the `-v` flags.
    pub fn directive(&self) -> String {
        let Some(level) = self.level() else { return "off".to_string() };
        LOG_TARGETS.iter().map(|target| format!("{target}={level}")).collect::<Vec<_>>().join(",")
    }

    /// Installs the global tracing subscriber.
    ///
    /// Targets are shown from DEBUG upwards. With `--log.file`, logs go to the file without ANSI
    /// colors.
    pub fn init(&self) -> Result<()> {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.directive())
        };
        let show_target = self.verbose >= 4;

        let installed = if let Some(ref log_file) = self.log_file {
            let file = File::create(log_file)?;
            fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(file)
                .with_ansi(false)
                .try_init()
        } else {
            fmt()
                .with_env_filter(filter)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .with_ansi(!self.log_no_color)
                .try_init()
        };
        installed.map_err(|e| RunError::Logging(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::off(0, "off")]
    #[case::error(1, "deployer_run=ERROR,child_deployer=ERROR")]
    #[case::debug(4, "deployer_run=DEBUG,child_deployer=DEBUG")]
    #[case::capped(9, "deployer_run=TRACE,child_deployer=TRACE")]
    fn test_directive(#[case] verbose: u8, #[case] expected: &str) {
        let args = LogArgs { verbose, ..Default::default() };
        assert_eq!(args.directive(), expected);
    }
}
