//! Tracing subscriber setup.
//!
//! Stdout gets the human-readable formatter with source locations; a log file
//! gets one JSON object per line, appended. `RUST_LOG` overrides the level
//! taken from settings.

use crate::config::{LogLevel, LogTarget};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default directive for the given level, e.g. `info` or `debug`.
pub fn default_directive(level: LogLevel) -> String {
    level.as_tracing().to_string().to_lowercase()
}

fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

/// Install the global subscriber. Fails only if the log file cannot be opened;
/// a subscriber that is already installed is left in place.
pub fn init_logging(level: LogLevel, target: &LogTarget) -> io::Result<()> {
    match target {
        LogTarget::Stdout => {
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .try_init();
            if let Err(e) = installed {
                tracing::debug!(error = %e, "subscriber already installed, keeping it");
            }
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let installed = tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(level))
                .with_writer(Mutex::new(file))
                .try_init();
            if let Err(e) = installed {
                tracing::debug!(error = %e, "subscriber already installed, keeping it");
            }
        }
    }
    Ok(())
}
