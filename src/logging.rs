//! Logging setup.
//!
//! Events go through `tracing`; the subscriber is installed once by the
//! binary. `MASTERY_LOG` takes precedence over the verbosity flag.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "MASTERY_LOG";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// No subscriber; used by the terminal browser when no log file is set
    Off,
}

impl LogTarget {
    /// CLI commands log to stderr. The browser owns the screen, so it logs
    /// to a file or nowhere.
    pub fn select(interactive: bool, log_file: Option<&Path>) -> Self {
        match (log_file, interactive) {
            (Some(path), _) => LogTarget::File(path.to_path_buf()),
            (None, false) => LogTarget::Stderr,
            (None, true) => LogTarget::Off,
        }
    }
}

/// Maps `-v` count to a tracing directive.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"`
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Uses `try_init()`, so a second call is a no-op.
pub fn init_logging(verbosity: u8, target: &LogTarget) -> io::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));
    let show_target = verbosity >= 2;

    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let use_ansi =
                io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi)
                .with_target(show_target)
                .with_writer(io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(show_target)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }

    Ok(())
}
