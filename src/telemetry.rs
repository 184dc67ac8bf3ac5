//! Tracing initialization.
//!
//! The terminal belongs to the TUI, so events go to
//! `~/.dailychess/dailychess.log`. `DAILYCHESS_LOG` sets the filter
//! (e.g. "debug" or "info,engine=trace").

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DAILYCHESS_LOG";

/// Install the global subscriber writing to `log_path`. Returns false (and
/// leaves logging off) if the file cannot be opened.
pub fn init_tracing(log_path: &Path) -> bool {
    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info,engine=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok()
}
