//! File based diagnostics for filesum.
//!
//! The terminal belongs to the TUI, so tracing output goes to a log file only.
//! The filter comes from `FILESUM_LOG` if set, otherwise from `general.log_level`.

use crate::config::InternalGeneral;

use tracing_subscriber::EnvFilter;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Environment variable holding a tracing filter directive, e.g. `filesum=debug`.
pub const LOG_ENV: &str = "FILESUM_LOG";

/// Installs the global tracing subscriber writing to the configured log file.
///
/// # Returns
/// The log file path, or None when no log file location is known.
pub fn init_logging(general: &InternalGeneral) -> io::Result<Option<PathBuf>> {
    let Some(path) = general.log_file() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("filesum={}", general.log_level())));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))?;

    Ok(Some(path.to_path_buf()))
}
