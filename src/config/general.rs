//! The general configuration settings for filesum.
//!
//! [General] is deserialized from the `[general]` table, [InternalGeneral] is the validated
//! form used at runtime.

use crate::core::walk::WalkOptions;
use crate::utils::{default_log_path, expand_home_path};

use serde::Deserialize;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for the artificial fetch delay.
pub const MAX_FETCH_DELAY_MS: u64 = 10_000;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    require_git: bool,
    global_excludes: bool,
    fetch_delay_ms: u64,
    log_file: Option<PathBuf>,
    log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            require_git: true,
            global_excludes: true,
            fetch_delay_ms: 0,
            log_file: None,
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    walk: WalkOptions,
    fetch_delay: Duration,
    log_file: Option<PathBuf>,
    log_level: String,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let log_level = if g.log_level.trim().is_empty() {
            DEFAULT_LOG_LEVEL.to_string()
        } else {
            g.log_level.trim().to_lowercase()
        };
        Self {
            walk: WalkOptions {
                require_git: g.require_git,
                global_excludes: g.global_excludes,
            },
            fetch_delay: Duration::from_millis(g.fetch_delay_ms.min(MAX_FETCH_DELAY_MS)),
            log_file: g
                .log_file
                .map(|path| expand_home_path(&path))
                .or_else(default_log_path),
            log_level,
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn walk(&self) -> WalkOptions {
        self.walk
    }

    #[inline]
    pub fn fetch_delay(&self) -> Duration {
        self.fetch_delay
    }

    /// Log file path. None when no cache directory could be determined.
    #[inline]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    #[inline]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_clamped_and_level_normalized() -> Result<(), Box<dyn std::error::Error>> {
        let raw: General = toml::from_str(
            r#"
            fetch_delay_ms = 999999
            log_level = " DEBUG "
            require_git = false
            log_file = "/tmp/filesum-test.log"
            "#,
        )?;
        let general = InternalGeneral::from(raw);

        assert_eq!(general.fetch_delay(), Duration::from_millis(MAX_FETCH_DELAY_MS));
        assert_eq!(general.log_level(), "debug");
        assert!(!general.walk().require_git);
        assert!(general.walk().global_excludes);
        assert_eq!(general.log_file(), Some(Path::new("/tmp/filesum-test.log")));
        Ok(())
    }
}
