//! The main config loading module for filesum.
//!
//! Handles loading and deserializing settings from `filesum.toml`.
//!
//! [RawConfig] is what the toml file deserializes into, [Config] is the processed form the
//! rest of the crate reads. A missing or broken file is never fatal: filesum falls back to
//! internal defaults and says so on stderr before the terminal is taken over.

use crate::config::{Display, General, InternalGeneral, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FILESUM_CONFIG";

/// Raw configuration as read from the toml file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    display: Display,
    theme: Theme,
    keys: Keys,
}

/// Processed configuration used by filesum.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    display: Display,
    theme: Theme,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            display: raw.display,
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// Called by the entry point at startup, before the terminal enters raw mode.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "[filesum] Error reading config {}: {}. Using internal defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load and parse the config file at `path`.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let raw = toml::from_str::<RawConfig>(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(raw.into())
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the configuration file path.
    /// Checks the FILESUM_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/filesum/filesum.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("filesum/filesum.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/filesum/filesum.toml");
        }
        PathBuf::from("filesum.toml")
    }

    /// Write the default configuration file to `path`.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# filesum.toml - default configuration for filesum
#
# Commented values are the internal defaults.
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan").

[general]
# Refuse to start outside a git project.
# require_git = true
# Honor the global git excludes file (core.excludesFile).
# global_excludes = true
# Sleep before each size fetch, in milliseconds (max 10000).
# fetch_delay_ms = 0
# Diagnostics never go to the terminal. Defaults to the user cache directory.
# log_file = "~/.cache/filesum/filesum.log"
# log_level = "info"

[display]
# title = "Git Project Files Summarizer"
# "binary" (KiB, MiB) or "decimal" (kB, MB)
# size_units = "binary"
# selection_marker = true
# scroll_padding = 3
# status_line = true

# [theme]
# selection_icon = "> "
# title.fg = "#FFFDF5"
# title.bg = "#25A065"
# selection.bg = "default"
# accent.fg = "default"
# entry.fg = "default"
# subtitle.fg = "darkgray"
# fetching.fg = "yellow"
# error.fg = "red"
# filter.fg = "cyan"
# status_line.fg = "default"

# [keys]
# fetch = ["Enter"]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_to_top = ["g", "Home"]
# go_to_bottom = ["Shift+g", "End"]
# page_up = ["PageUp", "<c-u>"]
# page_down = ["PageDown", "<c-d>"]
# filter = ["/"]
# clear_filter = ["Ctrl+f"]
# keybind_help = ["?"]
# quit = ["q", "Ctrl+c"]
"##;

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::formatter::SizeUnits;
    use tempfile::tempdir;

    #[test]
    fn default_file_parses_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let raw: RawConfig = toml::from_str(DEFAULT_TOML)?;
        let config = Config::from(raw);
        assert_eq!(config.display().size_units(), SizeUnits::Binary);
        assert_eq!(config.keys().fetch(), ["Enter".to_string()]);
        Ok(())
    }

    #[test]
    fn generate_then_load_and_refuse_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/filesum.toml");

        Config::generate_default(&path)?;
        let config = Config::load_from(&path)?;
        assert!(config.general().walk().require_git);

        let err = Config::generate_default(&path).err().ok_or("overwrite was allowed")?;
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }

    #[test]
    fn invalid_toml_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("filesum.toml");
        fs::write(&path, "[display]\nsize_units = \"parsecs\"\n")?;

        let err = Config::load_from(&path).err().ok_or("invalid config accepted")?;
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        Ok(())
    }
}
