//! The main config loading module for tuneq.
//!
//! Handles loading and deserializing settings from `tuneq.toml`.
//!
//! Provides the main [Config] struct, the [RawConfig] used for parsing, and default config
//! generation for `tq --init`.

use crate::config::{General, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file and then converted into [Config].
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    theme: Theme,
    keys: Keys,
}

/// Main configuration struct for tuneq
#[derive(Debug)]
pub struct Config {
    general: General,
    theme: Theme,
    keys: Keys,
    path: PathBuf,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            theme: raw.theme,
            keys: raw.keys,
            path: Self::default_path(),
        }
    }
}

/// Public methods for loading and accessing the configuration
impl Config {
    /// Load configuration from the default path
    /// If the file does not exist or fails to parse, returns the default configuration.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from `path`, falling back to defaults the same way as [Config::load].
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            eprintln!(
                "No tuneq.toml config file found. Using internal defaults. (Tip: run 'tq --init' to generate a config file.)"
            );
            return Self::with_path(RawConfig::default(), path);
        }

        let raw = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => raw,
                Err(e) => {
                    eprintln!("Error parsing config: {}", e);
                    RawConfig::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config {:?}: {}", path, e);
                RawConfig::default()
            }
        };
        Self::with_path(raw, path)
    }

    fn with_path(raw: RawConfig, path: &Path) -> Self {
        let mut config = Config::from(raw);
        config.path = path.to_path_buf();
        config
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Path the configuration was loaded from (or would have been).
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the variable store holding the band gains.
    pub fn vars_path(&self) -> PathBuf {
        self.general.vars_path(&self.path)
    }

    /// Determine the default configuration file path.
    /// Checks the TUNEQ_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/tuneq/tuneq.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("TUNEQ_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("tuneq/tuneq.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/tuneq/tuneq.toml");
        }
        PathBuf::from("tuneq.toml")
    }

    /// Generate a default configuration file at the specified path.
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
        Config::from(RawConfig::default())
    }
}

const DEFAULT_TOML: &str = r##"# tuneq.toml - default configuration for tuneq

# Note:
# Commented values are the internal defaults of tuneq
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
# gain_step = 2.0
# vars_file = "~/.config/tuneq/vars.toml"

[theme]
# title.fg = "default"
# slider.fg = "default"
# knob.fg = "cyan"
# label.fg = "default"
# selected.fg = "yellow"
# scale.fg = "darkgray"
# dialog.fg = "default"
# border.fg = "default"

[keys]
# quit = ["q", "Esc"]
# band_left = ["h", "Left"]
# band_right = ["l", "Right"]
# gain_down = ["j", "Down"]
# gain_up = ["k", "Up"]
# load_preset = ["p"]
# help = ["?"]
"##;
