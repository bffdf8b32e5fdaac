//! The general configuration settings for tuneq.
//!
//! Defines the [General] struct deserialized from the `[general]` table of tuneq.toml.

use crate::utils::expand_home_path;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Gain change per up/down key press, in dB.
pub const DEFAULT_GAIN_STEP: f32 = 2.0;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    gain_step: f32,
    vars_file: Option<String>,
}

impl Default for General {
    fn default() -> Self {
        General {
            gain_step: DEFAULT_GAIN_STEP,
            vars_file: None,
        }
    }
}

impl General {
    /// Gain step, falling back to the default for non-positive or non-finite values.
    pub fn gain_step(&self) -> f32 {
        if self.gain_step.is_finite() && self.gain_step > 0.0 {
            self.gain_step
        } else {
            eprintln!(
                "[Warning] gain_step={} is not a positive number, using {}",
                self.gain_step, DEFAULT_GAIN_STEP
            );
            DEFAULT_GAIN_STEP
        }
    }

    /// Location of the variable file. Defaults to `vars.toml` next to the config file.
    pub fn vars_path(&self, config_path: &Path) -> PathBuf {
        match &self.vars_file {
            Some(file) if !file.trim().is_empty() => expand_home_path(file),
            _ => config_path
                .parent()
                .map(|dir| dir.join("vars.toml"))
                .unwrap_or_else(|| PathBuf::from("vars.toml")),
        }
    }
}
