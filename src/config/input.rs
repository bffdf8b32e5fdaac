//! Input configuration options for tuneq
//!
//! This module defines the key bindings of the equalizer panel which are read from the
//! tuneq.toml configuration file.

use serde::Deserialize;

/// Input configuration options of all panel actions
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    quit: Vec<String>,
    band_left: Vec<String>,
    band_right: Vec<String>,
    gain_down: Vec<String>,
    gain_up: Vec<String>,
    load_preset: Vec<String>,
    help: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    quit,
    band_left,
    band_right,
    gain_down,
    gain_up,
    load_preset,
    help,
);

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            quit: vec!["q".into(), "Esc".into()],
            band_left: vec!["h".into(), "Left".into()],
            band_right: vec!["l".into(), "Right".into()],
            gain_down: vec!["j".into(), "Down".into()],
            gain_up: vec!["k".into(), "Up".into()],
            load_preset: vec!["p".into()],
            help: vec!["?".into()],
        }
    }
}
