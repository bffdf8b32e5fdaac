//! Theme configuration options for tuneq
//!
//! This module defines the colors of the equalizer panel and its dialogs, read from the
//! `[theme]` table of tuneq.toml.

use crate::core::Attr;
use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// knob.fg = "cyan"
/// selected.fg = "#ffcc00"
/// ```
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Theme {
    title: ColorPair,
    slider: ColorPair,
    knob: ColorPair,
    label: ColorPair,
    selected: ColorPair,
    scale: ColorPair,
    dialog: ColorPair,
    border: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: ColorPair::default(),
            slider: ColorPair::default(),
            knob: ColorPair {
                fg: Color::Cyan,
                ..ColorPair::default()
            },
            label: ColorPair::default(),
            selected: ColorPair {
                fg: Color::Yellow,
                ..ColorPair::default()
            },
            scale: ColorPair {
                fg: Color::DarkGray,
                ..ColorPair::default()
            },
            dialog: ColorPair::default(),
            border: ColorPair::default(),
        }
    }
}

impl Theme {
    /// Resolves a panel text attribute to a concrete style.
    pub fn attr_style(&self, attr: Attr) -> Style {
        match attr {
            Attr::Normal => self.label.as_style(),
            Attr::Bold => self.selected.as_style().add_modifier(Modifier::BOLD),
            Attr::Title => self.title.as_style().add_modifier(Modifier::BOLD),
            Attr::Slider => self.slider.as_style(),
            Attr::Knob => self.knob.as_style().add_modifier(Modifier::BOLD),
            Attr::Scale => self.scale.as_style(),
        }
    }

    #[inline]
    pub fn dialog_style(&self) -> Style {
        self.dialog.as_style()
    }

    #[inline]
    pub fn border_style(&self) -> Style {
        self.border.as_style()
    }
}

/// ColorPair struct to hold foreground and background colors.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub fn as_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
