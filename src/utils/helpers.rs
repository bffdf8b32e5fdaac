//! Helpers for tuneq.
//!
//! Small utilities used across the crate:
//! - Color parsing from strings or hex codes
//! - Home directory lookup and `~` expansion
//! - Opening files and querying their size through expanded paths

use ratatui::style::Color;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Parses a string (color name or hex) into a ratatui::style::color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            if let Some(hex) = s.strip_prefix('#') {
                let expanded = match hex.len() {
                    6 => Some(hex.to_string()),
                    3 => Some(hex.chars().flat_map(|c| [c, c]).collect::<String>()),
                    _ => None,
                };
                if let Some(rgb) = expanded.and_then(|h| u32::from_str_radix(&h, 16).ok()) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

/// Returns the user's home directory, if it can be determined.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` to the home directory.
///
/// `~user` forms are left untouched, as is everything when no home directory is known.
pub fn expand_home_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(trimmed));
    }
    if let Some(rest) = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(trimmed)
}

/// Opens a file for reading after expanding `~`.
pub fn open_file(path: &str) -> io::Result<File> {
    File::open(expand_home_path(path))
}

/// Size of the file at `path` in bytes, or `None` if it cannot be queried.
pub fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len())
}
