//! Miscellaneous utility functions for tuneq.
//!
//! - [helpers]: color parsing, home directory expansion and file helpers.
//! - [cli]: command-line flag parsing.
//! - [logging]: the file-backed logger.

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{expand_home_path, file_size, get_home, open_file, parse_color};
