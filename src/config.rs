//! Configuration for tuneq.
//!
//! - [load]: reading `tuneq.toml` into [Config], default paths, `--init` generation.
//! - [general]: the `[general]` table (gain step, variable file location).
//! - [theme]: the `[theme]` table.
//! - [input]: the `[keys]` table of key bindings.

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::General;
pub use input::Keys;
pub use load::{Config, RawConfig};
pub use theme::Theme;
