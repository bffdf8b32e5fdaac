//! Rendering layer of tuneq.
//!
//! - [surface]: the [Surface](crate::core::window::Surface) adapter over a ratatui buffer.
//! - [render]: draws a window into a frame.
//! - [input]: the single-line prompt used for the preset path.
//! - [help]: the key binding overlay.

pub mod help;
pub mod input;
pub mod render;
pub mod surface;
pub mod widgets;

pub use help::HelpScreen;
pub use input::InputDialog;
pub use render::render;
pub use surface::BufferSurface;
