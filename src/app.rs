//! Application layer of tuneq.
//!
//! - [panel]: the equalizer panel window ([EqPanel]).
//! - [keymap]: parsing of key bindings and the key → action map used by the panel.

pub mod keymap;
pub mod panel;

pub use keymap::{Action, Keymap};
pub use panel::{EqPanel, PanelError, PanelState};
