//! Seams between windows and the terminal that hosts them.
//!
//! A [Window] is driven by the event loop: it is asked to draw itself onto a [Surface]
//! and receives key presses and left clicks. Sub-widgets that need to take over input
//! (text prompts, help screens) are run through a [Modal], which blocks until the
//! sub-widget is done.

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

/// Enumeration for each individual keypress result processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
}

/// Text attributes a window can request. The surface maps them to theme styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attr {
    #[default]
    Normal,
    Bold,
    Title,
    /// Slider track.
    Slider,
    /// Slider knob.
    Knob,
    /// Scale annotations next to a slider.
    Scale,
}

/// Cursor-addressed drawing primitives in window-local coordinates.
///
/// Writes outside the surface are clipped.
pub trait Surface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    fn clear(&mut self);
    fn move_cursor(&mut self, x: u16, y: u16);
    fn set_attribute(&mut self, attr: Attr);
    /// Prints `text` at the cursor and advances the cursor past it.
    fn print_text(&mut self, text: &str);
}

/// Outcome of a text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Committed(String),
    Cancelled,
}

/// Runs modal sub-widgets in a nested, blocking input loop.
///
/// `backdrop` is redrawn underneath the sub-widget on every frame.
pub trait Modal {
    fn text_input(&mut self, prompt: &str, backdrop: &dyn Window) -> DialogResult;
    fn help(&mut self, backdrop: &dyn Window);
}

/// Message handlers of a window.
pub trait Window {
    /// Screen area the window occupies.
    fn area(&self) -> Rect;
    fn resize(&mut self, area: Rect);
    fn on_display(&self, surface: &mut dyn Surface);
    fn on_key(&mut self, key: KeyEvent, modal: &mut dyn Modal) -> KeypressResult;
    /// Left click at window-local `(x, y)`.
    fn on_mouse_click(&mut self, x: u16, y: u16);
}
