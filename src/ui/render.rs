//! Top-level render entry point used by the terminal loop.
//!
//! Windows draw themselves through the [Surface](crate::core::window::Surface) trait; this
//! module hands them a [BufferSurface] over the frame, clipped to the window's area.

use crate::config::Theme;
use crate::core::window::Window;
use crate::ui::surface::BufferSurface;

use ratatui::Frame;

/// Renders `window` into the current frame.
pub fn render(frame: &mut Frame, window: &dyn Window, theme: &Theme) {
    let area = window.area().intersection(frame.area());
    let mut surface = BufferSurface::new(frame.buffer_mut(), area, theme);
    window.on_display(&mut surface);
}
