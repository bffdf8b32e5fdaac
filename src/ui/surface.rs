//! [Surface] implementation on top of a ratatui [Buffer].
//!
//! Windows draw with cursor-addressed primitives in their own coordinates. This adapter
//! translates them into the window's screen area, clips everything outside it and maps
//! [Attr] values to theme styles.

use crate::config::Theme;
use crate::core::window::{Attr, Surface};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    theme: &'a Theme,
    cursor: (u16, u16),
    style: Style,
}

impl<'a> BufferSurface<'a> {
    /// `area` is clipped to the buffer so writes can never land outside it.
    pub fn new(buf: &'a mut Buffer, area: Rect, theme: &'a Theme) -> Self {
        let area = area.intersection(buf.area);
        Self {
            buf,
            area,
            theme,
            cursor: (0, 0),
            style: theme.attr_style(Attr::Normal),
        }
    }

    #[inline]
    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }
}

impl Surface for BufferSurface<'_> {
    fn width(&self) -> u16 {
        self.area.width
    }

    fn height(&self) -> u16 {
        self.area.height
    }

    fn clear(&mut self) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn move_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    fn set_attribute(&mut self, attr: Attr) {
        self.style = self.theme.attr_style(attr);
    }

    fn print_text(&mut self, text: &str) {
        let (mut x, y) = self.cursor;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if y < self.area.height && x + w <= self.area.width {
                let pos = (self.area.x + x, self.area.y + y);
                if let Some(cell) = self.buf.cell_mut(pos) {
                    cell.set_char(ch).set_style(self.style);
                }
            }
            x = x.saturating_add(w);
        }
        self.cursor = (x, y);
    }
}
