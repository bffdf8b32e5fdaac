//! Single-line text input dialog.
//!
//! Used by the panel to ask for a preset path. The dialog only edits its buffer and
//! reports when it is done; the nested loop that feeds it keys lives in the terminal module.

use crate::config::Theme;
use crate::core::window::DialogResult;
use crate::ui::widgets::bottom_line;

use crossterm::event::{KeyCode::*, KeyEvent};
use ratatui::{
    Frame,
    layout::Position,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Prompt text plus an editable buffer with a byte-indexed cursor.
#[derive(Debug, Default)]
pub struct InputDialog {
    prompt: String,
    buffer: String,
    cursor: usize,
}

impl InputDialog {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Feeds one key. Returns the result once the dialog is finished.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogResult> {
        match key.code {
            Enter => return Some(DialogResult::Committed(self.buffer.clone())),
            Esc => return Some(DialogResult::Cancelled),
            Left => self.move_cursor_left(),
            Right => self.move_cursor_right(),
            Home => self.cursor = 0,
            End => self.cursor = self.buffer.len(),
            Backspace => self.backspace_at_cursor(),
            Delete => self.delete_at_cursor(),
            Char(c) => self.insert_at_cursor(c),
            _ => {}
        }
        None
    }

    /// Moves the input cursor one character to the left, if possible.
    pub fn move_cursor_left(&mut self) {
        if let Some((prev, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = prev;
        }
    }

    /// Moves the input cursor one character to the right, if possible.
    pub fn move_cursor_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Inserts a character at the current cursor position in the input buffer.
    pub fn insert_at_cursor(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor and moves the cursor back accordingly.
    pub fn backspace_at_cursor(&mut self) {
        if self.cursor > 0
            && let Some((previous, _)) = self.buffer[..self.cursor].char_indices().next_back()
        {
            self.buffer.remove(previous);
            self.cursor = previous;
        }
    }

    /// Deletes the character at the current cursor position in the input buffer.
    pub fn delete_at_cursor(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    /// Draws the prompt on the last row of the frame and places the terminal cursor.
    pub fn draw(&self, frame: &mut Frame, theme: &Theme) {
        let area = bottom_line(frame.area());
        if area.height == 0 {
            return;
        }

        let prompt_w = self.prompt.width();
        let before_cursor = self.buffer[..self.cursor].width();
        let avail = (area.width as usize).saturating_sub(prompt_w + 1);

        // Keep the cursor visible by dropping leading characters of long input.
        let mut start = 0;
        let mut shown_before = before_cursor;
        while shown_before > avail {
            let Some(ch) = self.buffer[start..].chars().next() else {
                break;
            };
            start += ch.len_utf8();
            shown_before = self.buffer[start..self.cursor].width();
        }

        let line = Line::from(vec![
            Span::styled(self.prompt.as_str(), theme.dialog_style()),
            Span::styled(&self.buffer[start..], theme.dialog_style()),
        ]);

        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(line).style(theme.dialog_style()), area);

        let x = area.x + (prompt_w + shown_before).min(area.width.saturating_sub(1) as usize) as u16;
        frame.set_cursor_position(Position::new(x, area.y));
    }
}
