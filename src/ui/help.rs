//! Key binding help overlay.
//!
//! Lists the configured bindings of every panel action in a bordered, scrollable box.

use crate::app::keymap::{Key, key_to_string, parse_key};
use crate::config::{Keys, Theme};
use crate::core::window::Attr;
use crate::ui::widgets::centered_area;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

const TITLE: &str = " Equalizer Help ";
const KEY_COLUMN: usize = 18;

pub struct HelpScreen {
    rows: Vec<(String, &'static str)>,
    close_keys: Vec<Key>,
    scroll: usize,
}

impl HelpScreen {
    pub fn new(keys: &Keys) -> Self {
        let rows = vec![
            (fmt_keys(keys.band_left()), "Select band to the left"),
            (fmt_keys(keys.band_right()), "Select band to the right"),
            (fmt_keys(keys.gain_up()), "Raise gain of selected band"),
            (fmt_keys(keys.gain_down()), "Lower gain of selected band"),
            (fmt_keys(keys.load_preset()), "Load preset from EQF file"),
            (fmt_keys(keys.help()), "Show this help"),
            (fmt_keys(keys.quit()), "Save and close"),
            ("Mouse".to_string(), "Click a slider to set its gain"),
        ];
        // The help binding toggles the overlay off again; quit bindings and Esc also close it.
        let close_keys = keys
            .help()
            .iter()
            .chain(keys.quit())
            .filter_map(|k| parse_key(k))
            .chain(std::iter::once(Key {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
            }))
            .collect();
        Self {
            rows,
            close_keys,
            scroll: 0,
        }
    }

    fn is_close_key(&self, key: KeyEvent) -> bool {
        let pressed = Key {
            code: key.code,
            modifiers: key.modifiers,
        };
        if self.close_keys.contains(&pressed) {
            return true;
        }
        // Terminals report shifted characters like '?' with SHIFT set.
        matches!(key.code, KeyCode::Char(_))
            && key.modifiers == KeyModifiers::SHIFT
            && self.close_keys.contains(&Key {
                code: key.code,
                modifiers: KeyModifiers::NONE,
            })
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(k, d)| (k.as_str(), *d))
    }

    /// Returns `true` when the overlay should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.is_close_key(key) {
            return true;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.scroll + 1 < self.rows.len() {
                    self.scroll += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
        false
    }

    pub fn draw(&self, frame: &mut Frame, theme: &Theme) {
        let area = centered_area(
            frame.area(),
            frame.area().width.saturating_sub(6).clamp(40, 72),
            (self.rows.len() as u16 + 2).min(frame.area().height.saturating_sub(2)),
        );

        let key_style = theme.attr_style(Attr::Knob).add_modifier(Modifier::BOLD);
        let lines: Vec<Line> = self
            .rows
            .iter()
            .skip(self.scroll)
            .map(|(keys, desc)| {
                Line::from(vec![
                    Span::styled(format!("{:<KEY_COLUMN$}", keys), key_style),
                    Span::raw("  "),
                    Span::raw(*desc),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_style())
            .title(Span::styled(TITLE, theme.attr_style(Attr::Title)));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(theme.dialog_style()),
            area,
        );
    }
}

fn fmt_keys(list: &[String]) -> String {
    if list.is_empty() {
        return "-".to_string();
    }
    list.iter()
        .map(|k| parse_key(k).map_or_else(|| k.clone(), |key| key_to_string(&key)))
        .collect::<Vec<_>>()
        .join(", ")
}
