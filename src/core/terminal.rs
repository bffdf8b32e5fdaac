//! Terminal rendering and event loop for tuneq.
//!
//! Handles setup/teardown of raw mode, alternate screen and mouse capture, redraws,
//! and dispatches events (keypress, left click, resize) to the hosted window.
//! Modal sub-widgets run nested loops on the same terminal through [TerminalModal].

use crate::config::{Config, Keys, Theme};
use crate::core::notify::EqEvent;
use crate::core::window::{DialogResult, KeypressResult, Modal, Window};
use crate::ui::{self, HelpScreen, InputDialog};

use crossbeam_channel::Receiver;
use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use std::{io, time::Duration};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until the window asks to quit.
///
/// Returns an std::io::Error if terminal setup or teardown fails.
pub fn run_terminal(
    window: &mut dyn Window,
    config: &Config,
    events: &Receiver<EqEvent>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, window, config, events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen,
        Show
    )?;
    result
}

/// Main event loop: draws the window, polls for events and dispatches them.
/// Returns on quit.
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    window: &mut dyn Window,
    config: &Config,
    events: &Receiver<EqEvent>,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let theme = config.theme();
    let mut dirty = true;

    loop {
        for event in events.try_iter() {
            log::debug!("equalizer event: {:?}", event);
            dirty = true;
        }

        if dirty {
            terminal.draw(|f| ui::render(f, &*window, theme))?;
            dirty = false;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let mut modal = TerminalModal {
                    terminal: &mut *terminal,
                    theme,
                    keys: config.keys(),
                };
                if window.on_key(key, &mut modal) == KeypressResult::Quit {
                    break;
                }
                dirty = true;
            }

            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let area = window.area();
                if area.contains((mouse.column, mouse.row).into()) {
                    window.on_mouse_click(mouse.column - area.x, mouse.row - area.y);
                    dirty = true;
                }
            }

            Event::Resize(w, h) => {
                window.resize(Rect::new(0, 0, w, h));
                dirty = true;
            }

            _ => {}
        }
    }
    Ok(())
}

/// Runs sub-widgets in a nested blocking loop on the same terminal.
///
/// I/O errors inside a nested loop end the sub-widget as if it had been cancelled.
pub struct TerminalModal<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    theme: &'t Theme,
    keys: &'t Keys,
}

impl<B: Backend> TerminalModal<'_, B>
where
    io::Error: From<<B as Backend>::Error>,
{
    fn run_input(&mut self, prompt: &str, backdrop: &dyn Window) -> io::Result<DialogResult> {
        let theme = self.theme;
        let mut dialog = InputDialog::new(prompt);
        loop {
            self.terminal.draw(|f| {
                ui::render(f, backdrop, theme);
                dialog.draw(f, theme);
            })?;
            if let Some(key) = next_key_press()?
                && let Some(result) = dialog.handle_key(key)
            {
                return Ok(result);
            }
        }
    }

    fn run_help(&mut self, backdrop: &dyn Window) -> io::Result<()> {
        let theme = self.theme;
        let mut help = HelpScreen::new(self.keys);
        loop {
            self.terminal.draw(|f| {
                ui::render(f, backdrop, theme);
                help.draw(f, theme);
            })?;
            if let Some(key) = next_key_press()?
                && help.handle_key(key)
            {
                return Ok(());
            }
        }
    }
}

impl<B: Backend> Modal for TerminalModal<'_, B>
where
    io::Error: From<<B as Backend>::Error>,
{
    fn text_input(&mut self, prompt: &str, backdrop: &dyn Window) -> DialogResult {
        self.run_input(prompt, backdrop).unwrap_or_else(|e| {
            log::warn!("text prompt aborted: {}", e);
            DialogResult::Cancelled
        })
    }

    fn help(&mut self, backdrop: &dyn Window) {
        if let Err(e) = self.run_help(backdrop) {
            log::warn!("help screen aborted: {}", e);
        }
    }
}

/// Blocks for the next terminal event. Anything but a key press yields `None`
/// so the caller redraws (this covers resizes).
fn next_key_press() -> io::Result<Option<KeyEvent>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}
