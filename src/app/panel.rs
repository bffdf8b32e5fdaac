//! The equalizer panel.
//!
//! Shows one vertical slider per band, lets the user move the selection and adjust
//! gains from the keyboard or by clicking into a slider, and can pull a whole preset
//! from a Winamp EQF file.
//!
//! Gains are never cached here. Every read and write goes through the injected
//! [VarStore], and every change is announced on the injected [EqNotifier]. Values are
//! saved to disk only when the panel is closed with a quit key.

use crate::app::keymap::{Action, GainAction, Keymap, NavAction, SystemAction};
use crate::config::Config;
use crate::core::band::{
    BANDS, NUM_BANDS, SliderRect, band_keys, position_to_value, set_var, value_to_position,
};
use crate::core::eqf::load_preset;
use crate::core::notify::EqNotifier;
use crate::core::vars::VarStore;
use crate::core::window::{Attr, DialogResult, KeypressResult, Modal, Surface, Window};

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::collections::TryReserveError;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Equalizer";
const PRESET_PROMPT: &str = "Load preset from a Winamp EQF file: ";

const KNOB: &str = "██";
const TRACK: &str = "││";

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("out of memory while creating the equalizer panel")]
    NoMemory(#[from] TryReserveError),
}

/// Lifecycle of the panel. `Closing` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Open,
    Closing,
}

/// Equalizer panel state and its injected collaborators.
#[derive(Debug)]
pub struct EqPanel<S: VarStore> {
    area: Rect,
    selected: usize,
    state: PanelState,
    sliders: Vec<SliderRect>,
    gain_step: f32,
    keymap: Keymap,
    store: S,
    notifier: EqNotifier,
}

impl<S: VarStore> EqPanel<S> {
    /// Creates the panel covering `area` with the first band (the preamp) selected.
    pub fn open(
        area: Rect,
        store: S,
        notifier: EqNotifier,
        config: &Config,
    ) -> Result<Self, PanelError> {
        let mut sliders = Vec::new();
        sliders.try_reserve_exact(NUM_BANDS)?;
        sliders.extend((0..NUM_BANDS).map(SliderRect::for_band));

        log::debug!("equalizer panel opened at {:?}", area);
        Ok(Self {
            area,
            selected: 0,
            state: PanelState::Open,
            sliders,
            gain_step: config.general().gain_step(),
            keymap: Keymap::from_keys(config.keys()),
            store,
            notifier,
        })
    }

    // Getters / accessors

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Current gain of band `index` as held by the store.
    pub fn gain(&self, index: usize) -> Option<f32> {
        BANDS.get(index).map(|b| self.store.get_float(b.key()))
    }

    /// Writes every band gain to durable storage.
    ///
    /// Bands that were never set are saved with the value the store reports for them.
    pub fn save_params(&mut self) {
        let keys = band_keys();
        for key in keys {
            let gain = self.store.get_float(key);
            self.store.set_float(key, gain);
        }
        if let Err(e) = self.store.save_vars(&keys) {
            log::warn!("failed to save equalizer settings: {}", e);
        }
    }

    fn adjust_selected(&mut self, delta: f32) {
        set_var(&mut self.store, self.selected, delta, true);
        self.notifier.changed();
    }

    fn prompt_load_preset(&mut self, modal: &mut dyn Modal) {
        let result = modal.text_input(PRESET_PROMPT, &*self);
        if let DialogResult::Committed(path) = result {
            load_preset(&mut self.store, &self.notifier, path.trim());
        }
    }

    fn close(&mut self) -> KeypressResult {
        self.save_params();
        self.state = PanelState::Closing;
        KeypressResult::Quit
    }

    fn draw_slider(&self, surface: &mut dyn Surface, rect: &SliderRect, index: usize) {
        let x = rect.x + 1;
        let gain = self.store.get_float(BANDS[index].key());
        let pos = value_to_position(gain, rect.h);

        for row in 0..=rect.h {
            surface.move_cursor(x, rect.y + row);
            if i32::from(row) == pos {
                surface.set_attribute(Attr::Knob);
                surface.print_text(KNOB);
            } else {
                surface.set_attribute(Attr::Slider);
                surface.print_text(TRACK);
            }
        }

        surface.move_cursor(rect.x, rect.y + rect.h + 1);
        surface.set_attribute(if index == self.selected {
            Attr::Bold
        } else {
            Attr::Normal
        });
        surface.print_text(BANDS[index].label());
        surface.set_attribute(Attr::Normal);
    }

    fn draw_scale(&self, surface: &mut dyn Surface, rect: &SliderRect) {
        let x = rect.x + 1 + rect.w;
        surface.set_attribute(Attr::Scale);
        for (row, text) in [
            (rect.y, "+20 dB"),
            (rect.y + rect.h / 2, "0 dB"),
            (rect.y + rect.h, "-20 dB"),
        ] {
            surface.move_cursor(x, row);
            surface.print_text(text);
        }
        surface.set_attribute(Attr::Normal);
    }
}

impl<S: VarStore> Window for EqPanel<S> {
    fn area(&self) -> Rect {
        self.area
    }

    fn resize(&mut self, area: Rect) {
        self.area = area;
    }

    fn on_display(&self, surface: &mut dyn Surface) {
        surface.clear();

        let title_x = surface.width().saturating_sub(TITLE.width() as u16) / 2;
        surface.move_cursor(title_x, 0);
        surface.set_attribute(Attr::Title);
        surface.print_text(TITLE);
        surface.set_attribute(Attr::Normal);

        for (i, rect) in self.sliders.iter().enumerate() {
            self.draw_slider(surface, rect, i);
            if i == 0 {
                self.draw_scale(surface, rect);
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent, modal: &mut dyn Modal) -> KeypressResult {
        let Some(action) = self.keymap.lookup(key) else {
            return KeypressResult::Continue;
        };

        match action {
            Action::System(SystemAction::Quit) => return self.close(),
            Action::Nav(NavAction::BandLeft) => {
                self.selected = (self.selected + NUM_BANDS - 1) % NUM_BANDS;
            }
            Action::Nav(NavAction::BandRight) => {
                self.selected = (self.selected + 1) % NUM_BANDS;
            }
            Action::Gain(GainAction::Lower) => self.adjust_selected(-self.gain_step),
            Action::Gain(GainAction::Raise) => self.adjust_selected(self.gain_step),
            Action::System(SystemAction::LoadPreset) => self.prompt_load_preset(modal),
            Action::System(SystemAction::KeyBindHelp) => modal.help(&*self),
        }
        KeypressResult::Consumed
    }

    fn on_mouse_click(&mut self, x: u16, y: u16) {
        let hit = self
            .sliders
            .iter()
            .enumerate()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(i, rect)| (i, *rect));

        if let Some((index, rect)) = hit {
            self.selected = index;
            let gain = position_to_value(i32::from(y - rect.y), rect.h);
            set_var(&mut self.store, index, gain, false);
            self.notifier.changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::eqf::EQF_SIGNATURE;
    use crate::core::notify::EqEvent;
    use crate::core::vars::Vars;

    use crossbeam_channel::Receiver;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use std::error;
    use tempfile::tempdir;

    /// Modal double that answers prompts from a script and counts help runs.
    struct ScriptedModal {
        answer: DialogResult,
        prompts: Vec<String>,
        help_runs: usize,
    }

    impl ScriptedModal {
        fn answering(answer: DialogResult) -> Self {
            Self {
                answer,
                prompts: Vec::new(),
                help_runs: 0,
            }
        }
    }

    impl Modal for ScriptedModal {
        fn text_input(&mut self, prompt: &str, _backdrop: &dyn Window) -> DialogResult {
            self.prompts.push(prompt.to_string());
            self.answer.clone()
        }

        fn help(&mut self, _backdrop: &dyn Window) {
            self.help_runs += 1;
        }
    }

    fn panel_with(store: Vars) -> Result<(EqPanel<Vars>, Receiver<EqEvent>), PanelError> {
        let (notifier, rx) = EqNotifier::channel();
        let panel = EqPanel::open(Rect::new(0, 0, 90, 26), store, notifier, &Config::default())?;
        Ok((panel, rx))
    }

    fn press(panel: &mut EqPanel<Vars>, code: KeyCode) -> KeypressResult {
        let mut modal = ScriptedModal::answering(DialogResult::Cancelled);
        panel.on_key(KeyEvent::new(code, KeyModifiers::NONE), &mut modal)
    }

    fn write_eqf(path: &std::path::Path, bands: [u8; NUM_BANDS]) -> std::io::Result<()> {
        let mut data = Vec::new();
        data.extend_from_slice(EQF_SIGNATURE);
        data.extend_from_slice(b"\x1a!--");
        data.extend_from_slice(&[0u8; 257]);
        data.extend_from_slice(&bands);
        std::fs::write(path, data)
    }

    #[test]
    fn opens_on_preamp() -> Result<(), Box<dyn error::Error>> {
        let (panel, _rx) = panel_with(Vars::in_memory())?;
        assert_eq!(panel.selected(), 0);
        assert_eq!(panel.state(), PanelState::Open);
        Ok(())
    }

    #[test]
    fn right_moves_wrap_modulo_band_count() -> Result<(), Box<dyn error::Error>> {
        for k in 0..30 {
            let (mut panel, _rx) = panel_with(Vars::in_memory())?;
            for _ in 0..k {
                press(&mut panel, KeyCode::Char('l'));
            }
            assert_eq!(panel.selected(), k % NUM_BANDS);
        }
        Ok(())
    }

    #[test]
    fn left_moves_wrap_backwards() -> Result<(), Box<dyn error::Error>> {
        for k in 0..30 {
            let (mut panel, _rx) = panel_with(Vars::in_memory())?;
            for _ in 0..k {
                press(&mut panel, KeyCode::Left);
            }
            assert_eq!(panel.selected(), (NUM_BANDS - k % NUM_BANDS) % NUM_BANDS);
        }
        Ok(())
    }

    #[test]
    fn up_and_down_adjust_selected_band() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, rx) = panel_with(Vars::in_memory())?;
        press(&mut panel, KeyCode::Right);
        press(&mut panel, KeyCode::Char('k'));
        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.gain(1), Some(4.0));

        press(&mut panel, KeyCode::Down);
        assert_eq!(panel.gain(1), Some(2.0));
        assert_eq!(panel.gain(0), Some(0.0));
        assert_eq!(rx.try_iter().count(), 3);
        Ok(())
    }

    #[test]
    fn random_adjustments_stay_in_range() -> Result<(), Box<dyn error::Error>> {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let (mut panel, _rx) = panel_with(Vars::in_memory())?;
        for _ in 0..500 {
            let code = match rng.random_range(0..4) {
                0 => KeyCode::Up,
                1 => KeyCode::Down,
                2 => KeyCode::Left,
                _ => KeyCode::Right,
            };
            press(&mut panel, code);
            for i in 0..NUM_BANDS {
                let gain = panel.gain(i).ok_or("missing band")?;
                assert!((-20.0..=20.0).contains(&gain), "band {} out of range: {}", i, gain);
            }
        }

        for _ in 0..15 {
            press(&mut panel, KeyCode::Up);
        }
        assert_eq!(panel.gain(panel.selected()), Some(20.0));
        Ok(())
    }

    #[test]
    fn quit_saves_band_keys_and_closes() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("vars.toml");
        let mut store = Vars::load(&path);
        store.set_float("volume", 55.0);

        let (mut panel, _rx) = panel_with(store)?;
        press(&mut panel, KeyCode::Up);
        assert_eq!(press(&mut panel, KeyCode::Char('q')), KeypressResult::Quit);
        assert_eq!(panel.state(), PanelState::Closing);

        let saved = Vars::load(&path);
        assert_eq!(saved.get_float("eq-preamp"), 2.0);
        for key in band_keys() {
            assert!(saved.get(key).is_some(), "{} not saved", key);
        }
        assert!(saved.get("volume").is_none());
        Ok(())
    }

    #[test]
    fn adjustments_are_not_saved_before_quit() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("vars.toml");
        let (mut panel, _rx) = panel_with(Vars::load(&path))?;
        press(&mut panel, KeyCode::Up);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn esc_also_quits() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, _rx) = panel_with(Vars::in_memory())?;
        assert_eq!(press(&mut panel, KeyCode::Esc), KeypressResult::Quit);
        Ok(())
    }

    #[test]
    fn unbound_key_is_noop() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, rx) = panel_with(Vars::in_memory())?;
        assert_eq!(press(&mut panel, KeyCode::Char('z')), KeypressResult::Continue);
        assert_eq!(panel.selected(), 0);
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[test]
    fn committed_prompt_loads_preset() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("flat.eqf");
        let mut bands = [0u8; NUM_BANDS];
        bands[10] = 63;
        write_eqf(&path, bands)?;

        let (mut panel, rx) = panel_with(Vars::in_memory())?;
        let path_str = path.to_str().ok_or("temp path not valid UTF-8")?;
        let mut modal = ScriptedModal::answering(DialogResult::Committed(path_str.to_string()));
        panel.on_key(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
            &mut modal,
        );

        assert_eq!(modal.prompts, vec![PRESET_PROMPT.to_string()]);
        assert_eq!(panel.gain(0), Some(-20.0));
        for i in 1..NUM_BANDS {
            assert_eq!(panel.gain(i), Some(20.0));
        }
        assert_eq!(rx.try_recv(), Ok(EqEvent::Changed));
        Ok(())
    }

    #[test]
    fn cancelled_prompt_changes_nothing() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, rx) = panel_with(Vars::in_memory())?;
        press(&mut panel, KeyCode::Char('p'));
        assert!(rx.try_recv().is_err());
        assert_eq!(panel.gain(0), Some(0.0));
        Ok(())
    }

    #[test]
    fn bad_preset_leaves_values_and_stays_silent() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.eqf");
        std::fs::write(&path, vec![b'x'; 400])?;

        let mut store = Vars::in_memory();
        store.set_float("eq-band4", 6.0);
        let (mut panel, rx) = panel_with(store)?;
        let path_str = path.to_str().ok_or("temp path not valid UTF-8")?;
        let mut modal = ScriptedModal::answering(DialogResult::Committed(path_str.to_string()));
        panel.on_key(
            KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE),
            &mut modal,
        );

        assert_eq!(panel.gain(4), Some(6.0));
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[test]
    fn help_key_runs_help_once() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, _rx) = panel_with(Vars::in_memory())?;
        let mut modal = ScriptedModal::answering(DialogResult::Cancelled);
        let result = panel.on_key(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT),
            &mut modal,
        );
        assert_eq!(result, KeypressResult::Consumed);
        assert_eq!(modal.help_runs, 1);
        Ok(())
    }

    #[test]
    fn click_on_slider_corner_selects_and_sets_top_value() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, rx) = panel_with(Vars::in_memory())?;
        let rect = SliderRect::for_band(3);
        panel.on_mouse_click(rect.x, rect.y);
        assert_eq!(panel.selected(), 3);
        assert_eq!(panel.gain(3), Some(position_to_value(0, 20)));
        assert_eq!(panel.gain(3), Some(20.0));
        assert_eq!(rx.try_recv(), Ok(EqEvent::Changed));
        Ok(())
    }

    #[test]
    fn click_on_left_edge_selects_that_band() -> Result<(), Box<dyn error::Error>> {
        for band in 1..NUM_BANDS {
            let (mut panel, _rx) = panel_with(Vars::in_memory())?;
            let rect = SliderRect::for_band(band);
            panel.on_mouse_click(rect.x, rect.y + rect.h);
            assert_eq!(panel.selected(), band);
            assert_eq!(panel.gain(band), Some(-20.0));
            for other in (0..NUM_BANDS).filter(|&o| o != band) {
                assert_eq!(panel.gain(other), Some(0.0));
            }
        }
        Ok(())
    }

    #[test]
    fn click_uses_vertical_offset() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, _rx) = panel_with(Vars::in_memory())?;
        let rect = SliderRect::for_band(10);
        panel.on_mouse_click(rect.x + rect.w - 1, rect.y + 15);
        assert_eq!(panel.selected(), 10);
        assert_eq!(panel.gain(10), Some(-10.0));
        Ok(())
    }

    #[test]
    fn click_outside_sliders_is_noop() -> Result<(), Box<dyn error::Error>> {
        let (mut panel, rx) = panel_with(Vars::in_memory())?;
        panel.on_mouse_click(0, 0);
        panel.on_mouse_click(12, 10);
        panel.on_mouse_click(30, 23);
        assert_eq!(panel.selected(), 0);
        assert!(rx.try_recv().is_err());
        for i in 0..NUM_BANDS {
            assert_eq!(panel.gain(i), Some(0.0));
        }
        Ok(())
    }
}
