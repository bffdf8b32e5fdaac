//! Equalizer band table and slider maths.
//!
//! Holds the eleven fixed bands (preamp + ten frequency bands), the conversion between
//! a gain in dB and a slider row, and the slider rectangles used both for drawing and
//! for mouse hit-testing.

use crate::core::vars::VarStore;

/// Number of bands shown by the panel: the preamp plus ten frequency bands.
pub const NUM_BANDS: usize = 11;

/// Lowest gain a band can hold through [set_var].
pub const GAIN_MIN: f32 = -20.0;
/// Highest gain a band can hold through [set_var].
pub const GAIN_MAX: f32 = 20.0;

/// Slider height in rows, excluding the knob row at the bottom edge.
pub const SLIDER_HEIGHT: u16 = 20;
/// Width of the clickable slider column.
pub const SLIDER_WIDTH: u16 = 6;
/// First row of every slider.
pub const SLIDER_TOP: u16 = 2;
/// Extra columns between the preamp and the first frequency band.
pub const PREAMP_GAP: u16 = 10;

/// One adjustable gain control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    key: &'static str,
    label: &'static str,
}

impl Band {
    /// Key the gain is stored under.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Short label drawn under the slider.
    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

/// All bands in screen order. Index 0 is the preamp.
#[rustfmt::skip]
pub const BANDS: [Band; NUM_BANDS] = [
    Band { key: "eq-preamp", label: "PREAMP" },
    Band { key: "eq-band1",  label: "60HZ" },
    Band { key: "eq-band2",  label: "170HZ" },
    Band { key: "eq-band3",  label: "310HZ" },
    Band { key: "eq-band4",  label: "600HZ" },
    Band { key: "eq-band5",  label: "1KHZ" },
    Band { key: "eq-band6",  label: "3KHZ" },
    Band { key: "eq-band7",  label: "6KHZ" },
    Band { key: "eq-band8",  label: "12KHZ" },
    Band { key: "eq-band9",  label: "14KHZ" },
    Band { key: "eq-band10", label: "16KHZ" },
];

/// Store keys of every band, in band order.
pub fn band_keys() -> [&'static str; NUM_BANDS] {
    BANDS.map(|b| b.key)
}

/// Rectangle a slider occupies, in panel-local cells.
///
/// Rows are inclusive (`y..=y + h`, the knob can sit on the bottom row). Columns are
/// half-open (`x..x + w`), so the column where one frequency slider ends and the next
/// begins belongs to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl SliderRect {
    /// Geometry of the slider for band `index`.
    pub fn for_band(index: usize) -> Self {
        let mut x = 2 + index as u16 * SLIDER_WIDTH;
        if index > 0 {
            x += PREAMP_GAP;
        }
        Self {
            x,
            y: SLIDER_TOP,
            w: SLIDER_WIDTH,
            h: SLIDER_HEIGHT,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.w && y <= self.y + self.h
    }
}

/// Maps a gain to a slider row, `0` being the top (+20 dB).
///
/// The result is truncated, so any value inside the domain lands on `0..=height`.
pub fn value_to_position(val: f32, height: u16) -> i32 {
    (((-val) + 20.0) * height as f32 / 40.0) as i32
}

/// Maps a slider row back to a gain.
pub fn position_to_value(pos: i32, height: u16) -> f32 {
    20.0 - (pos as f32 * 40.0 / height as f32)
}

/// Clamps a gain into [GAIN_MIN, GAIN_MAX].
#[inline]
pub fn clamp_gain(val: f32) -> f32 {
    val.clamp(GAIN_MIN, GAIN_MAX)
}

/// Updates the gain of band `index` in the store.
///
/// With `relative` the current stored value is read and `val` is added to it, otherwise
/// `val` replaces it. The result is always clamped before it is written back.
pub fn set_var(store: &mut dyn VarStore, index: usize, val: f32, relative: bool) {
    let Some(band) = BANDS.get(index) else {
        return;
    };

    let new_val = if relative {
        store.get_float(band.key) + val
    } else {
        val
    };
    store.set_float(band.key, clamp_gain(new_val));
}
