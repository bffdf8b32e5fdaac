//! Core runtime logic for tuneq.
//!
//! This module contains the non-UI pieces used by the application:
//! - [band]: the band table, gain clamping, value/position maths and slider geometry.
//! - [eqf]: Winamp EQF preset decoding.
//! - [vars]: the typed variable store holding band gains.
//! - [notify]: the "equalizer changed" channel.
//! - [window]: the traits windows and the terminal talk through.
//! - [terminal]: terminal setup/teardown, the main event loop and modal loops.

pub mod band;
pub mod eqf;
pub mod notify;
pub mod terminal;
pub mod vars;
pub mod window;

pub use band::{BANDS, Band, NUM_BANDS, SliderRect, band_keys, set_var};
pub use eqf::{EqfBands, EqfError, load_preset, read_eqf, read_eqf_file};
pub use notify::{EqEvent, EqNotifier};
pub use vars::{StoreError, Var, VarStore, Vars};
pub use window::{Attr, DialogResult, KeypressResult, Modal, Surface, Window};
