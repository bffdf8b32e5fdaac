//! Winamp EQF preset decoding.
//!
//! Layout of the files this module reads:
//!
//! ```text
//! 0..31    header, first 27 bytes must be "Winamp EQ library file v1.1"
//! 31..288  preset name, skipped
//! 288..299 band bytes: [0..10] = band1..band10, [10] = preamp
//! ```
//!
//! Anything past the first preset is ignored.

use crate::core::band::{BANDS, NUM_BANDS};
use crate::core::notify::EqNotifier;
use crate::core::vars::VarStore;
use crate::utils::{expand_home_path, file_size, open_file};

use std::io::{self, Read, Seek, SeekFrom};
use thiserror::Error;

/// Signature every EQF file starts with.
pub const EQF_SIGNATURE: &[u8; 27] = b"Winamp EQ library file v1.1";
/// Bytes read as the header. Only the first 27 are compared.
pub const EQF_HEADER_LEN: usize = 31;
/// Length of the preset name field following the header.
pub const EQF_NAME_LEN: i64 = 257;

#[derive(Debug, Error)]
pub enum EqfError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("not a Winamp EQ library file")]
    BadSignature,
    #[error("file ends before the {0}")]
    Truncated(&'static str),
}

/// Raw band bytes of one preset, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqfBands([u8; NUM_BANDS]);

impl EqfBands {
    pub fn from_bytes(bytes: [u8; NUM_BANDS]) -> Self {
        Self(bytes)
    }

    /// Preamp gain in dB. The preamp byte uses 63 steps, the frequency bands 64.
    pub fn preamp_gain(&self) -> f32 {
        (20.0 - (self.0[10] as f64 * 40.0) / 63.0) as f32
    }

    /// Gain of frequency band `band` (0-based, so `0` is `eq-band1`).
    pub fn band_gain(&self, band: usize) -> f32 {
        (20.0 - (self.0[band] as f64 * 40.0) / 64.0) as f32
    }

    /// Gains in panel order: preamp first, then bands 1 to 10.
    pub fn gains(&self) -> [f32; NUM_BANDS] {
        let mut out = [0.0; NUM_BANDS];
        out[0] = self.preamp_gain();
        for (i, gain) in out.iter_mut().enumerate().skip(1) {
            *gain = self.band_gain(i - 1);
        }
        out
    }
}

/// Reads the band bytes of an EQF file.
pub fn read_eqf<R: Read + Seek>(reader: &mut R) -> Result<EqfBands, EqfError> {
    let mut header = [0u8; EQF_HEADER_LEN];
    read_full(reader, &mut header, "end of the header")?;
    if &header[..EQF_SIGNATURE.len()] != EQF_SIGNATURE {
        return Err(EqfError::BadSignature);
    }

    reader.seek(SeekFrom::Current(EQF_NAME_LEN))?;

    let mut bands = [0u8; NUM_BANDS];
    read_full(reader, &mut bands, "band values")?;
    Ok(EqfBands(bands))
}

/// Opens `path` (with `~` expansion) and decodes it.
pub fn read_eqf_file(path: &str) -> Result<EqfBands, EqfError> {
    let mut file = open_file(path)?;
    read_eqf(&mut file)
}

/// Writes decoded gains straight into the store and signals the change.
///
/// Values are not clamped: a preset byte beyond 63/64 steps yields a gain below -20 dB.
pub fn apply_eqf(store: &mut dyn VarStore, notifier: &EqNotifier, bands: &EqfBands) {
    for (band, gain) in BANDS.iter().zip(bands.gains()) {
        store.set_float(band.key(), gain);
    }
    notifier.changed();
}

/// Loads a preset from `path` into the store.
///
/// Best effort: any failure leaves the store untouched, sends no notification and is only
/// reported through the debug log.
pub fn load_preset(store: &mut dyn VarStore, notifier: &EqNotifier, path: &str) {
    match read_eqf_file(path) {
        Ok(bands) => {
            apply_eqf(store, notifier, &bands);
            log::info!("loaded EQF preset {:?}", path);
        }
        Err(e) => {
            log::debug!(
                "ignoring EQF preset {:?} ({:?} bytes): {}",
                path,
                file_size(&expand_home_path(path)),
                e
            );
        }
    }
}

fn read_full<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<(), EqfError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => EqfError::Truncated(what),
        _ => EqfError::Io(e),
    })
}
