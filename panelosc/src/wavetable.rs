//! Band-limited wavetables, generated at compile time.
//!
//! Every waveform is stored as [BANDS] single-cycle tables of [TABLE_LEN]
//! points (plus one guard point so interpolation never has to wrap).  Band 0
//! holds 64 harmonics, and each band after that holds half as many as the
//! one before it, down to the pure fundamental in band 6.  Lookups
//! interpolate linearly both within a table and between the two bands on
//! either side of the fractional band index.

use core::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of points in one cycle of every table
pub const TABLE_LEN: usize = 256;
/// Number of band-limited versions of each waveform
pub const BANDS: usize = 7;
/// Number of harmonics in the brightest band
pub const MAX_HARMONICS: usize = 1 << (BANDS - 1);
/// The MIDI note at which the brightest band starts fading out.  The lower
/// of the two bands a note reads from never holds a harmonic above
/// `2 * MAX_HARMONICS` times the frequency of this note (about 21.1 kHz),
/// which is below Nyquist at both supported sample rates.
pub const BAND_OFFSET: f32 = 52.0;

type Table = [f32; TABLE_LEN + 1];

/// The waveforms the oscillator can render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Waveform {
    /// Band-limited square wave
    #[default]
    Square = 0,
    /// Band-limited parabolic wave, with a range of `[-0.5, 1]`
    Parabola = 1,
    /// Band-limited rising sawtooth
    Sawtooth = 2,
}

impl Waveform {
    /// Every waveform, in index order
    pub const fn elements() -> &'static [Waveform] {
        &[Self::Square, Self::Parabola, Self::Sawtooth]
    }
    /// Map a host waveform index onto a waveform.  Unknown indices select
    /// the sawtooth, which is what the host panel does with them.
    pub const fn from_index(index: u32) -> Self {
        match index {
            0 => Self::Square,
            1 => Self::Parabola,
            _ => Self::Sawtooth,
        }
    }
    /// A human readable name
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Square => "Square",
            Self::Parabola => "Parabola",
            Self::Sawtooth => "Sawtooth",
        }
    }
    /// Fractional band index for a note, clamped to `[0, BANDS - 1]`.  Every
    /// waveform shares [BAND_OFFSET].
    pub fn band_index(&self, note: f32) -> f32 {
        ((note - BAND_OFFSET) / 12.0).clamp(0.0, (BANDS - 1) as f32)
    }
    fn tables(&self) -> &'static [Table; BANDS] {
        match self {
            Self::Square => &SQUARE,
            Self::Parabola => &PARABOLA,
            Self::Sawtooth => &SAWTOOTH,
        }
    }
    /// Evaluate the waveform at `phase` (in `[0, 1)`) with the fractional
    /// band index `band` (in `[0, BANDS - 1]`, see [Waveform::band_index])
    pub fn eval(&self, phase: f32, band: f32) -> f32 {
        let tables = self.tables();
        let lo = (band as usize).min(BANDS - 1);
        let hi = (lo + 1).min(BANDS - 1);
        let frac = band - lo as f32;
        let a = lookup(&tables[lo], phase);
        let b = lookup(&tables[hi], phase);
        a + (b - a) * frac
    }
}

impl TryFrom<u32> for Waveform {
    type Error = &'static str;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0..=2 => Ok(Self::from_index(value)),
            _ => Err("Invalid Waveform"),
        }
    }
}

impl core::fmt::Display for Waveform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Interpolated table lookup.  `phase` must be in `[0, 1)`.
#[inline(always)]
fn lookup(table: &Table, phase: f32) -> f32 {
    let pos = phase * TABLE_LEN as f32;
    let idx = (pos as usize) & (TABLE_LEN - 1);
    let frac = pos - (pos as usize) as f32;
    table[idx] + (table[idx + 1] - table[idx]) * frac
}

/// Calculate sin(2*pi*phase) for a phase in `[0, 1)`
pub fn sine_unit(phase: f32) -> f32 {
    lookup(&SINE, phase)
}

// std's float functions are not const, so the generators below carry their
// own helpers

const fn factorial(mut x: u64) -> u64 {
    let mut ret = 1;
    while x > 1 {
        ret *= x;
        x -= 1;
    }
    ret
}

const fn float_powi(x: f32, mut n: u64) -> f32 {
    let mut ret = 1f32;
    while n > 0 {
        ret *= x;
        n -= 1;
    }
    ret
}

const fn f_abs(x: f32) -> f32 {
    if x < 0f32 {
        -x
    } else {
        x
    }
}

/// One full cycle of a sine, `SINE[i] = sin(2 * pi * i / TABLE_LEN)`
const SINE: Table = {
    // Taylor series for sin(x), only ever called on the first quadrant
    const fn calc(x: f32) -> f32 {
        const DELTA: f32 = 1f32 / (1 << 24) as f32;
        let mut n = 1u64;
        let mut term = x;
        let mut acc = x;
        while f_abs(term) > DELTA {
            let sign = if n % 2 != 0 { -1f32 } else { 1f32 };
            let exp = 2 * n + 1;
            term = sign * float_powi(x, exp) / factorial(exp) as f32;
            acc += term;
            n += 1;
        }
        acc
    }
    const QUARTER: usize = TABLE_LEN / 4;
    let mut table = [0f32; TABLE_LEN + 1];
    let mut i = 1;
    while i < QUARTER {
        let value = calc(2f32 * PI * (i as f32) / (TABLE_LEN as f32));
        table[i] = value;
        table[2 * QUARTER - i] = value;
        table[2 * QUARTER + i] = -value;
        table[TABLE_LEN - i] = -value;
        i += 1;
    }
    table[QUARTER] = 1f32;
    table[3 * QUARTER] = -1f32;
    table
};

/// Amplitude of harmonic `k` at table point `i`
const fn harmonic(waveform: Waveform, k: usize, i: usize) -> f32 {
    let sin_k = SINE[(k * i) % TABLE_LEN];
    let cos_k = SINE[(k * i + TABLE_LEN / 4) % TABLE_LEN];
    let odd = k % 2 != 0;
    match waveform {
        Waveform::Square => {
            if odd {
                (4f32 / PI) * sin_k / (k as f32)
            } else {
                0f32
            }
        }
        Waveform::Sawtooth => {
            let sign = if odd { 1f32 } else { -1f32 };
            (2f32 / PI) * sign * sin_k / (k as f32)
        }
        Waveform::Parabola => {
            let sign = if odd { -1f32 } else { 1f32 };
            (6f32 / (PI * PI)) * sign * cos_k / ((k * k) as f32)
        }
    }
}

/// Sum the Fourier series once, snapshotting the partial sum into a band
/// every time the harmonic count reaches a power of two.
const fn generate(waveform: Waveform) -> [Table; BANDS] {
    let mut bands = [[0f32; TABLE_LEN + 1]; BANDS];
    let mut i = 0;
    while i < TABLE_LEN {
        let mut acc = 0f32;
        let mut band = BANDS;
        let mut k = 1;
        while k <= MAX_HARMONICS {
            acc += harmonic(waveform, k, i);
            if k.is_power_of_two() {
                band -= 1;
                bands[band][i] = acc;
            }
            k += 1;
        }
        i += 1;
    }
    let mut b = 0;
    while b < BANDS {
        bands[b][TABLE_LEN] = bands[b][0];
        b += 1;
    }
    bands
}

static SQUARE: [Table; BANDS] = generate(Waveform::Square);
static PARABOLA: [Table; BANDS] = generate(Waveform::Parabola);
static SAWTOOTH: [Table; BANDS] = generate(Waveform::Sawtooth);
