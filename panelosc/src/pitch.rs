//! Note number to phase increment conversion.
//!
//! On hardware the host firmware owns this table, so the oscillator only
//! sees it through the [PitchTable] trait.

use crate::context::Context;

#[cfg(feature = "libm")]
use num_traits::Float;

/// Maps a note (integer semitone plus a fine byte in 1/256ths of a
/// semitone) to a per-sample phase increment in `[0, 0.5]`.
///
/// Implementations must be monotonic non-decreasing in `(note, fine)`.
pub trait PitchTable {
    /// The phase increment, in cycles per sample
    fn phase_delta(&self, note: u8, fine: u8) -> f32;
}

/// Twelve-tone equal temperament tuned to A440, at the context's sample rate
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct EqualTemperament {
    context: Context,
}

impl EqualTemperament {
    /// Constructor
    pub const fn new(context: Context) -> Self {
        Self { context }
    }
    /// The processing context this table was built for
    pub const fn context(&self) -> &Context {
        &self.context
    }
    /// Frequency of a fractional MIDI note, in Hz
    pub fn frequency(note: f32) -> f32 {
        #[cfg(feature = "libm")]
        {
            440.0 * Float::exp2((note - 69.0) / 12.0)
        }
        #[cfg(not(feature = "libm"))]
        {
            crate::float_approx::midi_note_to_frequency(note)
        }
    }
}

impl PitchTable for EqualTemperament {
    fn phase_delta(&self, note: u8, fine: u8) -> f32 {
        let note = note as f32 + fine as f32 / 256.0;
        let rate = self.context.sample_rate.period();
        (Self::frequency(note) * rate).clamp(0.0, 0.5)
    }
}
