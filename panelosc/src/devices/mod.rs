//! This module contains the DSP primitives the oscillator is assembled from.

mod lfo;
mod mixer;
mod osc;

pub use lfo::{lfo_amplitude, LfoWave};
pub use mixer::MixSmoother;
pub use osc::{Oscillator, MAX_MOD_DEPTH};

pub use crate::wavetable::Waveform;

#[cfg(not(feature = "libm"))]
use num_traits::float::FloatCore as NumTraitsFloat;
#[cfg(feature = "libm")]
use num_traits::Float as NumTraitsFloat;

/// Wrap a phase into `[0, 1)`.
///
/// `x - floor(x)` can round up to exactly 1.0 for tiny negative inputs, so
/// that case is folded back to zero.
#[inline(always)]
pub(crate) fn wrap_unit(x: f32) -> f32 {
    let wrapped = x - NumTraitsFloat::floor(x);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::wrap_unit;

    #[test]
    fn wrap_unit_stays_in_range() {
        assert_eq!(wrap_unit(0.25), 0.25);
        assert_eq!(wrap_unit(1.25), 0.25);
        assert_eq!(wrap_unit(-0.75), 0.25);
        assert_eq!(wrap_unit(1.0), 0.0);
        assert_eq!(wrap_unit(-1e-12), 0.0);
        assert_eq!(wrap_unit(0.0), 0.0);
    }
}
