//! Floating point fast approximations used internally by the oscillator
//!
//! Benchmark me!

#[cfg(any(test, doc, not(feature = "libm")))]
mod detail {
    use crate::fixedmath::scale_by_pow2;
    use core::f32::consts::{LN_2, SQRT_2};
    use num_traits::float::FloatCore;

    /// calculate e^x in the range [-0.35, 0.35] using an order 4 Taylor series
    fn exp_approx_small(x: f32) -> f32 {
        // e^x ~= 1 + x + x^2/2! + x^3/3! + x^4/4!
        //     ~= 1 + x * { 1 + x/2 * [ 1 + x/3 * ( 1 + x/4 )]}
        let c_nested = 1.0 + (x / 4.0);
        let b_nested = 1.0 + (x / 3.0) * c_nested;
        let a_nested = 1.0 + (x / 2.0) * b_nested;
        1.0 + x * a_nested
    }

    /// Approximate 2^x.
    ///
    /// The integral part of `x` goes straight into the float exponent, and
    /// the fractional part is offset by one half so the Taylor series only
    /// has to cover `[-ln(2)/2, ln(2)/2)`.  The series underestimates at the
    /// top of that interval and overestimates at the bottom, so the result
    /// is monotonic across integer boundaries.
    ///
    /// `x` must be well inside the normal float exponent range (|x| < 120).
    pub fn exp2_approx(x: f32) -> f32 {
        let floor = FloatCore::floor(x);
        let frac_exp = exp_approx_small((x - floor - 0.5) * LN_2);
        scale_by_pow2(frac_exp * SQRT_2, floor as i32)
    }

    /// Convert a MIDI note number to a frequency in Hz (12TET, A440)
    pub fn midi_note_to_frequency(note: f32) -> f32 {
        440.0 * exp2_approx((note - 69.0) / 12.0)
    }
}

#[cfg(any(test, doc, not(feature = "libm")))]
pub use detail::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::calculate_cents;

    #[test]
    fn exp2_matches_powers_of_two() {
        for i in -20..20 {
            let approx = exp2_approx(i as f32);
            let exact = (2.0f32).powi(i);
            assert!((approx / exact - 1.0).abs() < 1e-4, "2^{} ~= {}", i, approx);
        }
    }
    #[test]
    fn exp2_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=(16 * 1024) {
            let x = (i as f32) / 1024.0 - 8.0;
            let y = exp2_approx(x);
            assert!(y > last, "exp2({}) = {} <= {}", x, y, last);
            last = y;
        }
    }
    #[test]
    fn midi_pitch_calculations_float_approx() {
        for i in 0..=127 {
            let pitch = 440.0 * f32::powf(2.0, ((i - 69) as f32) / 12.0);
            let pitch_approx = midi_note_to_frequency(i as f32);
            let error = calculate_cents(pitch, pitch_approx);
            assert!(error.abs() < 1.0); //less than one cent per note
        }
    }
}
