//! Conversions between IEEE floats and 32 bit fixed point integers.
//!
//! The fractional bit count is a const generic parameter, so every
//! conversion compiles down to a multiply and a float/int cast.  These are
//! the only places in the crate where floats and fixed point values meet, so
//! the rounding and saturation rules here are the rules for the whole crate:
//!
//! * integer to float is an exact linear scale (the integer is rounded to the
//!   nearest float first if it has more than 24 significant bits),
//! * float to integer truncates toward zero,
//! * the saturating variants clamp to the integer range of the output word.

use fixed::types::extra::{LeEqU32, Unsigned};
use fixed::FixedI32;
pub use fixed::types::*;

/// Compile-time checks on a fractional bit count.  Referencing one of these
/// constants with an out of range `F` is a build error.
struct FracBits<const F: u32>;

impl<const F: u32> FracBits<F> {
    const SIGNED: () = assert!(F < i32::BITS, "too many fractional bits for a signed word");
    const UNSIGNED: () = assert!(F <= u32::BITS, "too many fractional bits for an unsigned word");
}

/// `2^fbits` as a float.  Exact for every fbits up to 32.
#[inline(always)]
const fn scale(fbits: u32) -> f32 {
    (1u64 << fbits) as f32
}

/// Convert a signed fixed point integer with `F` fractional bits to a float.
///
/// ```
/// use panelosc::fixedmath::s32_to_float;
/// assert_eq!(s32_to_float::<8>(0x180), 1.5);
/// assert_eq!(s32_to_float::<31>(i32::MIN), -1.0);
/// ```
#[inline(always)]
pub fn s32_to_float<const F: u32>(n: i32) -> f32 {
    let () = FracBits::<F>::SIGNED;
    n as f32 * (1.0 / scale(F))
}

/// Convert an unsigned fixed point integer with `F` fractional bits to a
/// float.
#[inline(always)]
pub fn u32_to_float<const F: u32>(n: u32) -> f32 {
    let () = FracBits::<F>::UNSIGNED;
    n as f32 * (1.0 / scale(F))
}

/// Convert a float to a signed fixed point integer with `F` fractional bits,
/// rounding toward zero.
///
/// The result is unspecified if `n` is outside the representable range.
/// Callers must clamp first, or use [float_to_s32_saturating].
///
/// ```
/// use panelosc::fixedmath::float_to_s32;
/// assert_eq!(float_to_s32::<0>(-10.5), -10);
/// assert_eq!(float_to_s32::<1>(12.5), 25);
/// ```
#[inline(always)]
pub fn float_to_s32<const F: u32>(n: f32) -> i32 {
    let () = FracBits::<F>::SIGNED;
    (n * scale(F)) as i32
}

/// Convert a float to an unsigned fixed point integer with `F` fractional
/// bits, rounding toward zero.
///
/// The result is unspecified if `n` is negative or too large.
#[inline(always)]
pub fn float_to_u32<const F: u32>(n: f32) -> u32 {
    let () = FracBits::<F>::UNSIGNED;
    (n * scale(F)) as u32
}

/// Convert a float to a signed fixed point integer with `F` fractional bits,
/// rounding toward zero and saturating.
///
/// Values at or above `2^(31 - F)` return `i32::MAX`; values at or below
/// `-2^(31 - F)` return `i32::MIN`.  NaN converts to zero.
///
/// ```
/// use panelosc::fixedmath::float_to_s32_saturating;
/// assert_eq!(float_to_s32_saturating::<31>(2.0), i32::MAX);
/// assert_eq!(float_to_s32_saturating::<31>(-2.0), i32::MIN);
/// ```
#[inline]
pub fn float_to_s32_saturating<const F: u32>(n: f32) -> i32 {
    let () = FracBits::<F>::SIGNED;
    detail::saturate_signed(n, F)
}

/// Convert a float to an unsigned fixed point integer with `F` fractional
/// bits, rounding toward zero and saturating.
///
/// Values at or above `2^(32 - F)` return `u32::MAX`; zero, negative values
/// and NaN return zero.
#[inline]
pub fn float_to_u32_saturating<const F: u32>(n: f32) -> u32 {
    let () = FracBits::<F>::UNSIGNED;
    detail::saturate_unsigned(n, F)
}

/// Multiply `x` by `2^y` by adding `y` to the exponent field of `x`.
///
/// No range checks are made.  If the result overflows or underflows the
/// normal float range, or if `x` is zero or subnormal, the result is garbage
/// (not infinity, and not zero).  Only use this where both ranges are known.
///
/// ```
/// use panelosc::fixedmath::scale_by_pow2;
/// assert_eq!(scale_by_pow2(3.0, 4), 48.0);
/// assert_eq!(scale_by_pow2(1.0, -1), 0.5);
/// ```
#[inline(always)]
pub fn scale_by_pow2(x: f32, y: i32) -> f32 {
    f32::from_bits(x.to_bits().wrapping_add((y << 23) as u32))
}

/// Convert a typed signed fixed point number to a float.  Exact when the
/// value has no more than 24 significant bits.
#[inline]
pub fn fixed_to_float<Frac: Unsigned + LeEqU32>(n: FixedI32<Frac>) -> f32 {
    n.to_bits() as f32 * scale_by_pow2(1.0, -(Frac::U32 as i32))
}

/// Convert a float to a typed signed fixed point number, rounding toward
/// zero.  Unspecified when out of range, as for [float_to_s32].
#[inline]
pub fn float_to_fixed<Frac: Unsigned + LeEqU32>(n: f32) -> FixedI32<Frac> {
    FixedI32::<Frac>::from_bits((n * scale(Frac::U32)) as i32)
}

/// Convert a float to a typed signed fixed point number, rounding toward zero
/// and saturating at the type's limits.
///
/// Note that this differs from `FixedI32::saturating_from_num`, which rounds
/// to nearest.
#[inline]
pub fn float_to_fixed_saturating<Frac: Unsigned + LeEqU32>(n: f32) -> FixedI32<Frac> {
    FixedI32::<Frac>::from_bits(detail::saturate_signed(n, Frac::U32))
}

mod detail {
    use super::scale;

    // The boundaries are derived from the word width so they stay correct if
    // the word type ever changes.
    #[inline(always)]
    pub fn saturate_signed(n: f32, fbits: u32) -> i32 {
        let limit = scale(i32::BITS - 1) / scale(fbits);
        if n >= limit {
            i32::MAX
        } else if n <= -limit {
            i32::MIN
        } else {
            (n * scale(fbits)) as i32
        }
    }

    #[inline(always)]
    pub fn saturate_unsigned(n: f32, fbits: u32) -> u32 {
        let limit = scale(u32::BITS) / scale(fbits);
        if n >= limit {
            u32::MAX
        } else if n <= 0.0 {
            0
        } else {
            (n * scale(fbits)) as u32
        }
    }
}
