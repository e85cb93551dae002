//! This crate contains all of the logic for a user oscillator that plays the
//! host synthesizer's own panel.  Two band-limited oscillators take their
//! pitch, waveform and self-phase-modulation depth straight from the host's
//! VCO controls, which are read out of the host firmware's RAM, and are
//! cross-faded by the shape knob plus the host's LFO.
//!
//! The crate is `no_std` and never allocates.  Reading host memory is only
//! trusted after the firmware image has been fingerprinted (see [panel]);
//! otherwise the oscillator plays from a neutral fallback image.
//!
//! Floats are used for all of the signal processing.  Values crossing the
//! host boundary are fixed point, and all conversions between the two go
//! through [fixedmath].  As in the host SDK, fixed point aliases carry an
//! FxP suffix.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod fixedmath;
mod float_approx;
#[cfg(test)]
mod util;

/// True if using libm for floating-point math, false if using internal
/// approximation functions
pub const USE_LIBM: bool = cfg!(feature = "libm");

pub mod context;
pub mod devices;
pub mod panel;
pub mod pitch;
pub mod synth;
pub mod voiceid;
pub mod wavetable;

/// A note number, in semitones with 8 fractional bits.  This is the pitch
/// format the host passes to the oscillator.
pub type PitchFxP = fixedmath::I24F8;
/// A host VCO shape value, `[0, 0x2000]` maps to `[0, 1]`
pub type ShapeFxP = fixedmath::U19F13;
/// A 10 bit host parameter value, `[0, 0x3ff]` maps to `[0, 1)`
pub type ParamFxP = fixedmath::U22F10;
/// An output sample in `[-1, 1)`
pub type OutputFxP = fixedmath::I1F31;

/// The largest block the host asks for, in frames
pub const MAX_FRAMES: usize = 64;

pub use context::{Context, SampleRate};
pub use devices::Oscillator;
pub use panel::{Compatibility, HostPlatform, MinilogueXd, Panel, Prologue, Unsupported};
pub use pitch::{EqualTemperament, PitchTable};
pub use synth::Synth;
pub use voiceid::VoiceId;
pub use wavetable::Waveform;
