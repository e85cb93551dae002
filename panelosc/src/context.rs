//! This module provides objects to reason about the processing context.
//! Currently, the only information wrapped is the audio sample rate, which
//! the default pitch table needs to turn notes into phase increments.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// A processing context
pub struct Context {
    /// The sample rate, as one of the supported [SampleRate]s
    pub sample_rate: SampleRate,
}

impl Context {
    /// Create a new context with a sample rate of 48kHz, which is the rate
    /// the supported hosts run their oscillators at
    pub const fn new_480() -> Self {
        Self {
            sample_rate: SampleRate::Khz48_0,
        }
    }
    /// Create a new context with a sample rate of 44.1kHz
    pub const fn new_441() -> Self {
        Self {
            sample_rate: SampleRate::Khz44_1,
        }
    }
    /// Create a processing context if the sample rate provided is a
    /// supported sample rate, or return `None` otherwise.
    pub fn maybe_create(value: u32) -> Option<Self> {
        SampleRate::try_from(value)
            .ok()
            .map(|sample_rate| Self { sample_rate })
    }
    /// The sample rate, in Hz
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate.value()
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// An enum representing all of the supported sample rates
pub enum SampleRate {
    /// 48kHz sample rate
    #[default]
    Khz48_0,
    /// 44.1kHz sample rate
    Khz44_1,
}

impl SampleRate {
    /// Converts this sample rate to an integer number of Hz
    pub const fn value(&self) -> u32 {
        match self {
            Self::Khz48_0 => 48000,
            Self::Khz44_1 => 44100,
        }
    }
    /// The sample period (1 / sample_rate), in seconds
    pub const fn period(&self) -> f32 {
        const RET480: f32 = 1.0 / 48000.0;
        const RET441: f32 = 1.0 / 44100.0;
        match self {
            Self::Khz48_0 => RET480,
            Self::Khz44_1 => RET441,
        }
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = &'static str;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            48000 => Ok(Self::Khz48_0),
            44100 => Ok(Self::Khz44_1),
            _ => Err("Unsupported Sample Rate"),
        }
    }
}
