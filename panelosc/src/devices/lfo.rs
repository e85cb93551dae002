use crate::fixedmath::s32_to_float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The host LFO waveforms, by the code the host stores in its panel state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum LfoWave {
    /// Square wave
    #[default]
    Square = 0,
    /// Triangle wave
    Triangle = 1,
    /// Rising-phase, falling-output sawtooth
    Saw = 2,
}

impl LfoWave {
    /// Convert the host's waveform code, if it is a known waveform
    pub const fn new_from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Square),
            1 => Some(Self::Triangle),
            2 => Some(Self::Saw),
            _ => None,
        }
    }
    /// The Q.31 amplitude of this waveform at a raw 32 bit phase
    pub const fn amplitude(&self, phase: u32) -> i32 {
        match self {
            Self::Square => {
                if phase < 0x8000_0000 {
                    0x7fff_ffff
                } else {
                    -0x7fff_ffff
                }
            }
            Self::Triangle => {
                let p = phase as i32;
                (((p ^ (p >> 31)).wrapping_sub(0x4000_0000) as u32) << 1) as i32
            }
            Self::Saw => 0x7fff_ffffu32.wrapping_sub(phase) as i32,
        }
    }
}

impl TryFrom<u32> for LfoWave {
    type Error = &'static str;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new_from_u32(value).ok_or("Invalid LFO Waveform")
    }
}

/// Rebuild the host LFO's output from its raw phase register and waveform
/// code, scaled by `gain`.  Unknown waveform codes produce silence.
pub fn lfo_amplitude(phase: u32, waveform: u32, gain: f32) -> f32 {
    let amplitude = match LfoWave::new_from_u32(waveform) {
        Some(wave) => wave.amplitude(phase),
        None => 0,
    };
    s32_to_float::<31>(amplitude) * gain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_is_bipolar() {
        assert_eq!(LfoWave::Square.amplitude(0), 0x7fff_ffff);
        assert_eq!(LfoWave::Square.amplitude(0x7fff_ffff), 0x7fff_ffff);
        assert_eq!(LfoWave::Square.amplitude(0x8000_0000), -0x7fff_ffff);
        assert_eq!(LfoWave::Square.amplitude(u32::MAX), -0x7fff_ffff);
    }
    #[test]
    fn triangle_shape() {
        let tri = LfoWave::Triangle;
        assert_eq!(tri.amplitude(0), i32::MIN);
        assert_eq!(tri.amplitude(0x4000_0000), 0);
        assert_eq!(tri.amplitude(0x7fff_ffff), 0x7fff_fffe);
        assert_eq!(tri.amplitude(0x8000_0000), 0x7fff_fffe);
        assert_eq!(tri.amplitude(0xbfff_ffff), 0);
        assert_eq!(tri.amplitude(u32::MAX), i32::MIN);
    }
    #[test]
    fn saw_falls() {
        assert_eq!(LfoWave::Saw.amplitude(0), 0x7fff_ffff);
        assert_eq!(LfoWave::Saw.amplitude(0x7fff_ffff), 0);
        assert_eq!(LfoWave::Saw.amplitude(u32::MAX), i32::MIN);
    }
    #[test]
    fn amplitude_is_scaled() {
        assert_eq!(lfo_amplitude(0x8000_0000, 0, 0.5), s32_to_float::<31>(-0x7fff_ffff) * 0.5);
        assert_eq!(lfo_amplitude(0x4000_0000, 1, 1.0), 0.0);
        assert_eq!(lfo_amplitude(0x1234_5678, 3, 1.0), 0.0);
        assert_eq!(lfo_amplitude(0, 2, 0.0), 0.0);
        assert!(LfoWave::try_from(7).is_err());
    }
}
