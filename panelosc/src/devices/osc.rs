use super::{wrap_unit, Waveform};
use crate::fixedmath::s32_to_float;
use crate::pitch::PitchTable;
use crate::wavetable::sine_unit;
use crate::PitchFxP;

/// Self-phase-modulation depth at full modulation, in cycles
pub const MAX_MOD_DEPTH: f32 = 0.75;

/// Highest accepted pitch, in Q.8 semitones
const MAX_PITCH_BITS: i32 = 0x7fff;

/// A phase-accumulator oscillator rendering band-limited waveforms, with
/// the phase bent by a sine of itself.
///
/// The phase and modulated phase are both kept in `[0, 1)`.  Pitch and band
/// selection are latched per call to [Oscillator::render], so pitch changes
/// take effect at block boundaries.
#[derive(Clone, Default, Debug)]
pub struct Oscillator {
    waveform: Waveform,
    note: f32,
    phase: f32,
    phase_delta: f32,
    modulation: f32,
}

impl Oscillator {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// Select the waveform by host index.  Anything other than 0 (square) or
    /// 1 (parabola) selects the sawtooth.
    pub fn set_waveform(&mut self, index: u32) {
        self.waveform = Waveform::from_index(index);
    }
    /// Set the self-phase-modulation amount, clamped to `[0, 1]`
    pub fn set_modulation(&mut self, depth: f32) {
        self.modulation = depth.clamp(0.0, 1.0);
    }
    /// Set the pitch from a Q.8 note number, clamped to `[0, 0x7fff]`, using
    /// `table` to find the phase increment
    pub fn set_pitch<P: PitchTable>(&mut self, table: &P, pitch: PitchFxP) {
        let bits = pitch.to_bits().clamp(0, MAX_PITCH_BITS);
        self.note = s32_to_float::<8>(bits);
        self.phase_delta = table.phase_delta((bits >> 8) as u8, (bits & 0xff) as u8);
    }
    /// Render `out.len()` samples
    pub fn render(&mut self, out: &mut [f32]) {
        let depth = self.modulation * MAX_MOD_DEPTH;
        let band = self.waveform.band_index(self.note);
        let delta = self.phase_delta;
        let waveform = self.waveform;
        for sample in out.iter_mut() {
            let modulated = wrap_unit(self.phase + depth * sine_unit(self.phase));
            *sample = waveform.eval(modulated, band);
            self.phase = wrap_unit(self.phase + delta);
        }
    }
    /// Return the phase to zero
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
    /// The selected waveform
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
    /// The current note, in semitones
    pub fn note(&self) -> f32 {
        self.note
    }
    /// The current phase, in `[0, 1)`
    pub fn phase(&self) -> f32 {
        self.phase
    }
    /// The phase increment per sample, in `[0, 0.5]`
    pub fn phase_delta(&self) -> f32 {
        self.phase_delta
    }
    /// The modulation amount, in `[0, 1]`
    pub fn modulation(&self) -> f32 {
        self.modulation
    }
}
