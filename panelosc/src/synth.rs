//! The complete oscillator: two self-phase-modulated oscillators whose pitch,
//! waveform and modulation depth come from the host's own VCO controls,
//! cross-faded by the shape knob and the host LFO.

use crate::devices::{lfo_amplitude, MixSmoother, Oscillator};
use crate::fixedmath::{extra::U31, float_to_fixed_saturating, u32_to_float};
use crate::panel::{HostPlatform, Panel};
use crate::pitch::{EqualTemperament, PitchTable};
use crate::voiceid::VoiceId;
use crate::{OutputFxP, PitchFxP, MAX_FRAMES};
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The user parameters the synth responds to, by host parameter index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u16)]
pub enum OscParam {
    /// The shape knob: base cross-fade between the two oscillators
    Shape = 6,
    /// The shifted shape knob: LFO depth on the cross-fade
    ShiftShape = 7,
}

impl TryFrom<u16> for OscParam {
    type Error = &'static str;
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Self::Shape),
            7 => Ok(Self::ShiftShape),
            _ => Err("Unknown Oscillator Parameter"),
        }
    }
}

/// Largest 10 bit parameter value
const PARAM_MAX: u16 = 0x3ff;

/// The synth context.  The host calls [Synth::param_change] and
/// [Synth::render_block] from a single execution context, never
/// concurrently.
pub struct Synth<'h, H: HostPlatform, P: PitchTable = EqualTemperament> {
    panel: Panel<'h, H>,
    osc: [Oscillator; 2],
    table: P,
    detune: i32,
    shape: f32,
    shift_shape: f32,
    mixer: MixSmoother,
    buffers: [[f32; MAX_FRAMES]; 2],
}

impl<'h, H: HostPlatform, P: PitchTable> Synth<'h, H, P> {
    /// Constructor.  `voice` decides the fixed detune between the two
    /// oscillators.
    pub fn new(panel: Panel<'h, H>, table: P, voice: VoiceId) -> Self {
        let detune = voice.detune();
        debug!(
            "synth: voice {:#010x}, detune {}, panel {:?}",
            voice.hash(),
            detune,
            panel.compatibility()
        );
        Self {
            panel,
            osc: Default::default(),
            table,
            detune,
            shape: 0.0,
            shift_shape: 0.0,
            mixer: MixSmoother::new(),
            buffers: [[0.0; MAX_FRAMES]; 2],
        }
    }
    /// Handle a host parameter change.  `value` is a 10 bit code and is
    /// clamped to `0x3ff`; unknown parameters are ignored.
    pub fn param_change(&mut self, index: u16, value: u16) {
        let value = u32_to_float::<10>(value.min(PARAM_MAX) as u32);
        match OscParam::try_from(index) {
            Ok(OscParam::Shape) => self.shape = value,
            Ok(OscParam::ShiftShape) => self.shift_shape = value,
            Err(_) => {}
        }
    }
    /// Render one block of Q.31 samples at a Q.8 note pitch.
    ///
    /// At most [MAX_FRAMES] frames can be rendered per block.  Longer output
    /// buffers are a bug in the caller: debug builds panic, release builds
    /// fill the excess with silence.
    pub fn render_block(&mut self, pitch: PitchFxP, out: &mut [OutputFxP]) {
        debug_assert!(
            out.len() <= MAX_FRAMES,
            "{} frames requested, at most {} supported",
            out.len(),
            MAX_FRAMES
        );
        let frames = out.len().min(MAX_FRAMES);
        let (out, overflow) = out.split_at_mut(frames);
        overflow.fill(OutputFxP::ZERO);

        let base = pitch.to_bits();
        let pitches = [
            base.saturating_add(self.detune),
            base.saturating_sub(self.detune),
        ];
        for (i, osc) in self.osc.iter_mut().enumerate() {
            let bits = pitches[i].saturating_add(self.panel.vco_pitch(i));
            osc.set_pitch(&self.table, PitchFxP::from_bits(bits));
            osc.set_waveform(self.panel.vco_waveform(i));
            osc.set_modulation(u32_to_float::<13>(self.panel.vco_shape(i)));
        }

        // The host's own LFO, read straight from its registers, modulates
        // the cross-fade with the shift-shape knob as depth
        let lfo = lfo_amplitude(
            self.panel.lfo_phase(),
            self.panel.lfo_waveform(),
            self.shift_shape,
        );
        self.mixer.update(self.shape + lfo);
        let (gain0, gain1) = self.mixer.gains();

        let [buf0, buf1] = &mut self.buffers;
        self.osc[0].render(&mut buf0[..frames]);
        self.osc[1].render(&mut buf1[..frames]);
        for ((y, a), b) in out.iter_mut().zip(buf0.iter()).zip(buf1.iter()) {
            *y = float_to_fixed_saturating::<U31>(gain0 * a + gain1 * b);
        }
    }
    /// The panel this synth reads
    pub fn panel(&self) -> &Panel<'h, H> {
        &self.panel
    }
    /// The two oscillators
    pub fn oscillators(&self) -> &[Oscillator; 2] {
        &self.osc
    }
    /// The per-voice detune, in Q.8 semitones
    pub fn detune(&self) -> i32 {
        self.detune
    }
    /// The shape knob, `[0, 1)`
    pub fn shape(&self) -> f32 {
        self.shape
    }
    /// The shift-shape knob, `[0, 1)`
    pub fn shift_shape(&self) -> f32 {
        self.shift_shape
    }
    /// The current smoothed cross-fade, `[0, 1]`
    pub fn mix(&self) -> f32 {
        self.mixer.mix()
    }
}
