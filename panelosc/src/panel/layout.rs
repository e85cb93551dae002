//! `#[repr(C)]` images of the host firmware's control structures, as laid
//! out by firmware 2.10 on both the Prologue and the Minilogue XD.
//!
//! Only the fields we know the meaning of are public.  Everything else is
//! kept as reserved padding so the offsets line up, and the offsets of the
//! fields we read are checked at compile time.  Every structure has a
//! `ZEROED` constant to start images from.

use core::mem::{offset_of, size_of};

/// Per-oscillator panel controls
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VcoControl {
    /// VCO shape knob, `[0, 0x2000]`
    pub shape: u32,
    /// VCO pitch excluding modulation, 256 steps per cent
    pub pitch: i32,
    _reserved0: u32,
    /// Mixer level, `[0, 0x2000]`
    pub mixer_level: u16,
    /// Pitch EG after intensity scaling, `[-0x3000, 0x3000]`
    pub pitch_eg: i16,
    _reserved1: u32,
    _reserved2: u32,
    /// Waveform switch: 0 square, 1 triangle, 2 saw
    pub waveform: u8,
    /// Ring modulation enable (second VCO only)
    pub ring_enable: u8,
    _reserved3: u8,
    /// Pitch EG enable
    pub pitch_eg_enable: u8,
}

/// The voice engine.  Filter cutoff controls span almost exactly ten octaves
/// over `[0, 0x2000]`, with key tracking added on top.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Engine {
    /// Both VCOs
    pub vco: [VcoControl; 2],
    /// Mirrors the multi-engine pitch modulation
    pub pitch_eg_modulation: u32,
    _u3c: u32,
    _u40: u16,
    /// MIDI note number * 256
    pub midi_pitch: u16,
    /// Filter cutoff key tracking offset, added to the cutoff control
    pub filter_cutoff_key_track: i16,
    /// Copy of the main state's AMP velocity
    pub amp_velocity: u16,
    /// Multi-engine output level
    pub multi_mixer_level: u16,
    /// Filter resonance knob, `[0, 0x2000]`
    pub filter_resonance_control: u16,
    /// Filter cutoff knob, `[0, 0x2000]`, 0x334 per octave
    pub filter_cutoff_control: u16,
    /// Cross modulation depth, `[0, 0x2000]`
    pub cross_modulation_depth: u16,
    _u50: u32,
    _u54: u16,
    _u56: u16,
    /// Filter EG intensity knob, `[0, 0x2000]`, centred at 0x1000
    pub filter_eg_intensity: u16,
    /// Copy of the main state's EG velocity
    pub eg_velocity: u16,
    _u5c: u32,
    _u60: u8,
    /// VCO sync enable
    pub vco_sync_enable: u8,
    _u62: u8,
    /// LFO waveform switch
    pub lfo_waveform: u8,
    _u64: u8,
    /// Zero when the multi-engine is routed through the VCF
    pub multi_vcf_bypass: u8,
    /// Filter drive switch: 0 off, 1 low, 2 high
    pub filter_drive: u8,
    /// Low cut switch
    pub low_cut: u8,
    _u68: [u8; 4],
}

/// Top level control structure
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MainState {
    /// The one voice engine
    pub engine: [Engine; 1],
    /// Multi-engine pitch
    pub multi_pitch: u32,
    /// Multi-engine pitch EG enable
    pub multi_pitch_eg_enable: u8,
    _u71: u8,
    /// Multi-engine pitch modulation
    pub multi_pitch_eg_modulation: i16,
    _u74: [u8; 4],
    /// EG velocity after curve, `[0, 0x32cc]`, 0x2000 when neutral
    pub eg_velocity: u16,
    _u7a: u16,
    /// MIDI note number * 256
    pub note: u16,
    _u7e: u16,
    /// AMP velocity after curve, `[0, 0x1fa8]`, 0x1400 when neutral
    pub amp_velocity: u16,
    _u82: u16,
    /// VCO1 pitch EG intensity
    pub vco1_pitch_eg_intensity: u32,
    /// VCO2 pitch EG intensity
    pub vco2_pitch_eg_intensity: u32,
    _u8c: u32,
    /// Key-on timestamp
    pub timestamp: u32,
    _u94: [u32; 2],
    /// Set to 0x1234567 at reset
    pub magic: u32,
}

/// LFO state on the Prologue
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrologueLfoState {
    /// Waveform: 0 square, 1 triangle, 2 saw
    pub waveform: u8,
    /// Non-zero to invert the output
    pub invert: u8,
    /// Non-zero when the multi-engine is a target
    pub multi_enable: u8,
    _u03: u8,
    /// Intensity knob, `[-0x1ff0, 0x1ff0]`
    pub intensity: i32,
    _u08: u32,
    _u0c: u32,
    /// Phase increment per LFO clock tick
    pub phase_delta: u32,
    /// Current phase
    pub phase: u32,
    _u18: [u32; 2],
    /// Pitch modulation output
    pub pitch_out: i32,
    /// Filter modulation output
    pub filter_out: i32,
    /// Shape modulation output
    pub shape_out: i32,
    /// Host address of the user oscillator parameters
    pub params_addr: u32,
}

/// LFO state on the Minilogue XD, which adds one-shot mode
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinilogueLfoState {
    /// Waveform: 0 square, 1 triangle, 2 saw
    pub waveform: u8,
    /// Non-zero to invert the output
    pub invert: u8,
    /// Non-zero when the multi-engine is a target
    pub multi_enable: u8,
    _u03: u8,
    /// Bit 0 set in one-shot mode
    pub mode: u8,
    /// Non-zero while the LFO is running
    pub active: u8,
    _u06: [u8; 2],
    /// Intensity knob, `[-0x1ff0, 0x1ff0]`
    pub intensity: i32,
    _u0c: u32,
    _u10: u32,
    /// Phase increment per LFO clock tick
    pub phase_delta: u32,
    /// Current phase
    pub phase: u32,
    _u1c: u32,
    /// Pitch modulation output
    pub pitch_out: i32,
    /// Filter modulation output
    pub filter_out: i32,
    /// Shape modulation output
    pub shape_out: i32,
    /// Host address of the user oscillator parameters
    pub params_addr: u32,
}

/// Envelope processing state
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeState {
    _u00: [u32; 18],
    /// Filter EG intensity knob, `[-0x20000, 0x20000]`
    pub filter_eg_intensity1: i32,
    _u4c: [u32; 4],
    /// Duplicate of `filter_eg_intensity1`
    pub filter_eg_intensity2: i32,
    _u60: [u32; 2],
    /// Modulation envelope output level
    pub modulation_eg_level: u32,
    _u6c: [u32; 5],
}

/// Low level per-VCO state
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VcoState {
    _u00: [u8; 16],
    /// Non-zero to enable LFO pitch modulation of this VCO
    pub lfo_pitch_mod_enable: u8,
    _u11: [u8; 3],
    _u14: [u8; 0x4c],
}

/// Low level state for both VCOs
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VcoStateArray {
    /// Both VCOs
    pub vco: [VcoState; 2],
}

macro_rules! zeroed {
    ($($t:ty),+) => {
        $(impl $t {
            /// An all-zero image
            // SAFETY: plain integers and arrays of integers, all-zero is valid
            pub const ZEROED: Self = unsafe { core::mem::zeroed() };
        })+
    };
}

zeroed!(
    VcoControl,
    Engine,
    MainState,
    PrologueLfoState,
    MinilogueLfoState,
    EnvelopeState,
    VcoState,
    VcoStateArray
);

const _: () = {
    assert!(size_of::<VcoControl>() == 0x1c);
    assert!(offset_of!(VcoControl, waveform) == 0x18);
    assert!(size_of::<Engine>() == 0x6c);
    assert!(offset_of!(Engine, multi_mixer_level) == 0x48);
    assert!(offset_of!(Engine, filter_cutoff_control) == 0x4c);
    assert!(offset_of!(Engine, filter_eg_intensity) == 0x58);
    assert!(offset_of!(Engine, lfo_waveform) == 0x63);
    assert!(offset_of!(Engine, low_cut) == 0x67);
    assert!(size_of::<MainState>() == 0xa0);
    assert!(offset_of!(MainState, multi_pitch_eg_modulation) == 0x72);
    assert!(offset_of!(MainState, eg_velocity) == 0x78);
    assert!(offset_of!(MainState, amp_velocity) == 0x80);
    assert!(offset_of!(MainState, magic) == 0x9c);
    assert!(size_of::<PrologueLfoState>() == 0x30);
    assert!(offset_of!(PrologueLfoState, phase_delta) == 0x10);
    assert!(offset_of!(PrologueLfoState, phase) == 0x14);
    assert!(offset_of!(PrologueLfoState, pitch_out) == 0x20);
    assert!(size_of::<MinilogueLfoState>() == 0x30);
    assert!(offset_of!(MinilogueLfoState, mode) == 0x04);
    assert!(offset_of!(MinilogueLfoState, active) == 0x05);
    assert!(offset_of!(MinilogueLfoState, phase_delta) == 0x14);
    assert!(offset_of!(MinilogueLfoState, phase) == 0x18);
    assert!(offset_of!(MinilogueLfoState, pitch_out) == 0x20);
    assert!(size_of::<EnvelopeState>() == 0x80);
    assert!(offset_of!(EnvelopeState, filter_eg_intensity1) == 0x48);
    assert!(offset_of!(EnvelopeState, filter_eg_intensity2) == 0x5c);
    assert!(offset_of!(EnvelopeState, modulation_eg_level) == 0x68);
    assert!(size_of::<VcoState>() == 0x60);
    assert!(offset_of!(VcoState, lfo_pitch_mod_enable) == 0x10);
    assert!(size_of::<VcoStateArray>() == 0xc0);
};
