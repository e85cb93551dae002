//! Read-only access to the host synthesizer's live panel state.
//!
//! The host firmware keeps its knob positions, LFO and envelope state in a
//! handful of RAM structures at fixed addresses (see [layout]).  A [Panel]
//! is bound to those regions once, at construction, after checking that the
//! firmware image is one whose layout we know.  If anything about the host
//! can't be trusted, the panel is bound to a set of static images holding
//! neutral values instead, so the accessors below never need to check.
//!
//! Every accessor is a volatile read: the host updates these structures
//! behind our back, and the panel never writes to them.

mod checksum;
pub mod layout;

pub use checksum::{firmware_hash, FIRMWARE_WORDS};
pub use layout::{
    EnvelopeState, MainState, MinilogueLfoState, PrologueLfoState, VcoStateArray,
};

use core::fmt;
use core::marker::PhantomData;
use core::ptr;
use log::{info, warn};

/// Read a field through a raw region pointer.  Must be used inside an
/// `unsafe` block, on a pointer that is valid for reads.
macro_rules! read_reg {
    ($region:expr => $($path:tt)+) => {
        ptr::read_volatile(ptr::addr_of!((*$region).$($path)+))
    };
}

/// Register access for a platform's LFO block.
///
/// # Safety
///
/// Every function requires `this` to be valid for reads of `Self`.
pub trait LfoLayout: Copy + 'static {
    /// The statically owned idle image used when the host isn't trusted
    fn fallback() -> &'static Self;
    /// Waveform code: 0 square, 1 triangle, 2 saw
    unsafe fn waveform(this: *const Self) -> u8;
    /// Non-zero when the multi-engine is a modulation target
    unsafe fn multi_enable(this: *const Self) -> u8;
    /// Phase increment per LFO clock tick
    unsafe fn phase_delta(this: *const Self) -> u32;
    /// The phase register, as stored
    unsafe fn raw_phase(this: *const Self) -> u32;
    /// Pitch modulation output
    unsafe fn pitch_out(this: *const Self) -> i32;
    /// Filter modulation output
    unsafe fn filter_out(this: *const Self) -> i32;
    /// Shape modulation output
    unsafe fn shape_out(this: *const Self) -> i32;
    /// False once a one-shot LFO has finished its half cycle
    unsafe fn is_active(this: *const Self) -> bool;
    /// True when the LFO is in one-shot mode
    unsafe fn is_one_shot(this: *const Self) -> bool;
    /// The effective LFO phase
    unsafe fn phase(this: *const Self) -> u32 {
        Self::raw_phase(this)
    }
}

macro_rules! lfo_common_registers {
    () => {
        unsafe fn waveform(this: *const Self) -> u8 {
            read_reg!(this => waveform)
        }
        unsafe fn multi_enable(this: *const Self) -> u8 {
            read_reg!(this => multi_enable)
        }
        unsafe fn phase_delta(this: *const Self) -> u32 {
            read_reg!(this => phase_delta)
        }
        unsafe fn raw_phase(this: *const Self) -> u32 {
            read_reg!(this => phase)
        }
        unsafe fn pitch_out(this: *const Self) -> i32 {
            read_reg!(this => pitch_out)
        }
        unsafe fn filter_out(this: *const Self) -> i32 {
            read_reg!(this => filter_out)
        }
        unsafe fn shape_out(this: *const Self) -> i32 {
            read_reg!(this => shape_out)
        }
    };
}

static FALLBACK_PROLOGUE_LFO: PrologueLfoState = PrologueLfoState::ZEROED;
static FALLBACK_MINILOGUE_LFO: MinilogueLfoState = MinilogueLfoState::ZEROED;

impl LfoLayout for PrologueLfoState {
    fn fallback() -> &'static Self {
        &FALLBACK_PROLOGUE_LFO
    }
    lfo_common_registers!();
    // The Prologue LFO free-runs
    unsafe fn is_active(_this: *const Self) -> bool {
        true
    }
    unsafe fn is_one_shot(_this: *const Self) -> bool {
        false
    }
}

impl LfoLayout for MinilogueLfoState {
    fn fallback() -> &'static Self {
        &FALLBACK_MINILOGUE_LFO
    }
    lfo_common_registers!();
    unsafe fn is_active(this: *const Self) -> bool {
        read_reg!(this => active) != 0
    }
    unsafe fn is_one_shot(this: *const Self) -> bool {
        read_reg!(this => mode) & 1 != 0
    }
    /// A one-shot LFO runs half a cycle and stops; the host leaves the
    /// register wherever it was, so report the end of the half cycle
    unsafe fn phase(this: *const Self) -> u32 {
        let phase = Self::raw_phase(this);
        if Self::is_one_shot(this) && phase >= 0x8000_0000 {
            0x7fff_ffff
        } else {
            phase
        }
    }
}

/// A host synthesizer family.  Each platform names its LFO layout, the rate
/// its LFO is clocked at and the firmware images known to match the layouts.
pub trait HostPlatform: 'static {
    /// Layout of the LFO state block
    type Lfo: LfoLayout;
    /// Human readable name, for logging
    const NAME: &'static str;
    /// False if the platform can never expose its panel
    const SUPPORTED: bool;
    /// Hashes (see [firmware_hash]) of firmware images with a known layout
    const FIRMWARE_HASHES: &'static [u32];
    /// LFO clock, in Hz
    const LFO_CLOCK_HZ: f32;
}

/// The Korg Prologue
#[derive(Clone, Copy, Debug, Default)]
pub struct Prologue;

impl HostPlatform for Prologue {
    type Lfo = PrologueLfoState;
    const NAME: &'static str = "Prologue";
    const SUPPORTED: bool = true;
    // firmware 2.10
    const FIRMWARE_HASHES: &'static [u32] = &[0x0eff_0f53];
    const LFO_CLOCK_HZ: f32 = 40500.0;
}

/// The Korg Minilogue XD
#[derive(Clone, Copy, Debug, Default)]
pub struct MinilogueXd;

impl HostPlatform for MinilogueXd {
    type Lfo = MinilogueLfoState;
    const NAME: &'static str = "Minilogue XD";
    const SUPPORTED: bool = true;
    // firmware 2.10
    const FIRMWARE_HASHES: &'static [u32] = &[0x2a6b_3685];
    const LFO_CLOCK_HZ: f32 = 40500.0;
}

/// Any other host.  The panel always reads the fallback image, in which the
/// LFO is idle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unsupported;

impl HostPlatform for Unsupported {
    type Lfo = MinilogueLfoState;
    const NAME: &'static str = "unsupported host";
    const SUPPORTED: bool = false;
    const FIRMWARE_HASHES: &'static [u32] = &[];
    const LFO_CLOCK_HZ: f32 = 1.0;
}

/// Why a panel is reading the fallback image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// At least one host region was not provided
    MissingRegion,
    /// The firmware image was too short to hash
    FirmwareTooShort,
    /// The firmware hash did not match any known image
    UnknownFirmware(u32),
    /// The platform never exposes its panel
    Unsupported,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRegion => f.write_str("host region missing"),
            Self::FirmwareTooShort => f.write_str("firmware image too short"),
            Self::UnknownFirmware(hash) => write!(f, "unknown firmware hash {:#010x}", hash),
            Self::Unsupported => f.write_str("platform not supported"),
        }
    }
}

/// The outcome of the construction-time host check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compatibility {
    /// The firmware matched a known image and the panel reads the host
    Verified {
        /// The matching firmware hash
        hash: u32,
    },
    /// The panel reads the fallback image
    Fallback(FallbackReason),
}

impl Compatibility {
    /// True if the panel reads live host state
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// Borrowed host memory regions to bind a [Panel] to
#[derive(Clone, Copy, Debug)]
pub struct HostRegions<'h, L> {
    /// Top level control structure
    pub main: Option<&'h MainState>,
    /// LFO state block
    pub lfo: Option<&'h L>,
    /// Envelope state block
    pub envelope: Option<&'h EnvelopeState>,
    /// Low level VCO state
    pub vco: Option<&'h VcoStateArray>,
    /// The start of the host firmware image, at least [FIRMWARE_WORDS] long
    pub firmware: &'h [u32],
}

impl<L> Default for HostRegions<'_, L> {
    fn default() -> Self {
        Self {
            main: None,
            lfo: None,
            envelope: None,
            vco: None,
            firmware: &[],
        }
    }
}

/// Raw host addresses for [Panel::from_addresses].  Zero means absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostAddresses {
    /// Address of the [MainState]
    pub main: usize,
    /// Address of the LFO state block
    pub lfo: usize,
    /// Address of the [EnvelopeState]
    pub envelope: usize,
    /// Address of the [VcoStateArray]
    pub vco: usize,
    /// Address of the firmware image
    pub firmware: usize,
    /// Number of readable words at `firmware`
    pub firmware_words: usize,
}

static FALLBACK_MAIN: MainState = {
    let mut main = MainState::ZEROED;
    main.engine[0].filter_cutoff_control = 0x2000;
    main.eg_velocity = 0x2000;
    main.amp_velocity = 0x1400;
    main.engine[0].vco[0].pitch = 0;
    main.engine[0].vco[1].pitch = 0;
    main
};
static FALLBACK_ENVELOPE: EnvelopeState = EnvelopeState::ZEROED;
static FALLBACK_VCO: VcoStateArray = VcoStateArray::ZEROED;

/// A read-only view of the host's panel and modulation state
pub struct Panel<'h, H: HostPlatform> {
    main: *const MainState,
    lfo: *const H::Lfo,
    envelope: *const EnvelopeState,
    vco: *const VcoStateArray,
    compatibility: Compatibility,
    _host: PhantomData<(&'h (), H)>,
}

impl<H: HostPlatform> fmt::Debug for Panel<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("platform", &H::NAME)
            .field("compatibility", &self.compatibility)
            .finish()
    }
}

#[inline(always)]
fn vco_index(index: usize) -> usize {
    index.min(1)
}

fn region<T>(r: Option<&T>) -> *const T {
    r.map_or(ptr::null(), |r| r as *const T)
}

impl<'h, H: HostPlatform> Panel<'h, H> {
    /// Bind to borrowed host regions, checking the firmware against the
    /// platform's known images
    pub fn new(regions: HostRegions<'h, H::Lfo>) -> Self {
        Self::with_fingerprints(regions, H::FIRMWARE_HASHES)
    }
    /// Bind to borrowed host regions, checking the firmware against a
    /// caller-supplied list of hashes instead of the platform's
    pub fn with_fingerprints(regions: HostRegions<'h, H::Lfo>, fingerprints: &[u32]) -> Self {
        Self::bind(
            region(regions.main),
            region(regions.lfo),
            region(regions.envelope),
            region(regions.vco),
            regions.firmware,
            fingerprints,
        )
    }
    /// Bind to host regions at raw addresses.
    ///
    /// # Safety
    ///
    /// Every non-zero address must be valid for reads of its structure for
    /// `'h`, and `firmware` must be valid for reads of `firmware_words`
    /// words.  The host may keep writing to the regions.
    pub unsafe fn from_addresses(addresses: HostAddresses) -> Self {
        let firmware: &[u32] = if addresses.firmware == 0 {
            &[]
        } else {
            core::slice::from_raw_parts(addresses.firmware as *const u32, addresses.firmware_words)
        };
        Self::bind(
            addresses.main as *const MainState,
            addresses.lfo as *const H::Lfo,
            addresses.envelope as *const EnvelopeState,
            addresses.vco as *const VcoStateArray,
            firmware,
            H::FIRMWARE_HASHES,
        )
    }
    /// A panel bound straight to the fallback image
    pub fn fallback() -> Self {
        Self::new(HostRegions::default())
    }

    fn bind(
        main: *const MainState,
        lfo: *const H::Lfo,
        envelope: *const EnvelopeState,
        vco: *const VcoStateArray,
        firmware: &[u32],
        fingerprints: &[u32],
    ) -> Self {
        let compatibility = Self::check(main, lfo, envelope, vco, firmware, fingerprints);
        match compatibility {
            Compatibility::Verified { hash } => {
                info!("panel: {} firmware {:#010x} verified", H::NAME, hash);
                Self {
                    main,
                    lfo,
                    envelope,
                    vco,
                    compatibility,
                    _host: PhantomData,
                }
            }
            Compatibility::Fallback(reason) => {
                warn!("panel: {}: {}, using fallback image", H::NAME, reason);
                Self {
                    main: &FALLBACK_MAIN,
                    lfo: H::Lfo::fallback(),
                    envelope: &FALLBACK_ENVELOPE,
                    vco: &FALLBACK_VCO,
                    compatibility,
                    _host: PhantomData,
                }
            }
        }
    }

    fn check(
        main: *const MainState,
        lfo: *const H::Lfo,
        envelope: *const EnvelopeState,
        vco: *const VcoStateArray,
        firmware: &[u32],
        fingerprints: &[u32],
    ) -> Compatibility {
        if !H::SUPPORTED {
            return Compatibility::Fallback(FallbackReason::Unsupported);
        }
        if main.is_null() || lfo.is_null() || envelope.is_null() || vco.is_null() {
            return Compatibility::Fallback(FallbackReason::MissingRegion);
        }
        match firmware_hash(firmware) {
            None => Compatibility::Fallback(FallbackReason::FirmwareTooShort),
            Some(hash) if fingerprints.contains(&hash) => Compatibility::Verified { hash },
            Some(hash) => Compatibility::Fallback(FallbackReason::UnknownFirmware(hash)),
        }
    }

    /// The outcome of the host check made at construction
    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }
}

// SAFETY (for every accessor below): the region pointers are either host
// regions the constructor was promised are readable for 'h, or fallback
// statics.  Neither is ever null after construction.
impl<H: HostPlatform> Panel<'_, H> {
    /// VCO waveform: 0 square, 1 triangle, 2 saw
    pub fn vco_waveform(&self, index: usize) -> u32 {
        let i = vco_index(index);
        unsafe { read_reg!(self.main => engine[0].vco[i].waveform) as u32 }
    }
    /// VCO shape knob, `[0, 0x2000]`
    pub fn vco_shape(&self, index: usize) -> u32 {
        let i = vco_index(index);
        unsafe { read_reg!(self.main => engine[0].vco[i].shape) }
    }
    /// VCO pitch excluding modulation, 256 steps per semitone
    pub fn vco_pitch(&self, index: usize) -> i32 {
        let i = vco_index(index);
        unsafe { read_reg!(self.main => engine[0].vco[i].pitch) }
    }
    /// Pitch EG after intensity scaling, `[-0x3000, 0x3000]`
    pub fn vco_pitch_eg(&self, index: usize) -> i32 {
        let i = vco_index(index);
        unsafe { read_reg!(self.main => engine[0].vco[i].pitch_eg) as i32 }
    }
    /// VCO mixer level, `[0, 0x2000]`
    pub fn vco_level(&self, index: usize) -> u32 {
        let i = vco_index(index);
        unsafe { read_reg!(self.main => engine[0].vco[i].mixer_level) as u32 }
    }
    /// Multi-engine mixer level, `[0, 0x2000]`
    pub fn multi_level(&self) -> u32 {
        unsafe { read_reg!(self.main => engine[0].multi_mixer_level) as u32 }
    }
    /// Cross modulation depth, `[0, 0x2000]`
    pub fn cross_modulation_depth(&self) -> u32 {
        unsafe { read_reg!(self.main => engine[0].cross_modulation_depth) as u32 }
    }
    /// Filter drive: 0 off, 1 low, 2 high
    pub fn filter_drive_switch(&self) -> u32 {
        unsafe { read_reg!(self.main => engine[0].filter_drive) as u32 }
    }
    /// Filter cutoff knob, `[0, 0x2000]`, ten octaves at 0x334 per octave
    pub fn filter_cutoff_control(&self) -> u32 {
        unsafe { read_reg!(self.main => engine[0].filter_cutoff_control) as u32 }
    }
    /// Filter cutoff key tracking, added to the cutoff knob
    pub fn filter_cutoff_key_track(&self) -> i32 {
        unsafe { read_reg!(self.main => engine[0].filter_cutoff_key_track) as i32 }
    }
    /// Filter resonance knob, `[0, 0x2000]`
    pub fn filter_resonance_control(&self) -> u32 {
        unsafe { read_reg!(self.main => engine[0].filter_resonance_control) as u32 }
    }
    /// Filter EG intensity knob, `[0, 0x2000]`
    pub fn filter_eg_intensity_control(&self) -> u32 {
        unsafe { read_reg!(self.main => engine[0].filter_eg_intensity) as u32 }
    }
    /// Low cut switch
    pub fn filter_low_cut_enable(&self) -> bool {
        unsafe { read_reg!(self.main => engine[0].low_cut) != 0 }
    }
    /// Ring modulation switch
    pub fn ring_enable(&self) -> bool {
        unsafe { read_reg!(self.main => engine[0].vco[1].ring_enable) != 0 }
    }
    /// Sync switch
    pub fn sync_enable(&self) -> bool {
        unsafe { read_reg!(self.main => engine[0].vco_sync_enable) != 0 }
    }
    /// True when the multi-engine bypasses the VCF
    pub fn multi_vcf_bypass_enable(&self) -> bool {
        unsafe { read_reg!(self.main => engine[0].multi_vcf_bypass) != 0 }
    }
    /// LFO shape modulation output, `[-0x2000, 0x2000]`
    pub fn lfo_shape_modulation(&self) -> i32 {
        unsafe { H::Lfo::shape_out(self.lfo) }
    }
    /// LFO pitch modulation output
    pub fn lfo_pitch_modulation(&self) -> i32 {
        unsafe { H::Lfo::pitch_out(self.lfo) }
    }
    /// LFO filter modulation output, `[-0x1000, 0x1000]`
    pub fn lfo_filter_modulation(&self) -> i32 {
        unsafe { H::Lfo::filter_out(self.lfo) }
    }
    /// LFO waveform: 0 square, 1 triangle, 2 saw
    pub fn lfo_waveform(&self) -> u32 {
        unsafe { H::Lfo::waveform(self.lfo) as u32 }
    }
    /// LFO phase increment per [lfo_clock](Self::lfo_clock) tick
    pub fn lfo_phase_delta(&self) -> u32 {
        unsafe { H::Lfo::phase_delta(self.lfo) }
    }
    /// The LFO phase.  A finished one-shot LFO reads as `0x7fffffff`.
    pub fn lfo_phase(&self) -> u32 {
        unsafe { H::Lfo::phase(self.lfo) }
    }
    /// False once a one-shot LFO has stopped.  Always true on the Prologue.
    pub fn lfo_is_active(&self) -> bool {
        unsafe { H::Lfo::is_active(self.lfo) }
    }
    /// True in one-shot mode.  Always false on the Prologue.
    pub fn lfo_is_one_shot(&self) -> bool {
        unsafe { H::Lfo::is_one_shot(self.lfo) }
    }
    /// LFO targets the multi-engine
    pub fn lfo_modulation_enable_multi(&self) -> bool {
        unsafe { H::Lfo::multi_enable(self.lfo) != 0 }
    }
    /// LFO pitch modulation enabled for a VCO
    pub fn lfo_modulation_enable_vco(&self, index: usize) -> bool {
        let i = vco_index(index);
        unsafe { read_reg!(self.vco => vco[i].lfo_pitch_mod_enable) != 0 }
    }
    /// Filter EG intensity, `[-0x20000, 0x20000]`
    pub fn eg_filter_intensity(&self) -> i32 {
        unsafe { read_reg!(self.envelope => filter_eg_intensity1) }
    }
    /// Filter EG modulation level
    pub fn eg_filter_modulation_level(&self) -> u32 {
        unsafe { read_reg!(self.envelope => modulation_eg_level) }
    }
    /// EG velocity word, `[0, 0x32cc]`
    pub fn raw_eg_velocity(&self) -> u32 {
        unsafe { read_reg!(self.main => eg_velocity) as u32 }
    }
    /// AMP velocity word, `[0, 0x1fa8]`
    pub fn raw_amp_velocity(&self) -> u32 {
        unsafe { read_reg!(self.main => amp_velocity) as u32 }
    }
    /// EG velocity in `[0, 1.6]`, 1.0 when neutral
    pub fn eg_velocity(&self) -> f32 {
        self.raw_eg_velocity() as f32 * (1.0 / EG_VELOCITY_NEUTRAL as f32)
    }
    /// AMP velocity in `[0, 1.6]`, 1.0 when neutral
    pub fn amp_velocity(&self) -> f32 {
        self.raw_amp_velocity() as f32 * (1.0 / AMP_VELOCITY_NEUTRAL as f32)
    }
    /// The rate the host LFO is clocked at, in Hz
    pub fn lfo_clock(&self) -> f32 {
        H::LFO_CLOCK_HZ
    }
}

const EG_VELOCITY_NEUTRAL: u32 = 0x2000;
const AMP_VELOCITY_NEUTRAL: u32 = 0x1400;

/// Lower bound of [Panel::eg_velocity]
pub const EG_VELOCITY_MIN: f32 = 0.0;
/// Upper bound of [Panel::eg_velocity]
pub const EG_VELOCITY_MAX: f32 = 1.6;
/// Lower bound of [Panel::amp_velocity]
pub const AMP_VELOCITY_MIN: f32 = 0.0;
/// Upper bound of [Panel::amp_velocity]
pub const AMP_VELOCITY_MAX: f32 = 1.6;

#[cfg(test)]
mod tests {
    use super::*;

    /// A platform accepting an all-zero firmware image
    struct TestHost;
    impl HostPlatform for TestHost {
        type Lfo = MinilogueLfoState;
        const NAME: &'static str = "test";
        const SUPPORTED: bool = true;
        const FIRMWARE_HASHES: &'static [u32] = &[ZERO_IMAGE_HASH];
        const LFO_CLOCK_HZ: f32 = 40500.0;
    }
    const ZERO_IMAGE_HASH: u32 = 0xf737_14cf;
    static ZERO_FIRMWARE: [u32; FIRMWARE_WORDS] = [0; FIRMWARE_WORDS];

    fn host_main() -> MainState {
        let mut main = MainState::ZEROED;
        main.engine[0].vco[0].shape = 0x1000;
        main.engine[0].vco[1].shape = 0x0800;
        main.engine[0].vco[0].pitch = -0x300;
        main.engine[0].vco[1].pitch = 0x180;
        main.engine[0].vco[1].waveform = 2;
        main.engine[0].vco[1].ring_enable = 1;
        main.engine[0].filter_cutoff_control = 0x0abc;
        main.engine[0].filter_cutoff_key_track = -0x19a;
        main.engine[0].filter_drive = 2;
        main.eg_velocity = 0x3000;
        main.amp_velocity = 0x0a00;
        main
    }

    fn assert_fallback_values<H: HostPlatform>(panel: &Panel<H>) {
        assert_eq!(panel.filter_cutoff_control(), 0x2000);
        assert_eq!(panel.raw_eg_velocity(), 0x2000);
        assert_eq!(panel.raw_amp_velocity(), 0x1400);
        assert_eq!(panel.vco_pitch(0), 0);
        assert_eq!(panel.vco_pitch(1), 0);
        assert_eq!(panel.eg_velocity(), 1.0);
        assert_eq!(panel.amp_velocity(), 1.0);
        assert_eq!(panel.vco_shape(0), 0);
        assert_eq!(panel.lfo_phase(), 0);
        assert!(!panel.filter_low_cut_enable());
    }

    #[test]
    fn fallback_image() {
        let panel = Panel::<Prologue>::fallback();
        assert_eq!(
            panel.compatibility(),
            Compatibility::Fallback(FallbackReason::MissingRegion)
        );
        assert_fallback_values(&panel);
        assert!(panel.lfo_is_active());
        assert_eq!(panel.lfo_clock(), 40500.0);
    }
    #[test]
    fn verified_host_is_read() {
        let main = host_main();
        let mut lfo = MinilogueLfoState::ZEROED;
        lfo.waveform = 1;
        lfo.phase = 0x1234_5678;
        lfo.shape_out = -0x1000;
        let mut envelope = EnvelopeState::ZEROED;
        envelope.filter_eg_intensity1 = -0x20000;
        let mut vco = VcoStateArray::ZEROED;
        vco.vco[1].lfo_pitch_mod_enable = 1;
        let panel = Panel::<TestHost>::new(HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: Some(&envelope),
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE,
        });
        assert_eq!(
            panel.compatibility(),
            Compatibility::Verified {
                hash: ZERO_IMAGE_HASH
            }
        );
        assert_eq!(panel.vco_shape(0), 0x1000);
        assert_eq!(panel.vco_pitch(0), -0x300);
        assert_eq!(panel.vco_waveform(1), 2);
        assert!(panel.ring_enable());
        assert_eq!(panel.filter_cutoff_control(), 0x0abc);
        assert_eq!(panel.filter_cutoff_key_track(), -0x19a);
        assert_eq!(panel.filter_drive_switch(), 2);
        assert_eq!(panel.eg_velocity(), 1.5);
        assert_eq!(panel.amp_velocity(), 0.5);
        assert_eq!(panel.lfo_waveform(), 1);
        assert_eq!(panel.lfo_phase(), 0x1234_5678);
        assert_eq!(panel.lfo_shape_modulation(), -0x1000);
        assert_eq!(panel.eg_filter_intensity(), -0x20000);
        assert!(!panel.lfo_modulation_enable_vco(0));
        assert!(panel.lfo_modulation_enable_vco(1));
    }
    #[test]
    fn out_of_range_index_reads_second_vco() {
        let main = host_main();
        let lfo = MinilogueLfoState::ZEROED;
        let envelope = EnvelopeState::ZEROED;
        let vco = VcoStateArray::ZEROED;
        let panel = Panel::<TestHost>::new(HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: Some(&envelope),
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE,
        });
        assert_eq!(panel.vco_shape(7), panel.vco_shape(1));
        assert_eq!(panel.vco_pitch(usize::MAX), 0x180);
    }
    #[test]
    fn unknown_firmware_falls_back() {
        let main = host_main();
        let lfo = PrologueLfoState::ZEROED;
        let envelope = EnvelopeState::ZEROED;
        let vco = VcoStateArray::ZEROED;
        let regions = HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: Some(&envelope),
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE,
        };
        let panel = Panel::<Prologue>::new(regions);
        assert_eq!(
            panel.compatibility(),
            Compatibility::Fallback(FallbackReason::UnknownFirmware(ZERO_IMAGE_HASH))
        );
        assert_fallback_values(&panel);
        // the same image with a project-specific fingerprint list
        let panel = Panel::<Prologue>::with_fingerprints(regions, &[1, ZERO_IMAGE_HASH]);
        assert!(panel.compatibility().is_verified());
        assert_eq!(panel.vco_pitch(1), 0x180);
    }
    #[test]
    fn short_firmware_or_missing_region_falls_back() {
        let main = host_main();
        let lfo = MinilogueLfoState::ZEROED;
        let envelope = EnvelopeState::ZEROED;
        let vco = VcoStateArray::ZEROED;
        let panel = Panel::<TestHost>::new(HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: Some(&envelope),
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE[..FIRMWARE_WORDS - 8],
        });
        assert_eq!(
            panel.compatibility(),
            Compatibility::Fallback(FallbackReason::FirmwareTooShort)
        );
        assert_fallback_values(&panel);
        let panel = Panel::<TestHost>::new(HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: None,
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE,
        });
        assert_eq!(
            panel.compatibility(),
            Compatibility::Fallback(FallbackReason::MissingRegion)
        );
        assert_fallback_values(&panel);
    }
    #[test]
    fn unsupported_platform_is_idle() {
        let main = host_main();
        let mut lfo = MinilogueLfoState::ZEROED;
        lfo.active = 1;
        let envelope = EnvelopeState::ZEROED;
        let vco = VcoStateArray::ZEROED;
        let panel = Panel::<Unsupported>::with_fingerprints(
            HostRegions {
                main: Some(&main),
                lfo: Some(&lfo),
                envelope: Some(&envelope),
                vco: Some(&vco),
                firmware: &ZERO_FIRMWARE,
            },
            &[ZERO_IMAGE_HASH],
        );
        assert_eq!(
            panel.compatibility(),
            Compatibility::Fallback(FallbackReason::Unsupported)
        );
        assert_fallback_values(&panel);
        assert!(!panel.lfo_is_active());
        assert!(!panel.lfo_is_one_shot());
        assert_eq!(panel.lfo_clock(), 1.0);
    }
    #[test]
    fn one_shot_phase_is_clamped() {
        let main = MainState::ZEROED;
        let mut lfo = MinilogueLfoState::ZEROED;
        lfo.mode = 1;
        lfo.phase = 0x9000_0000;
        let envelope = EnvelopeState::ZEROED;
        let vco = VcoStateArray::ZEROED;
        let panel = Panel::<TestHost>::new(HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: Some(&envelope),
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE,
        });
        assert!(panel.lfo_is_one_shot());
        assert_eq!(panel.lfo_phase(), 0x7fff_ffff);
        assert_eq!(lfo.phase, 0x9000_0000);
        drop(panel);

        lfo.phase = 0x7000_0000;
        let panel = Panel::<TestHost>::new(HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: Some(&envelope),
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE,
        });
        assert_eq!(panel.lfo_phase(), 0x7000_0000);
        drop(panel);

        lfo.mode = 0;
        lfo.phase = 0x9000_0000;
        let panel = Panel::<TestHost>::new(HostRegions {
            main: Some(&main),
            lfo: Some(&lfo),
            envelope: Some(&envelope),
            vco: Some(&vco),
            firmware: &ZERO_FIRMWARE,
        });
        assert!(!panel.lfo_is_one_shot());
        assert_eq!(panel.lfo_phase(), 0x9000_0000);
    }
    #[test]
    fn prologue_phase_is_raw() {
        let mut lfo = PrologueLfoState::ZEROED;
        lfo.phase = 0xffff_0000;
        let phase = unsafe { PrologueLfoState::phase(&lfo) };
        assert_eq!(phase, 0xffff_0000);
        assert!(unsafe { PrologueLfoState::is_active(&lfo) });
    }
    #[test]
    fn host_memory_is_read_live() {
        let mut main = MainState::ZEROED;
        let mut lfo = MinilogueLfoState::ZEROED;
        let envelope = EnvelopeState::ZEROED;
        let vco = VcoStateArray::ZEROED;
        let main_ptr = ptr::addr_of_mut!(main);
        let lfo_ptr = ptr::addr_of_mut!(lfo);
        let panel = unsafe {
            Panel::<TestHost>::from_addresses(HostAddresses {
                main: main_ptr as usize,
                lfo: lfo_ptr as usize,
                envelope: ptr::addr_of!(envelope) as usize,
                vco: ptr::addr_of!(vco) as usize,
                firmware: ZERO_FIRMWARE.as_ptr() as usize,
                firmware_words: FIRMWARE_WORDS,
            })
        };
        assert!(panel.compatibility().is_verified());
        assert_eq!(panel.vco_shape(0), 0);
        for shape in [0x100, 0x1fff, 0x2000] {
            unsafe {
                ptr::write_volatile(ptr::addr_of_mut!((*main_ptr).engine[0].vco[0].shape), shape);
                ptr::write_volatile(ptr::addr_of_mut!((*lfo_ptr).phase), shape << 16);
            }
            assert_eq!(panel.vco_shape(0), shape);
            assert_eq!(panel.lfo_phase(), shape << 16);
        }
    }
    #[test]
    fn null_addresses_fall_back() {
        let panel = unsafe { Panel::<MinilogueXd>::from_addresses(HostAddresses::default()) };
        assert_eq!(
            panel.compatibility(),
            Compatibility::Fallback(FallbackReason::MissingRegion)
        );
        assert_fallback_values(&panel);
    }
}
