#![cfg_attr(feature = "embedded", no_std)]
#![allow(non_snake_case)]

#[cfg(feature = "embedded")]
use panic_halt as _;

use core::ptr::addr_of_mut;

use panelosc::panel::HostAddresses;
use panelosc::{Context, EqualTemperament, OutputFxP, Panel, PitchFxP, Synth, VoiceId};

#[cfg(feature = "prologue")]
type Platform = panelosc::Prologue;
#[cfg(all(feature = "minilogue-xd", not(feature = "prologue")))]
type Platform = panelosc::MinilogueXd;
#[cfg(not(any(feature = "prologue", feature = "minilogue-xd")))]
type Platform = panelosc::Unsupported;

/// Mirror of the host SDK's `user_osc_param_t`
#[repr(C)]
pub struct UserOscParams {
    pub shape_lfo: i32,
    /// High byte: note number, low byte: fine
    pub pitch: u16,
    pub cutoff: u16,
    pub resonance: u16,
    pub reserved0: [u16; 3],
}

// Only touched from the host's single audio context
static mut SYNTH: Option<Synth<'static, Platform>> = None;

#[cfg(any(feature = "prologue", feature = "minilogue-xd"))]
mod host {
    use panelosc::panel::{HostAddresses, FIRMWARE_WORDS};

    // firmware 2.10, identical on both platforms
    pub const ADDRESSES: HostAddresses = HostAddresses {
        main: 0x2000_9e40,
        lfo: 0x2000_8970,
        envelope: 0x2000_89a0,
        vco: 0x2000_8850,
        firmware: 0x0800_0000,
        firmware_words: FIRMWARE_WORDS,
    };
    /// STM32F4 96 bit unique device ID
    pub const UNIQUE_ID: [usize; 3] = [0x1fff_7a10, 0x1fff_7a14, 0x1fff_7a18];
}

#[cfg(any(feature = "prologue", feature = "minilogue-xd"))]
fn host_addresses() -> HostAddresses {
    host::ADDRESSES
}

#[cfg(not(any(feature = "prologue", feature = "minilogue-xd")))]
fn host_addresses() -> HostAddresses {
    HostAddresses::default()
}

#[cfg(any(feature = "prologue", feature = "minilogue-xd"))]
fn voice_id() -> VoiceId {
    use core::ptr::read_volatile;
    // SAFETY: the unique ID registers are always mapped and read-only
    let words = host::UNIQUE_ID.map(|addr| unsafe { read_volatile(addr as *const u32) });
    VoiceId::from_words(&words)
}

#[cfg(not(any(feature = "prologue", feature = "minilogue-xd")))]
fn voice_id() -> VoiceId {
    VoiceId::from_hash(0)
}

#[no_mangle]
pub extern "C" fn OSC_INIT(_platform: u32, _api: u32) {
    // SAFETY: on a supported host the regions are mapped for the life of the
    // program; otherwise every address is zero and nothing is read
    let panel = unsafe { Panel::<Platform>::from_addresses(host_addresses()) };
    let synth = Synth::new(panel, EqualTemperament::new(Context::new_480()), voice_id());
    unsafe {
        *addr_of_mut!(SYNTH) = Some(synth);
    }
}

#[no_mangle]
pub extern "C" fn OSC_PARAM(index: u16, value: u16) {
    if let Some(synth) = unsafe { (*addr_of_mut!(SYNTH)).as_mut() } {
        synth.param_change(index, value);
    }
}

/// # Safety
///
/// `yn` must be null or point to `frames` writable samples, and `params`
/// must be null or point to a valid parameter block.  A null `params`
/// renders silence.
#[no_mangle]
pub unsafe extern "C" fn OSC_CYCLE(params: *const UserOscParams, yn: *mut i32, frames: u32) {
    if yn.is_null() {
        return;
    }
    // OutputFxP is a transparent wrapper over i32
    let out = core::slice::from_raw_parts_mut(yn as *mut OutputFxP, frames as usize);
    match ((*addr_of_mut!(SYNTH)).as_mut(), params.as_ref()) {
        (Some(synth), Some(params)) => {
            synth.render_block(PitchFxP::from_bits(params.pitch as i32), out)
        }
        _ => out.fill(OutputFxP::ZERO),
    }
}
