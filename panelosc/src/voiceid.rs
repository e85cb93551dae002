//! A per-device identifier, used to give every unit its own slight detune.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// A 32 bit FNV-1a hash of the MCU's unique ID words
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct VoiceId(u32);

impl VoiceId {
    /// Hash the unique ID words, each one least significant byte first
    pub fn from_words(words: &[u32]) -> Self {
        let hash = words
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .fold(FNV_OFFSET_BASIS, |hash, byte| {
                (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
            });
        Self(hash)
    }
    /// Wrap an already computed hash.  Hosts with no unique ID use zero.
    pub const fn from_hash(hash: u32) -> Self {
        Self(hash)
    }
    /// The hash
    pub const fn hash(&self) -> u32 {
        self.0
    }
    /// The detune for this voice, in Q.8 semitones: the top four bits of
    /// the hash as a signed value, moved away from zero so that it lands in
    /// `[-8, -1]` or `[1, 8]`
    pub const fn detune(&self) -> i32 {
        let detune = (self.0 as i32) >> 28;
        if detune >= 0 {
            detune + 1
        } else {
            detune
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oorandom::Rand32;

    #[test]
    fn known_hashes() {
        let id = VoiceId::from_words(&[0, 0, 0]);
        assert_eq!(id.hash(), 0xe23c_62b5);
        assert_eq!(id.detune(), -2);
        let id = VoiceId::from_words(&[0x1234_5678, 0x9abc_def0, 0x0bad_f00d]);
        assert_eq!(id.hash(), 0xcb79_80dc);
        assert_eq!(id.detune(), -4);
        let id = VoiceId::from_words(&[]);
        assert_eq!(id.hash(), FNV_OFFSET_BASIS);
        assert_eq!(id.detune(), -8);
    }
    #[test]
    fn detune_is_never_zero() {
        assert_eq!(VoiceId::from_hash(0).detune(), 1);
        assert_eq!(VoiceId::from_hash(0x7fff_ffff).detune(), 8);
        assert_eq!(VoiceId::from_hash(0x8000_0000).detune(), -8);
        assert_eq!(VoiceId::from_hash(0xffff_ffff).detune(), -1);
        let mut rng = Rand32::new(0x1d);
        for _ in 0..1000 {
            let words = [rng.rand_u32(), rng.rand_u32(), rng.rand_u32()];
            let detune = VoiceId::from_words(&words).detune();
            assert!(detune != 0 && (-8..=8).contains(&detune));
        }
    }
}
