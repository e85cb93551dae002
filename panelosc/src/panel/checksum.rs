//! Fast firmware fingerprint.
//!
//! There is no reliable firmware version word in the host image, so
//! compatibility is decided by hashing the first 12KiB of code instead.  The
//! hash has to run inside the host's init timeout, so it is a sum per block
//! of eight words folded into a xorshift state.

/// Words per block
const BLOCK_WORDS: usize = 8;
/// Blocks hashed (12KiB of 32 bit words)
const BLOCKS: usize = 384;
/// Number of 32 bit words the hash covers
pub const FIRMWARE_WORDS: usize = BLOCK_WORDS * BLOCKS;
/// Initial hash state
const SEED: u32 = 0x1200;

/// Hash the start of a firmware image.
///
/// Returns `None` when the image is shorter than [FIRMWARE_WORDS]; any words
/// past that are ignored.
pub fn firmware_hash(words: &[u32]) -> Option<u32> {
    let words = words.get(..FIRMWARE_WORDS)?;
    Some(words.chunks_exact(BLOCK_WORDS).fold(SEED, mix_block))
}

fn mix_block(mut hash: u32, block: &[u32]) -> u32 {
    let partial = block.iter().fold(0u32, |acc, w| acc.wrapping_add(*w));
    hash ^= partial;
    hash ^= hash << 13;
    hash ^= hash >> 17;
    hash ^= hash << 5;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block() {
        let block: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(mix_block(SEED, &block), 0x4ad6_f3c6);
    }
    #[test]
    fn known_images() {
        let zeros = [0u32; FIRMWARE_WORDS];
        assert_eq!(firmware_hash(&zeros), Some(0xf737_14cf));
        let mut ramp = [0u32; FIRMWARE_WORDS + 16];
        for (i, word) in ramp.iter_mut().enumerate() {
            *word = i as u32;
        }
        assert_eq!(firmware_hash(&ramp[..FIRMWARE_WORDS]), Some(0x0c53_c186));
        // trailing words are not covered
        assert_eq!(firmware_hash(&ramp), Some(0x0c53_c186));
    }
    #[test]
    fn short_images_have_no_hash() {
        let short = [0u32; FIRMWARE_WORDS - 1];
        assert_eq!(firmware_hash(&short), None);
        assert_eq!(firmware_hash(&[]), None);
    }
}
