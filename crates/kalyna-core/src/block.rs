//! Word buffer helpers.
//!
//! Blocks, keys and round keys are sequences of 64-bit words, least
//! significant word first. Whenever a word is viewed as bytes it is read
//! little-endian, independent of the host byte order.

/// A 64-bit cipher word.
pub type Word = u64;

/// Bytes in one [`Word`].
pub const WORD_BYTES: usize = 8;

/// Words in the largest supported block (512 bits).
pub const MAX_BLOCK_WORDS: usize = 8;

/// Words in the largest supported key (512 bits).
pub const MAX_KEY_WORDS: usize = 8;

/// Bytes in the largest supported block.
pub const MAX_BLOCK_BYTES: usize = MAX_BLOCK_WORDS * WORD_BYTES;

/// Scratch buffer large enough for the state of any variant.
pub(crate) type StateBuf = [Word; MAX_BLOCK_WORDS];

/// Decodes little-endian `bytes` into `words`.
///
/// # Panics
///
/// Panics if `bytes.len() != words.len() * 8`.
pub fn words_from_le_bytes(bytes: &[u8], words: &mut [Word]) {
    assert_eq!(bytes.len(), words.len() * WORD_BYTES, "byte/word length mismatch");
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(WORD_BYTES)) {
        let mut raw = [0u8; WORD_BYTES];
        raw.copy_from_slice(chunk);
        *word = Word::from_le_bytes(raw);
    }
}

/// Encodes `words` as little-endian bytes into `bytes`.
///
/// # Panics
///
/// Panics if `bytes.len() != words.len() * 8`.
pub fn words_to_le_bytes(words: &[Word], bytes: &mut [u8]) {
    assert_eq!(bytes.len(), words.len() * WORD_BYTES, "byte/word length mismatch");
    for (word, chunk) in words.iter().zip(bytes.chunks_exact_mut(WORD_BYTES)) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

/// Adds `rhs` into `dst` word by word, modulo 2^64.
#[inline]
pub fn add_in_place(dst: &mut [Word], rhs: &[Word]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d = d.wrapping_add(*r);
    }
}

/// Subtracts `rhs` from `dst` word by word, modulo 2^64.
#[inline]
pub fn sub_in_place(dst: &mut [Word], rhs: &[Word]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d = d.wrapping_sub(*r);
    }
}

/// XORs `rhs` into `dst` word by word.
#[inline]
pub fn xor_in_place(dst: &mut [Word], rhs: &[Word]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Clears a scratch buffer that held key-derived material.
///
/// With the `zeroize` feature the writes are not optimized away.
#[cfg(feature = "zeroize")]
pub(crate) fn wipe<T: zeroize::DefaultIsZeroes>(buf: &mut [T]) {
    zeroize::Zeroize::zeroize(buf);
}

/// Clears a scratch buffer that held key-derived material.
#[cfg(not(feature = "zeroize"))]
pub(crate) fn wipe<T: Copy + Default>(buf: &mut [T]) {
    buf.fill(T::default());
}

/// Rotates the little-endian byte image of `words` left by `count` bytes.
///
/// The leading `count` bytes move to the end; everything else shifts down.
pub(crate) fn rotate_bytes_left(words: &mut [Word], count: usize) {
    let len = words.len() * WORD_BYTES;
    let mut bytes = [0u8; MAX_BLOCK_BYTES];
    words_to_le_bytes(words, &mut bytes[..len]);
    bytes[..len].rotate_left(count % len);
    words_from_le_bytes(&bytes[..len], words);
    wipe(&mut bytes[..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_conversion() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let mut words = [0; 2];
        words_from_le_bytes(&bytes, &mut words);
        assert_eq!(words, [0x0706050403020100, 0x0f0e0d0c0b0a0908]);

        let mut back = [0u8; 16];
        words_to_le_bytes(&words, &mut back);
        assert_eq!(&back[..], &bytes[..]);
    }

    #[test]
    #[should_panic(expected = "byte/word length mismatch")]
    fn conversion_rejects_mismatched_lengths() {
        let mut words = [0; 2];
        words_from_le_bytes(&[0u8; 15], &mut words);
    }

    #[test]
    fn add_and_sub_wrap() {
        let mut state = [Word::MAX, 1];
        add_in_place(&mut state, &[2, 3]);
        assert_eq!(state, [1, 4]);
        sub_in_place(&mut state, &[2, 3]);
        assert_eq!(state, [Word::MAX, 1]);
    }

    #[test]
    fn xor_is_self_inverse() {
        let mut state = [0xdead_beef, 0x1234];
        xor_in_place(&mut state, &[0xffff, 0xffff]);
        xor_in_place(&mut state, &[0xffff, 0xffff]);
        assert_eq!(state, [0xdead_beef, 0x1234]);
    }

    #[test]
    fn wipe_clears_words_and_bytes() {
        let mut words = [0x0123_4567_89ab_cdef as Word; MAX_BLOCK_WORDS];
        wipe(&mut words[..]);
        assert_eq!(words, [0; MAX_BLOCK_WORDS]);

        let mut bytes = [0xa5u8; MAX_BLOCK_BYTES];
        wipe(&mut bytes[..3]);
        assert_eq!(&bytes[..3], &[0, 0, 0]);
        assert!(bytes[3..].iter().all(|&b| b == 0xa5));
    }

    #[test]
    fn byte_rotation_crosses_word_boundaries() {
        let mut words = [0x0706050403020100, 0x0f0e0d0c0b0a0908];
        rotate_bytes_left(&mut words, 7);
        assert_eq!(words, [0x0e0d0c0b0a090807, 0x060504030201000f]);
    }
}
