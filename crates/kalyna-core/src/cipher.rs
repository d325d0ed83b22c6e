//! Kalyna context and block encipher/decipher driver.

use log::debug;

use crate::block::{
    wipe, words_from_le_bytes, words_to_le_bytes, StateBuf, Word, MAX_KEY_WORDS,
};
use crate::error::KalynaError;
use crate::key::RoundKeys;
use crate::round::{add_round_key, decipher_round, encipher_round, sub_round_key, xor_round_key};
use crate::schedule;
use crate::variant::Variant;

/// Enciphers one block in place with pre-expanded round keys.
///
/// # Panics
///
/// Panics if `block` does not hold exactly as many words as each round key.
pub fn encipher_block(block: &mut [Word], round_keys: &RoundKeys) {
    check_block_shape(block, round_keys);
    let nr = round_keys.len() - 1;

    add_round_key(block, round_keys.get(0));
    for round in 1..nr {
        encipher_round(block);
        xor_round_key(block, round_keys.get(round));
    }
    encipher_round(block);
    add_round_key(block, round_keys.get(nr));
}

/// Deciphers one block in place with pre-expanded round keys.
///
/// # Panics
///
/// Panics if `block` does not hold exactly as many words as each round key.
pub fn decipher_block(block: &mut [Word], round_keys: &RoundKeys) {
    check_block_shape(block, round_keys);
    let nr = round_keys.len() - 1;

    sub_round_key(block, round_keys.get(nr));
    for round in (1..nr).rev() {
        decipher_round(block);
        xor_round_key(block, round_keys.get(round));
    }
    decipher_round(block);
    sub_round_key(block, round_keys.get(0));
}

#[inline]
fn check_block_shape(block: &[Word], round_keys: &RoundKeys) {
    assert_eq!(
        block.len(),
        round_keys.words_per_key(),
        "block length does not match round key length"
    );
}

/// A Kalyna cipher context bound to one [`Variant`].
///
/// The context is created unkeyed; [`Kalyna::expand_key`] installs a round-key
/// table, which later encipher/decipher calls only read. Every block operation
/// works on its own stack buffer, so a keyed context can be shared between
/// threads by reference.
#[derive(Clone, Debug)]
pub struct Kalyna {
    variant: Variant,
    round_keys: Option<RoundKeys>,
}

impl Kalyna {
    /// Creates an unkeyed context for a block/key size pair, in bits.
    pub fn new(block_bits: usize, key_bits: usize) -> Result<Self, KalynaError> {
        Ok(Self::with_variant(Variant::from_sizes(block_bits, key_bits)?))
    }

    /// Creates an unkeyed context for `variant`.
    pub fn with_variant(variant: Variant) -> Self {
        debug!(
            "initialized {variant} context (nb={}, nk={}, nr={})",
            variant.nb(),
            variant.nk(),
            variant.nr()
        );
        Self {
            variant,
            round_keys: None,
        }
    }

    /// The variant this context was built for.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether a round-key table is installed.
    pub fn is_keyed(&self) -> bool {
        self.round_keys.is_some()
    }

    /// The installed round-key table, if any.
    pub fn round_keys(&self) -> Option<&RoundKeys> {
        self.round_keys.as_ref()
    }

    /// Derives and installs the round keys for `key` (exactly `nk` words),
    /// replacing any previous table.
    pub fn expand_key(&mut self, key: &[Word]) -> Result<(), KalynaError> {
        let round_keys = schedule::expand_key(self.variant, key)?;
        debug!("{}: expanded {} round keys", self.variant, round_keys.len());
        self.round_keys = Some(round_keys);
        Ok(())
    }

    /// Like [`Kalyna::expand_key`], taking the key as little-endian bytes.
    pub fn expand_key_bytes(&mut self, key: &[u8]) -> Result<(), KalynaError> {
        let expected = self.variant.key_bytes();
        if key.len() != expected {
            return Err(KalynaError::InvalidKeyLength {
                expected,
                actual: key.len(),
            });
        }
        let mut words = [0 as Word; MAX_KEY_WORDS];
        let words = &mut words[..self.variant.nk()];
        words_from_le_bytes(key, words);
        let result = self.expand_key(words);
        wipe(words);
        result
    }

    /// Drops the round-key table, wiping it when the `zeroize` feature is on.
    ///
    /// The context returns to the unkeyed state. Calling this more than once
    /// is harmless.
    pub fn release(&mut self) {
        if self.round_keys.take().is_some() {
            debug!("{}: round keys released", self.variant);
        }
    }

    /// Enciphers `plaintext` into `ciphertext`; both must be `nb` words.
    ///
    /// # Panics
    ///
    /// Panics if no key has been expanded (or it was released).
    pub fn encipher(
        &self,
        plaintext: &[Word],
        ciphertext: &mut [Word],
    ) -> Result<(), KalynaError> {
        self.check_block(plaintext.len())?;
        self.check_block(ciphertext.len())?;
        ciphertext.copy_from_slice(plaintext);
        encipher_block(ciphertext, self.keys());
        Ok(())
    }

    /// Deciphers `ciphertext` into `plaintext`; both must be `nb` words.
    ///
    /// # Panics
    ///
    /// Panics if no key has been expanded (or it was released).
    pub fn decipher(
        &self,
        ciphertext: &[Word],
        plaintext: &mut [Word],
    ) -> Result<(), KalynaError> {
        self.check_block(ciphertext.len())?;
        self.check_block(plaintext.len())?;
        plaintext.copy_from_slice(ciphertext);
        decipher_block(plaintext, self.keys());
        Ok(())
    }

    /// Enciphers an `nb`-word block in place.
    ///
    /// # Panics
    ///
    /// Panics if no key has been expanded (or it was released).
    pub fn encipher_in_place(&self, block: &mut [Word]) -> Result<(), KalynaError> {
        self.check_block(block.len())?;
        encipher_block(block, self.keys());
        Ok(())
    }

    /// Deciphers an `nb`-word block in place.
    ///
    /// # Panics
    ///
    /// Panics if no key has been expanded (or it was released).
    pub fn decipher_in_place(&self, block: &mut [Word]) -> Result<(), KalynaError> {
        self.check_block(block.len())?;
        decipher_block(block, self.keys());
        Ok(())
    }

    /// Enciphers a block given as little-endian bytes (`nb * 8` of them).
    ///
    /// # Panics
    ///
    /// Panics if no key has been expanded (or it was released).
    pub fn encipher_bytes(
        &self,
        plaintext: &[u8],
        ciphertext: &mut [u8],
    ) -> Result<(), KalynaError> {
        self.apply_bytes(plaintext, ciphertext, encipher_block)
    }

    /// Deciphers a block given as little-endian bytes (`nb * 8` of them).
    ///
    /// # Panics
    ///
    /// Panics if no key has been expanded (or it was released).
    pub fn decipher_bytes(
        &self,
        ciphertext: &[u8],
        plaintext: &mut [u8],
    ) -> Result<(), KalynaError> {
        self.apply_bytes(ciphertext, plaintext, decipher_block)
    }

    fn apply_bytes(
        &self,
        input: &[u8],
        output: &mut [u8],
        op: fn(&mut [Word], &RoundKeys),
    ) -> Result<(), KalynaError> {
        let expected = self.variant.block_bytes();
        for len in [input.len(), output.len()] {
            if len != expected {
                return Err(KalynaError::InvalidBlockLength {
                    expected,
                    actual: len,
                });
            }
        }
        let mut state: StateBuf = [0; 8];
        let state = &mut state[..self.variant.nb()];
        words_from_le_bytes(input, state);
        op(state, self.keys());
        words_to_le_bytes(state, output);
        Ok(())
    }

    fn check_block(&self, len: usize) -> Result<(), KalynaError> {
        let expected = self.variant.nb();
        if len == expected {
            Ok(())
        } else {
            Err(KalynaError::InvalidBlockLength {
                expected,
                actual: len,
            })
        }
    }

    fn keys(&self) -> &RoundKeys {
        match &self.round_keys {
            Some(keys) => keys,
            None => panic!("{}: cipher used before expand_key", self.variant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::MAX_BLOCK_WORDS;
    use rand::RngCore;

    const KEY: [Word; 2] = [0x0706050403020100, 0x0f0e0d0c0b0a0908];
    const PLAIN: [Word; 2] = [0x1716151413121110, 0x1f1e1d1c1b1a1918];
    const CIPHER: [Word; 2] = [0x20ac9b777d1cbf81, 0x06add2b439eac9e1];

    fn keyed_128() -> Kalyna {
        let mut cipher = Kalyna::new(128, 128).unwrap();
        cipher.expand_key(&KEY).unwrap();
        cipher
    }

    #[test]
    fn encipher_matches_standard_vector() {
        let cipher = keyed_128();
        let mut ct = [0; 2];
        cipher.encipher(&PLAIN, &mut ct).unwrap();
        assert_eq!(ct, CIPHER);
    }

    #[test]
    fn decipher_matches_standard_vector() {
        let cipher = keyed_128();
        let mut pt = [0; 2];
        cipher.decipher(&CIPHER, &mut pt).unwrap();
        assert_eq!(pt, PLAIN);
    }

    #[test]
    fn byte_api_matches_word_api() {
        let cipher = keyed_128();
        let plain: Vec<u8> = (0x10u8..0x20).collect();
        let mut ct = [0u8; 16];
        cipher.encipher_bytes(&plain, &mut ct).unwrap();
        let mut expected = [0u8; 16];
        words_to_le_bytes(&CIPHER, &mut expected);
        assert_eq!(ct, expected);

        let mut keyed_by_bytes = Kalyna::with_variant(Variant::Kalyna128_128);
        let key: Vec<u8> = (0u8..16).collect();
        keyed_by_bytes.expand_key_bytes(&key).unwrap();
        assert_eq!(keyed_by_bytes.round_keys(), cipher.round_keys());
    }

    #[test]
    fn in_place_round_trip_random() {
        let mut rng = rand::thread_rng();
        for variant in Variant::ALL {
            let mut cipher = Kalyna::with_variant(variant);
            for _ in 0..20 {
                let key: Vec<Word> = (0..variant.nk()).map(|_| rng.next_u64()).collect();
                let block: Vec<Word> = (0..variant.nb()).map(|_| rng.next_u64()).collect();
                cipher.expand_key(&key).unwrap();
                let mut state = block.clone();
                cipher.encipher_in_place(&mut state).unwrap();
                assert_ne!(state, block);
                cipher.decipher_in_place(&mut state).unwrap();
                assert_eq!(state, block, "{variant}");
            }
        }
    }

    #[test]
    fn rejects_bad_lengths() {
        let mut cipher = keyed_128();
        let mut out = [0; 4];
        assert_eq!(
            cipher.encipher(&[0; 4], &mut out),
            Err(KalynaError::InvalidBlockLength {
                expected: 2,
                actual: 4
            })
        );
        assert_eq!(
            cipher.decipher_bytes(&[0u8; 15], &mut [0u8; 16]),
            Err(KalynaError::InvalidBlockLength {
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(
            cipher.expand_key_bytes(&[0u8; 32]),
            Err(KalynaError::InvalidKeyLength {
                expected: 16,
                actual: 32
            })
        );
        // A rejected key leaves the previous table installed.
        assert!(cipher.is_keyed());
    }

    #[test]
    fn rejects_unsupported_variant() {
        assert_eq!(
            Kalyna::new(192, 192).unwrap_err(),
            KalynaError::UnsupportedVariant {
                block_bits: 192,
                key_bits: 192
            }
        );
    }

    #[test]
    fn release_is_idempotent() {
        let mut cipher = keyed_128();
        cipher.release();
        assert!(!cipher.is_keyed());
        cipher.release();
        assert!(cipher.round_keys().is_none());

        cipher.expand_key(&KEY).unwrap();
        let mut ct = [0; 2];
        cipher.encipher(&PLAIN, &mut ct).unwrap();
        assert_eq!(ct, CIPHER);
    }

    #[test]
    #[should_panic(expected = "block length does not match round key length")]
    fn encipher_block_rejects_short_block() {
        let mut cipher = Kalyna::with_variant(Variant::Kalyna512_512);
        cipher.expand_key(&[0x0123_4567_89ab_cdef; 8]).unwrap();
        let mut block = [0; 2];
        encipher_block(&mut block, cipher.round_keys().unwrap());
    }

    #[test]
    #[should_panic(expected = "block length does not match round key length")]
    fn decipher_block_rejects_oversized_block() {
        let cipher = keyed_128();
        let mut block = [0; MAX_BLOCK_WORDS + 1];
        decipher_block(&mut block, cipher.round_keys().unwrap());
    }

    #[test]
    #[should_panic(expected = "cipher used before expand_key")]
    fn encipher_without_key_panics() {
        let cipher = Kalyna::with_variant(Variant::Kalyna256_256);
        let mut block = [0; 4];
        let _ = cipher.encipher_in_place(&mut block);
    }

    #[test]
    #[should_panic(expected = "cipher used before expand_key")]
    fn decipher_after_release_panics() {
        let mut cipher = keyed_128();
        cipher.release();
        let mut block = [0; 2];
        let _ = cipher.decipher_in_place(&mut block);
    }
}
