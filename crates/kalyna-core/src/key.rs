//! Round-key storage.

use core::fmt;

use crate::block::{Word, MAX_BLOCK_WORDS};
use crate::variant::{Variant, MAX_ROUNDS};

/// Round keys for the largest variant: `MAX_ROUNDS + 1` of them.
const MAX_ROUND_KEYS: usize = MAX_ROUNDS + 1;

/// Expanded round keys, indexed `0..=nr`, each `nb` words long.
///
/// Storage is a fixed-size array sized for the largest variant, so building
/// or replacing a table never touches the heap.
#[derive(Clone, PartialEq, Eq)]
pub struct RoundKeys {
    keys: [[Word; MAX_BLOCK_WORDS]; MAX_ROUND_KEYS],
    nb: usize,
    count: usize,
}

impl RoundKeys {
    /// An all-zero table shaped for `variant`.
    pub(crate) fn zeroed(variant: Variant) -> Self {
        Self {
            keys: [[0; MAX_BLOCK_WORDS]; MAX_ROUND_KEYS],
            nb: variant.nb(),
            count: variant.nr() + 1,
        }
    }

    /// Number of round keys (`nr + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false; every variant has at least eleven round keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Words per round key (`nb`).
    #[inline]
    pub fn words_per_key(&self) -> usize {
        self.nb
    }

    /// Returns the round key at the requested index (`0..=nr`).
    ///
    /// # Panics
    ///
    /// Panics if `round` is past the last round key.
    #[inline]
    pub fn get(&self, round: usize) -> &[Word] {
        assert!(round < self.count, "round key {round} out of range");
        &self.keys[round][..self.nb]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, round: usize) -> &mut [Word] {
        &mut self.keys[round][..self.nb]
    }

    /// Iterates over the round keys in index order.
    pub fn iter(&self) -> impl Iterator<Item = &[Word]> + '_ {
        self.keys[..self.count].iter().map(move |key| &key[..self.nb])
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundKeys {{ count: {}, nb: {}, .. }}", self.count, self.nb)
    }
}

#[cfg(feature = "zeroize")]
impl Drop for RoundKeys {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        for key in self.keys.iter_mut() {
            key.zeroize();
        }
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::ZeroizeOnDrop for RoundKeys {}
