//! The five standard block/key size combinations.

use core::fmt;
use core::str::FromStr;

use crate::block::WORD_BYTES;
use crate::error::KalynaError;

const WORD_BITS: usize = WORD_BYTES * 8;

/// Largest round count of any variant.
pub const MAX_ROUNDS: usize = 18;

/// A supported (block size, key size) configuration.
///
/// Everything downstream is parameterized by the word counts and round count
/// resolved here, once, at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 128-bit block, 128-bit key, 10 rounds.
    Kalyna128_128,
    /// 128-bit block, 256-bit key, 14 rounds.
    Kalyna128_256,
    /// 256-bit block, 256-bit key, 14 rounds.
    Kalyna256_256,
    /// 256-bit block, 512-bit key, 18 rounds.
    Kalyna256_512,
    /// 512-bit block, 512-bit key, 18 rounds.
    Kalyna512_512,
}

impl Variant {
    /// Every supported variant, smallest first.
    pub const ALL: [Variant; 5] = [
        Variant::Kalyna128_128,
        Variant::Kalyna128_256,
        Variant::Kalyna256_256,
        Variant::Kalyna256_512,
        Variant::Kalyna512_512,
    ];

    /// Resolves a block/key size pair, in bits.
    pub fn from_sizes(block_bits: usize, key_bits: usize) -> Result<Self, KalynaError> {
        match (block_bits, key_bits) {
            (128, 128) => Ok(Variant::Kalyna128_128),
            (128, 256) => Ok(Variant::Kalyna128_256),
            (256, 256) => Ok(Variant::Kalyna256_256),
            (256, 512) => Ok(Variant::Kalyna256_512),
            (512, 512) => Ok(Variant::Kalyna512_512),
            _ => Err(KalynaError::UnsupportedVariant {
                block_bits,
                key_bits,
            }),
        }
    }

    /// Block size in bits.
    pub const fn block_bits(self) -> usize {
        match self {
            Variant::Kalyna128_128 | Variant::Kalyna128_256 => 128,
            Variant::Kalyna256_256 | Variant::Kalyna256_512 => 256,
            Variant::Kalyna512_512 => 512,
        }
    }

    /// Key size in bits.
    pub const fn key_bits(self) -> usize {
        match self {
            Variant::Kalyna128_128 => 128,
            Variant::Kalyna128_256 | Variant::Kalyna256_256 => 256,
            Variant::Kalyna256_512 | Variant::Kalyna512_512 => 512,
        }
    }

    /// Block size in words.
    pub const fn nb(self) -> usize {
        self.block_bits() / WORD_BITS
    }

    /// Key size in words.
    pub const fn nk(self) -> usize {
        self.key_bits() / WORD_BITS
    }

    /// Number of rounds; depends only on the key size.
    pub const fn nr(self) -> usize {
        match self.key_bits() {
            128 => 10,
            256 => 14,
            _ => MAX_ROUNDS,
        }
    }

    /// Block size in bytes.
    pub const fn block_bytes(self) -> usize {
        self.nb() * WORD_BYTES
    }

    /// Key size in bytes.
    pub const fn key_bytes(self) -> usize {
        self.nk() * WORD_BYTES
    }

    /// `block-key` label without a path separator, e.g. `128-256`.
    ///
    /// Parses back through [`FromStr`].
    pub const fn short_name(self) -> &'static str {
        match self {
            Variant::Kalyna128_128 => "128-128",
            Variant::Kalyna128_256 => "128-256",
            Variant::Kalyna256_256 => "256-256",
            Variant::Kalyna256_512 => "256-512",
            Variant::Kalyna512_512 => "512-512",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kalyna-{}/{}", self.block_bits(), self.key_bits())
    }
}

impl FromStr for Variant {
    type Err = KalynaError;

    /// Accepts `128/256`, `128-256` or `kalyna-128/256`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KalynaError::InvalidVariantName(s.to_owned());
        let lowered = s.trim().to_ascii_lowercase();
        let sizes = lowered.strip_prefix("kalyna-").unwrap_or(&lowered);
        let (block, key) = sizes.split_once(['/', '-']).ok_or_else(invalid)?;
        let block_bits = block.parse().map_err(|_| invalid())?;
        let key_bits = key.parse().map_err(|_| invalid())?;
        Variant::from_sizes(block_bits, key_bits)
    }
}
