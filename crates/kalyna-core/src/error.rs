//! Error type for the cipher engine.

use thiserror::Error;

/// Errors reported by the Kalyna engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KalynaError {
    /// The block/key size pair is not one of the five standard variants.
    #[error("unsupported Kalyna variant: {block_bits}-bit block with {key_bits}-bit key")]
    UnsupportedVariant {
        /// Requested block size in bits.
        block_bits: usize,
        /// Requested key size in bits.
        key_bits: usize,
    },
    /// A variant name could not be parsed.
    #[error("unrecognised Kalyna variant name `{0}` (expected e.g. `128/256`)")]
    InvalidVariantName(String),
    /// The master key does not have the length the variant requires.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required length, in the unit of the API called (words or bytes).
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// A block buffer does not have the length the variant requires.
    #[error("invalid block length: expected {expected}, got {actual}")]
    InvalidBlockLength {
        /// Required length, in the unit of the API called (words or bytes).
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
}
