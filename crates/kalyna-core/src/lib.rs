//! Kalyna (DSTU 7624:2014) block cipher engine.
//!
//! This crate implements the Ukrainian national block cipher standard and
//! provides:
//! - All five block/key size variants (128/128, 128/256, 256/256, 256/512,
//!   512/512), resolved once into a [`Variant`].
//! - The key schedule, producing `nr + 1` round keys.
//! - Single-block enciphering and deciphering over 64-bit little-endian words,
//!   plus byte-oriented convenience wrappers.
//!
//! No chaining modes or padding are provided; callers layer those on top.
//! The implementation is table-driven and makes no constant-time guarantees.
//!
//! ```
//! use kalyna_core::Kalyna;
//!
//! let mut cipher = Kalyna::new(128, 128)?;
//! cipher.expand_key(&[0x0706050403020100, 0x0f0e0d0c0b0a0908])?;
//!
//! let mut block = [0x1716151413121110, 0x1f1e1d1c1b1a1918];
//! cipher.encipher_in_place(&mut block)?;
//! assert_eq!(block, [0x20ac9b777d1cbf81, 0x06add2b439eac9e1]);
//! # Ok::<(), kalyna_core::KalynaError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod gf;
pub mod kat;
mod key;
mod mds;
mod round;
mod sbox;
mod schedule;
mod variant;

pub use crate::block::{
    words_from_le_bytes, words_to_le_bytes, Word, MAX_BLOCK_WORDS, MAX_KEY_WORDS, WORD_BYTES,
};
pub use crate::cipher::{decipher_block, encipher_block, Kalyna};
pub use crate::error::KalynaError;
pub use crate::gf::{multiply as multiply_gf, REDUCTION_POLYNOMIAL};
pub use crate::key::RoundKeys;
pub use crate::mds::{Matrix, MDS, MDS_INV};
pub use crate::round::{
    add_round_key, decipher_round, encipher_round, inv_mix_columns, inv_shift_rows,
    inv_sub_bytes, mix_columns, shift_rows, sub_bytes, sub_round_key, xor_round_key,
};
pub use crate::sbox::{SboxSet, INV_SBOXES, SBOXES};
pub use crate::schedule::expand_key;
pub use crate::variant::{Variant, MAX_ROUNDS};
