//! Kalyna round transformations.
//!
//! The state is a slice of `nb` words viewed as an 8-row by `nb`-column byte
//! matrix: row `r`, column `c` is byte `r` of word `c`.

use crate::block::{
    add_in_place, sub_in_place, xor_in_place, StateBuf, Word, MAX_BLOCK_WORDS, WORD_BYTES,
};
use crate::gf::multiply;
use crate::mds::{Matrix, MDS, MDS_INV};
use crate::sbox::{substitute_word, SboxSet, INV_SBOXES, SBOXES};

const ROWS: usize = WORD_BYTES;

#[inline]
fn substitute(state: &mut [Word], tables: &SboxSet) {
    for word in state.iter_mut() {
        *word = substitute_word(*word, tables);
    }
}

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut [Word]) {
    substitute(state, &SBOXES);
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut [Word]) {
    substitute(state, &INV_SBOXES);
}

/// Columns by which `row` is rotated; rows are shifted in groups of `8 / nb`.
#[inline]
fn row_shift(row: usize, nb: usize) -> usize {
    row * nb / ROWS
}

#[inline]
fn state_width(state: &[Word]) -> usize {
    let nb = state.len();
    assert!(
        (1..=MAX_BLOCK_WORDS).contains(&nb),
        "state of {nb} words is outside 1..={MAX_BLOCK_WORDS}"
    );
    nb
}

#[inline]
fn get_byte(word: Word, row: usize) -> Word {
    (word >> (8 * row)) & 0xff
}

/// Performs ShiftRows in place.
///
/// # Panics
///
/// Panics if the state is empty or wider than [`MAX_BLOCK_WORDS`].
pub fn shift_rows(state: &mut [Word]) {
    let nb = state_width(state);
    let mut shifted: StateBuf = [0; 8];
    for row in 0..ROWS {
        let shift = row_shift(row, nb);
        for col in 0..nb {
            shifted[(col + shift) % nb] |= get_byte(state[col], row) << (8 * row);
        }
    }
    state.copy_from_slice(&shifted[..nb]);
}

/// Performs the inverse of ShiftRows in place.
///
/// # Panics
///
/// Panics if the state is empty or wider than [`MAX_BLOCK_WORDS`].
pub fn inv_shift_rows(state: &mut [Word]) {
    let nb = state_width(state);
    let mut shifted: StateBuf = [0; 8];
    for row in 0..ROWS {
        let shift = row_shift(row, nb);
        for col in 0..nb {
            shifted[col] |= get_byte(state[(col + shift) % nb], row) << (8 * row);
        }
    }
    state.copy_from_slice(&shifted[..nb]);
}

fn mix_single_column(column: Word, matrix: &Matrix) -> Word {
    let input = column.to_le_bytes();
    let mut output = [0u8; ROWS];
    for (out, coefficients) in output.iter_mut().zip(matrix.iter()) {
        *out = coefficients
            .iter()
            .zip(input.iter())
            .fold(0, |acc, (&m, &b)| acc ^ multiply(b, m));
    }
    Word::from_le_bytes(output)
}

/// MixColumns over every column of the state.
#[inline]
pub fn mix_columns(state: &mut [Word]) {
    for column in state.iter_mut() {
        *column = mix_single_column(*column, &MDS);
    }
}

/// Inverse MixColumns over every column of the state.
#[inline]
pub fn inv_mix_columns(state: &mut [Word]) {
    for column in state.iter_mut() {
        *column = mix_single_column(*column, &MDS_INV);
    }
}

/// One full forward round: SubBytes, ShiftRows, MixColumns.
pub fn encipher_round(state: &mut [Word]) {
    sub_bytes(state);
    shift_rows(state);
    mix_columns(state);
}

/// One full inverse round: InvMixColumns, InvShiftRows, InvSubBytes.
pub fn decipher_round(state: &mut [Word]) {
    inv_mix_columns(state);
    inv_shift_rows(state);
    inv_sub_bytes(state);
}

/// Adds a round key into the state, word by word modulo 2^64.
#[inline]
pub fn add_round_key(state: &mut [Word], round_key: &[Word]) {
    add_in_place(state, round_key);
}

/// Subtracts a round key from the state; undoes [`add_round_key`].
#[inline]
pub fn sub_round_key(state: &mut [Word], round_key: &[Word]) {
    sub_in_place(state, round_key);
}

/// XORs a round key into the state.
#[inline]
pub fn xor_round_key(state: &mut [Word], round_key: &[Word]) {
    xor_in_place(state, round_key);
}
