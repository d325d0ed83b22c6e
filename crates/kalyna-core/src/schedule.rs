//! Kalyna key schedule.
//!
//! Round keys are derived in three phases:
//!
//! 1. an intermediate key `kt` is produced by enciphering a size-dependent
//!    constant under the master key;
//! 2. even-indexed round keys are produced by enciphering (a rotating copy
//!    of) the master key under `kt` offset by a tweak that doubles each step;
//! 3. each odd-indexed round key is a byte rotation of its even predecessor.

use log::trace;

use crate::block::{rotate_bytes_left, wipe, StateBuf, Word, MAX_KEY_WORDS};
use crate::error::KalynaError;
use crate::key::RoundKeys;
use crate::round::{add_round_key, encipher_round, xor_round_key};
use crate::variant::Variant;

/// Initial tweak word: 0x0001 in each 16-bit lane.
const TWEAK_SEED: Word = 0x0001_0001_0001_0001;

/// Expands `key` (exactly `nk` words) into the `nr + 1` round keys of `variant`.
pub fn expand_key(variant: Variant, key: &[Word]) -> Result<RoundKeys, KalynaError> {
    if key.len() != variant.nk() {
        return Err(KalynaError::InvalidKeyLength {
            expected: variant.nk(),
            actual: key.len(),
        });
    }

    let mut round_keys = RoundKeys::zeroed(variant);
    let mut kt: StateBuf = [0; 8];
    let kt = &mut kt[..variant.nb()];
    intermediate_key(variant, key, kt);
    trace!("{variant}: intermediate key ready");
    even_round_keys(variant, key, kt, &mut round_keys);
    wipe(kt);
    trace!("{variant}: even round keys ready");
    odd_round_keys(variant, &mut round_keys);
    Ok(round_keys)
}

/// Writes the intermediate key `kt` (`nb` words) into `state`.
fn intermediate_key(variant: Variant, key: &[Word], state: &mut [Word]) {
    let nb = variant.nb();
    state.fill(0);
    state[0] = state[0].wrapping_add((nb + variant.nk() + 1) as Word);

    let k0 = &key[..nb];
    let k1 = if variant.nk() == nb {
        k0
    } else {
        &key[nb..2 * nb]
    };

    add_round_key(state, k0);
    encipher_round(state);
    xor_round_key(state, k1);
    encipher_round(state);
    add_round_key(state, k0);
    encipher_round(state);
}

/// Enciphers `source` under `kt + tweak`, writing the result into `out`.
fn derive_round_key(kt: &[Word], tweak: &[Word], source: &[Word], out: &mut [Word]) {
    let nb = kt.len();
    let mut kt_round: StateBuf = [0; 8];
    let kt_round = &mut kt_round[..nb];
    kt_round.copy_from_slice(kt);
    add_round_key(kt_round, tweak);

    out.copy_from_slice(&source[..nb]);
    add_round_key(out, kt_round);
    encipher_round(out);
    xor_round_key(out, kt_round);
    encipher_round(out);
    add_round_key(out, kt_round);
    wipe(kt_round);
}

/// Shifts every tweak word left by one bit; no carry crosses words.
fn advance_tweak(tweak: &mut [Word]) {
    for word in tweak.iter_mut() {
        *word <<= 1;
    }
}

fn even_round_keys(variant: Variant, key: &[Word], kt: &[Word], round_keys: &mut RoundKeys) {
    let (nb, nk, nr) = (variant.nb(), variant.nk(), variant.nr());

    let mut tweak: StateBuf = [0; 8];
    let tweak = &mut tweak[..nb];
    tweak.fill(TWEAK_SEED);

    let mut cursor = [0 as Word; MAX_KEY_WORDS];
    let cursor = &mut cursor[..nk];
    cursor.copy_from_slice(key);

    let mut round = 0;
    loop {
        derive_round_key(kt, tweak, &cursor[..nb], round_keys.get_mut(round));
        if round == nr {
            break;
        }

        // A double-length key yields a second round key from its upper half.
        if nk != nb {
            round += 2;
            advance_tweak(tweak);
            derive_round_key(kt, tweak, &cursor[nb..], round_keys.get_mut(round));
            if round == nr {
                break;
            }
        }

        round += 2;
        advance_tweak(tweak);
        cursor.rotate_left(1);
    }
    wipe(cursor);
    wipe(tweak);
}

fn odd_round_keys(variant: Variant, round_keys: &mut RoundKeys) {
    let nb = variant.nb();
    for round in (1..variant.nr()).step_by(2) {
        let mut previous: StateBuf = [0; 8];
        previous[..nb].copy_from_slice(round_keys.get(round - 1));
        let odd = round_keys.get_mut(round);
        odd.copy_from_slice(&previous[..nb]);
        rotate_bytes_left(odd, 2 * nb + 3);
        wipe(&mut previous[..]);
    }
}
