//! Arithmetic in GF(2^8) for the column mixing step.

/// Reduction polynomial x^8 + x^4 + x^3 + x^2 + 1.
pub const REDUCTION_POLYNOMIAL: u16 = 0x011d;

/// Multiplies two field elements modulo [`REDUCTION_POLYNOMIAL`].
pub fn multiply(mut x: u8, mut y: u8) -> u8 {
    let mut product = 0u8;
    for _ in 0..8 {
        if y & 1 != 0 {
            product ^= x;
        }
        let hi_bit_set = x & 0x80;
        x <<= 1;
        if hi_bit_set != 0 {
            x ^= REDUCTION_POLYNOMIAL as u8;
        }
        y >>= 1;
    }
    product
}
