//! Column mixing matrices over GF(2^8).

/// An 8x8 matrix of field elements, row-major.
pub type Matrix = [[u8; 8]; 8];

/// Forward mixing matrix (circulant, first row `01 01 05 01 08 06 07 04`).
pub static MDS: Matrix = [
    [0x01, 0x01, 0x05, 0x01, 0x08, 0x06, 0x07, 0x04],
    [0x04, 0x01, 0x01, 0x05, 0x01, 0x08, 0x06, 0x07],
    [0x07, 0x04, 0x01, 0x01, 0x05, 0x01, 0x08, 0x06],
    [0x06, 0x07, 0x04, 0x01, 0x01, 0x05, 0x01, 0x08],
    [0x08, 0x06, 0x07, 0x04, 0x01, 0x01, 0x05, 0x01],
    [0x01, 0x08, 0x06, 0x07, 0x04, 0x01, 0x01, 0x05],
    [0x05, 0x01, 0x08, 0x06, 0x07, 0x04, 0x01, 0x01],
    [0x01, 0x05, 0x01, 0x08, 0x06, 0x07, 0x04, 0x01],
];

/// Inverse of [`MDS`].
pub static MDS_INV: Matrix = [
    [0xad, 0x95, 0x76, 0xa8, 0x2f, 0x49, 0xd7, 0xca],
    [0xca, 0xad, 0x95, 0x76, 0xa8, 0x2f, 0x49, 0xd7],
    [0xd7, 0xca, 0xad, 0x95, 0x76, 0xa8, 0x2f, 0x49],
    [0x49, 0xd7, 0xca, 0xad, 0x95, 0x76, 0xa8, 0x2f],
    [0x2f, 0x49, 0xd7, 0xca, 0xad, 0x95, 0x76, 0xa8],
    [0xa8, 0x2f, 0x49, 0xd7, 0xca, 0xad, 0x95, 0x76],
    [0x76, 0xa8, 0x2f, 0x49, 0xd7, 0xca, 0xad, 0x95],
    [0x95, 0x76, 0xa8, 0x2f, 0x49, 0xd7, 0xca, 0xad],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf::multiply;

    #[test]
    fn inverse_matrix_is_inverse() {
        for i in 0..8 {
            for j in 0..8 {
                let cell = (0..8).fold(0u8, |acc, k| acc ^ multiply(MDS[i][k], MDS_INV[k][j]));
                assert_eq!(cell, u8::from(i == j), "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn matrices_are_circulant() {
        for m in [&MDS, &MDS_INV] {
            for row in 1..8 {
                for col in 0..8 {
                    assert_eq!(m[row][col], m[0][(col + 8 - row) % 8]);
                }
            }
        }
    }
}
