//! DSTU 7624:2014 known-answer vectors.
//!
//! The standard's vectors use byte-sequential inputs: for enciphering the key
//! is `00 01 02 ..` and the plaintext continues the count; for deciphering
//! both sequences are reversed.

use crate::cipher::Kalyna;
use crate::error::KalynaError;
use crate::variant::Variant;

/// Which block operation a vector exercises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encipher,
    /// Ciphertext in, plaintext out.
    Decipher,
}

/// One known-answer vector.
#[derive(Debug)]
pub struct KnownAnswer {
    /// Variant under test.
    pub variant: Variant,
    /// Operation under test.
    pub direction: Direction,
    /// Expected output block, lowercase hex.
    pub expected: &'static str,
}

/// Encipher and decipher vectors for every variant.
pub const VECTORS: &[KnownAnswer] = &[
    KnownAnswer {
        variant: Variant::Kalyna128_128,
        direction: Direction::Encipher,
        expected: "81bf1c7d779bac20e1c9ea39b4d2ad06",
    },
    KnownAnswer {
        variant: Variant::Kalyna128_256,
        direction: Direction::Encipher,
        expected: "58ec3e091000158a1148f7166f334f14",
    },
    KnownAnswer {
        variant: Variant::Kalyna256_256,
        direction: Direction::Encipher,
        expected: "f66e3d570ec92135aedae323dcbd2a8ca03963ec206a0d5a88385c24617fd92c",
    },
    KnownAnswer {
        variant: Variant::Kalyna256_512,
        direction: Direction::Encipher,
        expected: "606990e9e6b7b67a4bd6d893d72268b78e02c83c3cd7e102fd2e74a8fdfe5dd9",
    },
    KnownAnswer {
        variant: Variant::Kalyna512_512,
        direction: Direction::Encipher,
        expected: "4a26e31b811c356aa61dd6ca0596231a67ba8354aa47f3a13e1deec320eb56b8\
                   95d0f417175bab662fd6f134bb15c86ccb906a26856efeb7c5bc6472940dd9d9",
    },
    KnownAnswer {
        variant: Variant::Kalyna128_128,
        direction: Direction::Decipher,
        expected: "7291ef2b470cc7846f09c2303973dad7",
    },
    KnownAnswer {
        variant: Variant::Kalyna128_256,
        direction: Direction::Decipher,
        expected: "f36db456cefddfe1b45b5f7030cad996",
    },
    KnownAnswer {
        variant: Variant::Kalyna256_256,
        direction: Direction::Decipher,
        expected: "7fc5237896674e8603c1e9b03f8b4ba3ab5b7c592c3fc3d361edd12586b20fe3",
    },
    KnownAnswer {
        variant: Variant::Kalyna256_512,
        direction: Direction::Decipher,
        expected: "18317a2767dad482bccd07b9a1788d075e7098189e5f84972d0b916d79ba6ae0",
    },
    KnownAnswer {
        variant: Variant::Kalyna512_512,
        direction: Direction::Decipher,
        expected: "ce80843325a052521bead714e6a9d829fd381e0ee9a845bd92044554d9fa46a3\
                   757fefdb853bb1f297ff9d833b75e66aaf4157abb5291bdcf094bb13aa5aff22",
    },
];

impl KnownAnswer {
    fn sequence(&self, start: usize, len: usize) -> Vec<u8> {
        let mut bytes: Vec<u8> = (start..start + len).map(|b| b as u8).collect();
        if self.direction == Direction::Decipher {
            bytes.reverse();
        }
        bytes
    }

    /// Master key bytes.
    pub fn key(&self) -> Vec<u8> {
        self.sequence(0, self.variant.key_bytes())
    }

    /// Input block bytes.
    pub fn input(&self) -> Vec<u8> {
        self.sequence(self.variant.key_bytes(), self.variant.block_bytes())
    }

    /// Runs the vector and returns the output block as hex.
    pub fn run(&self) -> Result<String, KalynaError> {
        let mut cipher = Kalyna::with_variant(self.variant);
        cipher.expand_key_bytes(&self.key())?;
        let input = self.input();
        let mut output = vec![0u8; input.len()];
        match self.direction {
            Direction::Encipher => cipher.encipher_bytes(&input, &mut output)?,
            Direction::Decipher => cipher.decipher_bytes(&input, &mut output)?,
        }
        Ok(hex::encode(output))
    }

    /// Whether the vector reproduces its expected output.
    pub fn passes(&self) -> Result<bool, KalynaError> {
        Ok(self.run()? == self.expected)
    }
}
