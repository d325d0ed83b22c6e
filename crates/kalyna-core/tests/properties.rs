use kalyna_core::{expand_key, Kalyna, Variant, Word};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_words(rng: &mut impl RngCore, len: usize) -> Vec<Word> {
    (0..len).map(|_| rng.next_u64()).collect()
}

fn hamming(a: &[Word], b: &[Word]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

#[test]
fn round_trip_both_directions() {
    let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
    for variant in Variant::ALL {
        let mut cipher = Kalyna::with_variant(variant);
        for _ in 0..25 {
            cipher.expand_key(&random_words(&mut rng, variant.nk())).unwrap();
            let block = random_words(&mut rng, variant.nb());
            let mut scratch = vec![0; variant.nb()];
            let mut back = vec![0; variant.nb()];

            cipher.encipher(&block, &mut scratch).unwrap();
            cipher.decipher(&scratch, &mut back).unwrap();
            assert_eq!(back, block, "{variant}: decipher(encipher(p))");

            cipher.decipher(&block, &mut scratch).unwrap();
            cipher.encipher(&scratch, &mut back).unwrap();
            assert_eq!(back, block, "{variant}: encipher(decipher(c))");
        }
    }
}

#[test]
fn deterministic() {
    let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
    for variant in Variant::ALL {
        let key = random_words(&mut rng, variant.nk());
        assert_eq!(expand_key(variant, &key), expand_key(variant, &key));

        let mut cipher = Kalyna::with_variant(variant);
        cipher.expand_key(&key).unwrap();
        let block = random_words(&mut rng, variant.nb());
        let mut first = block.clone();
        let mut second = block.clone();
        cipher.encipher_in_place(&mut first).unwrap();
        cipher.encipher_in_place(&mut second).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn rekeying_replaces_schedule() {
    let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
    let variant = Variant::Kalyna256_512;
    let key_a = random_words(&mut rng, variant.nk());
    let key_b = random_words(&mut rng, variant.nk());

    let mut cipher = Kalyna::with_variant(variant);
    cipher.expand_key(&key_a).unwrap();
    cipher.expand_key(&key_b).unwrap();
    assert_eq!(cipher.round_keys(), Some(&expand_key(variant, &key_b).unwrap()));
}

#[test]
fn round_key_table_shape() {
    let mut rng = ChaCha20Rng::from_seed([10u8; 32]);
    for variant in Variant::ALL {
        let keys = expand_key(variant, &random_words(&mut rng, variant.nk())).unwrap();
        assert_eq!(keys.len(), variant.nr() + 1);
        for (index, key) in keys.iter().enumerate() {
            assert_eq!(key.len(), variant.nb(), "{variant} key {index}");
        }

        // Odd keys are the even predecessor rotated left by 2 * nb + 3 bytes.
        let rotate = 2 * variant.nb() + 3;
        for round in (1..variant.nr()).step_by(2) {
            let mut even = Vec::new();
            let mut odd = Vec::new();
            for word in keys.get(round - 1) {
                even.extend_from_slice(&word.to_le_bytes());
            }
            for word in keys.get(round) {
                odd.extend_from_slice(&word.to_le_bytes());
            }
            even.rotate_left(rotate);
            assert_eq!(odd, even, "{variant} round {round}");
        }
    }
}

#[test]
fn independent_instances() {
    let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
    for variant in Variant::ALL {
        let mut a = Kalyna::with_variant(variant);
        let mut b = Kalyna::with_variant(variant);
        a.expand_key(&random_words(&mut rng, variant.nk())).unwrap();
        b.expand_key(&random_words(&mut rng, variant.nk())).unwrap();
        assert_ne!(a.round_keys(), b.round_keys());

        let block = random_words(&mut rng, variant.nb());
        let mut ct_a = block.clone();
        let mut ct_b = block.clone();
        a.encipher_in_place(&mut ct_a).unwrap();
        b.encipher_in_place(&mut ct_b).unwrap();
        assert_ne!(ct_a, ct_b, "{variant}");
    }
}

#[test]
fn avalanche() {
    const TRIALS: u32 = 64;
    let mut rng = ChaCha20Rng::from_seed([12u8; 32]);
    for variant in Variant::ALL {
        let block_bits = variant.block_bits() as u32;
        let mut plaintext_flips = 0;
        let mut key_flips = 0;

        for _ in 0..TRIALS {
            let key = random_words(&mut rng, variant.nk());
            let block = random_words(&mut rng, variant.nb());
            let mut cipher = Kalyna::with_variant(variant);
            cipher.expand_key(&key).unwrap();
            let mut base = block.clone();
            cipher.encipher_in_place(&mut base).unwrap();

            let bit = rng.gen_range(0..block_bits as usize);
            let mut flipped = block.clone();
            flipped[bit / 64] ^= 1 << (bit % 64);
            cipher.encipher_in_place(&mut flipped).unwrap();
            plaintext_flips += hamming(&base, &flipped);

            let bit = rng.gen_range(0..variant.key_bits());
            let mut other_key = key.clone();
            other_key[bit / 64] ^= 1 << (bit % 64);
            cipher.expand_key(&other_key).unwrap();
            let mut rekeyed = block.clone();
            cipher.encipher_in_place(&mut rekeyed).unwrap();
            key_flips += hamming(&base, &rekeyed);
        }

        // Expect about half the bits to change; allow a generous margin.
        let expected = block_bits * TRIALS / 2;
        for (what, flips) in [("plaintext", plaintext_flips), ("key", key_flips)] {
            assert!(
                flips > expected * 9 / 10 && flips < expected * 11 / 10,
                "{variant}: {what} avalanche {flips} vs {expected}"
            );
        }
    }
}

#[test]
fn shared_schedule_across_threads() {
    let mut rng = ChaCha20Rng::from_seed([13u8; 32]);
    let variant = Variant::Kalyna512_512;
    let mut cipher = Kalyna::with_variant(variant);
    cipher.expand_key(&random_words(&mut rng, variant.nk())).unwrap();
    let blocks: Vec<Vec<Word>> = (0..8).map(|_| random_words(&mut rng, variant.nb())).collect();

    let expected: Vec<Vec<Word>> = blocks
        .iter()
        .map(|block| {
            let mut out = block.clone();
            cipher.encipher_in_place(&mut out).unwrap();
            out
        })
        .collect();

    let cipher = &cipher;
    std::thread::scope(|scope| {
        let handles: Vec<_> = blocks
            .iter()
            .map(|block| {
                scope.spawn(move || {
                    let mut out = block.clone();
                    for _ in 0..50 {
                        out.copy_from_slice(block);
                        cipher.encipher_in_place(&mut out).unwrap();
                    }
                    out
                })
            })
            .collect();
        for (handle, expected) in handles.into_iter().zip(&expected) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}
