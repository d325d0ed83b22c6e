use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use kalyna_core::{expand_key, Kalyna, Variant, Word};

fn random_words(rng: &mut ChaCha20Rng, len: usize) -> Vec<Word> {
    (0..len).map(|_| rng.next_u64()).collect()
}

fn bench_key_schedule(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut group = c.benchmark_group("key_schedule");
    for variant in Variant::ALL {
        let key = random_words(&mut rng, variant.nk());
        group.bench_function(BenchmarkId::from_parameter(variant.short_name()), |b| {
            b.iter(|| expand_key(variant, &key));
        });
    }
    group.finish();
}

fn bench_blocks(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut group = c.benchmark_group("block");
    for variant in Variant::ALL {
        let mut cipher = Kalyna::with_variant(variant);
        cipher
            .expand_key(&random_words(&mut rng, variant.nk()))
            .expect("key length matches variant");
        let block = random_words(&mut rng, variant.nb());

        group.bench_function(BenchmarkId::new("encipher", variant.short_name()), |b| {
            let mut data = block.clone();
            b.iter(|| cipher.encipher_in_place(&mut data));
        });
        group.bench_function(BenchmarkId::new("decipher", variant.short_name()), |b| {
            let mut data = block.clone();
            b.iter(|| cipher.decipher_in_place(&mut data));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_blocks);
criterion_main!(benches);
