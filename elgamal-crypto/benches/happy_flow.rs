use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use elgamal_crypto::keypair::{KeyGenConfig, KeyPair};
use fake::Fake;
use fake::faker::lorem::en::Words;
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn setup() -> (KeyPair, StdRng) {
    let mut rng = StdRng::seed_from_u64(12345);
    let config = KeyGenConfig::with_prime(BigUint::from(2_147_483_647u32)).expect("config");
    let pair = KeyPair::generate(&config, &mut rng).expect("generate key pair");
    (pair, rng)
}

fn make_string(len: usize) -> String {
    let mut s = String::with_capacity(len);
    while s.len() < len {
        let words: Vec<String> = Words(10..20).fake();
        if !s.is_empty() {
            s.push(' ');
        }
        s.push_str(&words.join(" "));
    }
    s.truncate(len);
    s
}

fn bench_happy_flow(c: &mut Criterion) {
    let (pair, mut rng) = setup();
    let original_data = "Heh safasdkjfhkjas fha sdf asda";

    c.bench_function("happy_flow", |b| {
        b.iter(|| {
            let cipher = pair
                .public_key()
                .encrypt_text(black_box(original_data), &mut rng)
                .expect("encrypt");
            let decoded = pair.private_key().decrypt_text(&cipher).expect("decrypt");
            black_box(decoded);
        })
    });
}

fn bench_sizes(c: &mut Criterion) {
    let (pair, mut rng) = setup();
    let mut group = c.benchmark_group("ElGamal Sizes Encrypt/Decrypt");

    for (len, label) in [(100usize, "100"), (1_000, "1k"), (10_000, "10k")] {
        let data = make_string(len);
        let ciphertext = pair
            .public_key()
            .encrypt_text(&data, &mut rng)
            .expect("encrypt");

        group.bench_with_input(BenchmarkId::new("encrypt", label), &data, |b, d| {
            b.iter(|| {
                let _c = pair
                    .public_key()
                    .encrypt_text(black_box(d), &mut rng)
                    .expect("encrypt");
            });
        });

        group.bench_with_input(BenchmarkId::new("decrypt", label), &ciphertext, |b, ctext| {
            b.iter(|| {
                let _p = pair.private_key().decrypt(black_box(ctext)).expect("decrypt");
            });
        });
    }

    group.finish();
}

fn bench_key_generation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let config = KeyGenConfig::default();

    c.bench_function("generate_10_digit_key_pair", |b| {
        b.iter(|| black_box(KeyPair::generate(&config, &mut rng).expect("generate")))
    });
}

criterion_group!(benches, bench_happy_flow, bench_sizes, bench_key_generation);
criterion_main!(benches);
