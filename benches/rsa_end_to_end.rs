//! RSA end-to-end benchmarks
//!
//! Signing and validating with PKCS#1 v1.5 and PSS padding. Keys are PEM
//! text, so every operation includes decoding the key.

use criterion::{criterion_group, criterion_main, Criterion};
use jwtsmith::*;
use serde_json::json;
use std::hint::black_box;

const RSA_ALGORITHMS: [AlgorithmId; 6] = [
    AlgorithmId::RS256,
    AlgorithmId::RS384,
    AlgorithmId::RS512,
    AlgorithmId::PS256,
    AlgorithmId::PS384,
    AlgorithmId::PS512,
];

fn bench_rsa_end_to_end(c: &mut Criterion) {
    let pair = generate_rsa_key_pair(2048).expect("Failed to generate RSA key pair");
    let signing_key = pair.signing_key();
    let verification_key = pair.verification_key();
    let header = json!({"typ": "JWT", "kid": pair.kid});
    let payload = json!({
        "sub": "user123",
        "iss": "https://example.com",
        "iat": 1516239022,
        "exp": 9999999999u64
    });
    let validator = TokenValidator::new().clock(FixedClock(1_700_000_000));

    let mut group = c.benchmark_group("rsa_end_to_end");

    for alg in RSA_ALGORITHMS {
        group.bench_function(format!("{alg}/sign"), |b| {
            b.iter(|| sign(black_box(&header), black_box(&payload), alg, &signing_key).unwrap());
        });

        let token = sign(&header, &payload, alg, &signing_key).unwrap();
        group.bench_function(format!("{alg}/parse_and_validate"), |b| {
            b.iter(|| {
                let parsed = ParsedToken::from_string(black_box(&token)).unwrap();
                validator.validate(&parsed, Some(&verification_key), Some(SigningMethod::Rsa))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rsa_end_to_end);
criterion_main!(benches);
