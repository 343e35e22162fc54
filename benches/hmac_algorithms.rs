//! HMAC algorithm benchmarks (HS256, HS384, HS512)
//!
//! Compares hash function overhead for signing and for a full validation
//! report over the same token.

use criterion::{criterion_group, criterion_main, Criterion};
use jwtsmith::*;
use serde_json::json;
use std::hint::black_box;

const HMAC_ALGORITHMS: [AlgorithmId; 3] = [AlgorithmId::HS256, AlgorithmId::HS384, AlgorithmId::HS512];

fn payload() -> serde_json::Value {
    json!({
        "sub": "user123",
        "iss": "https://example.com",
        "iat": 1516239022,
        "exp": 9999999999u64
    })
}

fn bench_hmac_signing(c: &mut Criterion) {
    let key = SigningKey::hmac("test-secret-key-for-hmac-benchmarks");
    let header = json!({"typ": "JWT"});
    let payload = payload();

    let mut group = c.benchmark_group("hmac_signing");
    for alg in HMAC_ALGORITHMS {
        group.bench_function(alg.as_str(), |b| {
            b.iter(|| sign(black_box(&header), black_box(&payload), alg, &key).unwrap());
        });
    }
    group.finish();
}

fn bench_hmac_validation(c: &mut Criterion) {
    let key = SigningKey::hmac("test-secret-key-for-hmac-benchmarks");
    let validator = TokenValidator::new().clock(FixedClock(1_700_000_000));

    let mut group = c.benchmark_group("hmac_validation");
    for alg in HMAC_ALGORITHMS {
        let token = sign(&json!({"typ": "JWT"}), &payload(), alg, &key).unwrap();

        group.bench_function(alg.as_str(), |b| {
            b.iter(|| {
                let parsed = ParsedToken::from_string(black_box(&token)).unwrap();
                validator.validate(&parsed, Some(&key), Some(SigningMethod::Hmac))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hmac_signing, bench_hmac_validation);
criterion_main!(benches);
