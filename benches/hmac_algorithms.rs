//! HMAC algorithm benchmarks (HS256, HS384, HS512)
//!
//! Measures signing a freshly constructed token and verifying a built one,
//! to compare hash function overhead against claim-set work.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jwtset::*;

/// Helper to build tokens for each algorithm
mod helpers {
    use jwtset::*;

    pub fn payload() -> ClaimSetTemplate {
        ClaimSetTemplate::of([
            ClaimKind::Issuer,
            ClaimKind::Subject,
            ClaimKind::IssuedAt,
            ClaimKind::Expiration,
        ])
    }

    pub fn args() -> ClaimArgs {
        ClaimArgs::new()
            .with(ClaimKind::Issuer, "https://example.com")
            .with(ClaimKind::Subject, "user123")
    }

    pub fn cases() -> Vec<(&'static str, ClaimSetTemplate, Signer, Key)> {
        vec![
            (
                "HS256",
                hs256_header(),
                get_signer(&AlgorithmId::HS256),
                Key::from("test-secret-key-for-hs256"),
            ),
            (
                "HS384",
                hs384_header(),
                get_signer(&AlgorithmId::HS384),
                Key::from("test-secret-key-for-hs384-needs-to-be-longer"),
            ),
            (
                "HS512",
                hs512_header(),
                get_signer(&AlgorithmId::HS512),
                Key::from("test-secret-key-for-hs512-needs-to-be-even-longer-for-512-bits"),
            ),
        ]
    }
}

fn bench_hmac_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac_signing");

    for (name, header, signer, key) in helpers::cases() {
        let payload = helpers::payload();
        let args = helpers::args();

        group.bench_function(name, |b| {
            b.iter(|| {
                let wire = Token::new(&header, &payload, &args)
                    .and_then(|t| t.sign(&key, signer.as_ref()))
                    .and_then(|t| t.build());
                black_box(wire)
            });
        });
    }

    group.finish();
}

fn bench_hmac_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("hmac_verification");

    for (name, header, signer, key) in helpers::cases() {
        let token = Token::new(&header, &helpers::payload(), &helpers::args())
            .unwrap()
            .sign(&key, signer.as_ref())
            .unwrap();
        let wire = token.build().unwrap();
        let validation = Validation::default();

        group.bench_function(name, |b| {
            b.iter(|| {
                let decoded = token.verify(black_box(&wire), &key, signer.as_ref(), &validation);
                black_box(decoded)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hmac_signing, bench_hmac_verification);
criterion_main!(benches);
