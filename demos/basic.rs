//! Basic example: issuing and verifying tokens
//!
//! Shows the two layers of the crate:
//! 1. `TokenSettings`, which derives templates and validation from config
//! 2. The lower-level template API (`ClaimSetTemplate` + `ClaimArgs` + `Token`)
//!
//! Run with `RUST_LOG=jwtset=debug cargo run --example basic` to see the
//! verification log lines.

use chrono::{TimeDelta, Utc};
use jwtset::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwtset=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== jwtset - Basic Example ===\n");

    // Settings layer
    let settings = TokenSettings::from_json(
        r#"{
            "secret_key": "your-256-bit-secret-key-here!",
            "issuer": "https://example.com",
            "expiration_seconds": 3600
        }"#,
    )?;

    let now = Utc::now();
    let wire = settings.issue_at(42, now)?;
    println!("Issued: {wire}\n");

    // nbf sits a few seconds ahead of issuance
    let later = now + TimeDelta::seconds(settings.not_before_seconds + 1);
    let identity = settings.peek_identity(&wire)?;
    let decoded = settings.verify_at(&wire, identity.clone(), later)?;
    println!("  ✓ Verified token for {identity}");
    println!("  ✓ Claims: {:?}\n", decoded.payload());

    match settings.verify_at(&wire, 7, later) {
        Ok(_) => println!("  ✗ Token for 42 accepted for 7"),
        Err(e) => println!("  ✓ Rejected for another principal: {e}\n"),
    }

    // Template layer
    let header = hs512_header();
    let payload = ClaimSetTemplate::of([
        ClaimKind::Issuer,
        ClaimKind::Subject,
        ClaimKind::IssuedAt,
        ClaimKind::Expiration,
    ])
    .with_arg(ClaimKind::Expiration, TimeDelta::minutes(15));
    let args = ClaimArgs::new()
        .with(ClaimKind::Issuer, "https://example.com")
        .with(ClaimKind::Subject, "user123");

    let key = Key::from("another-secret");
    let token = Token::new(&header, &payload, &args)?.sign(&key, &HS512)?;
    let wire = token.build()?;
    println!("HS512 token: {wire}");

    let decoded = token.verify(&wire, &key, &HS512, &Validation::new().leeway(5))?;
    println!("  ✓ alg = {}", decoded.header()["alg"]);
    println!("  ✓ sub = {:?}", decoded.claim("sub"));

    let err = token
        .verify(&wire, &Key::from("wrong"), &HS512, &Validation::default())
        .unwrap_err();
    println!("  ✓ Wrong key rejected: {err} ({:?})", err.kind());

    Ok(())
}
