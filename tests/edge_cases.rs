//! Edge case tests for token parsing and validation
//!
//! These tests cover structural edge cases of the wire format and the
//! boundaries of the time-based claims.

use chrono::{DateTime, TimeDelta, Utc};
use jwtset::utils::base64url;
use jwtset::*;
use serde_json::json;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn sign_raw(header: &str, payload: &str, secret: &str) -> String {
    let signing_input = format!(
        "{}.{}",
        base64url::encode(header),
        base64url::encode(payload)
    );
    let mac = HS256
        .sign(signing_input.as_bytes(), &Key::from(secret))
        .unwrap();
    format!("{signing_input}.{}", base64url::encode_bytes(&mac))
}

fn create_valid_token() -> String {
    sign_raw(
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"iss":"test","sub":"user","exp":9999999999}"#,
        "secret",
    )
}

fn expected() -> Token {
    Token::new(
        &hs256_header(),
        &ClaimSetTemplate::of([ClaimKind::Issuer, ClaimKind::Subject, ClaimKind::Expiration]),
        &ClaimArgs::new()
            .with(ClaimKind::Issuer, "test")
            .with(ClaimKind::Subject, "user"),
    )
    .unwrap()
}

// ============================================================================
// Token Format Edge Cases
// ============================================================================

#[test]
fn test_valid_token_sanity() {
    let decoded = expected()
        .verify(
            &create_valid_token(),
            &Key::from("secret"),
            &HS256,
            &Validation::default(),
        )
        .unwrap();
    assert_eq!(decoded.claim("sub"), Some(&json!("user")));
}

#[test]
fn test_empty_token() {
    let err = Token::clean("").unwrap_err();
    assert!(matches!(err, Error::FormatInvalid { .. }));
}

#[test]
fn test_single_dot() {
    assert!(Token::clean(".").unwrap_err().is_malformed());
}

#[test]
fn test_two_parts() {
    let token = create_valid_token();
    let (signing_input, _) = Token::split_crypto(&token).unwrap();
    let err = Token::clean(signing_input).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_four_parts() {
    let token = format!("{}.extra", create_valid_token());
    let err = Token::clean(&token).unwrap_err();
    assert_eq!(err.token(), Some(token.as_str()));
}

#[test]
fn test_missing_parts() {
    let token = create_valid_token();
    let (header, payload, signature) = Token::split(&token).unwrap();

    for broken in [
        format!(".{payload}.{signature}"),
        format!("{header}..{signature}"),
        format!("{header}.{payload}.{signature}.{signature}"),
    ] {
        assert!(Token::clean(&broken).unwrap_err().is_malformed(), "{broken}");
    }

    // An empty signature segment is structurally fine but never verifies
    let unsigned = format!("{header}.{payload}.");
    assert!(Token::clean(&unsigned).is_ok());
    assert!(expected()
        .verify(&unsigned, &Key::from("secret"), &HS256, &Validation::default())
        .unwrap_err()
        .is_signature());
}

#[test]
fn test_whitespace_handling() {
    let token = create_valid_token();
    for padded in [format!(" {token}"), format!("{token} "), format!("{token}\n")] {
        assert!(
            expected()
                .verify(&padded, &Key::from("secret"), &HS256, &Validation::default())
                .is_err(),
            "whitespace must not be trimmed silently"
        );
    }
}

// ============================================================================
// Base64URL Edge Cases
// ============================================================================

#[test]
fn test_invalid_base64_characters() {
    let token = create_valid_token();
    let (header, payload, signature) = Token::split(&token).unwrap();

    let bad_header = format!("{}!.{payload}.{signature}", &header[..header.len() - 1]);
    assert!(matches!(
        Token::clean(&bad_header),
        Err(Error::FormatInvalidBase64 {
            segment: Segment::Header,
            ..
        })
    ));

    let std_alphabet = format!("{header}.{payload}.ab+/");
    assert!(matches!(
        Token::clean(&std_alphabet),
        Err(Error::FormatInvalidBase64 {
            segment: Segment::Signature,
            ..
        })
    ));
}

#[test]
fn test_base64_with_padding() {
    // Produced tokens keep their padding; stripped tokens decode the same
    let wire = Token::new(
        &hs256_header(),
        &ClaimSetTemplate::of([ClaimKind::Subject]),
        &ClaimArgs::new().with(ClaimKind::Subject, "ab"),
    )
    .unwrap()
    .sign(&Key::from("secret"), &HS256)
    .unwrap()
    .build()
    .unwrap();

    let (_, _, signature) = Token::split(&wire).unwrap();
    assert!(signature.ends_with('='), "HS256 MAC encodes with padding");

    let stripped = wire.replace('=', "");
    assert_eq!(Token::clean(&wire).unwrap(), Token::clean(&stripped).unwrap());
}

#[test]
fn test_incorrect_padding_rejected() {
    let token = create_valid_token();
    let (header, payload, signature) = Token::split(&token).unwrap();
    let over_padded = format!("{header}.{payload}.{signature}==");
    assert!(Token::clean(&over_padded).unwrap_err().is_malformed());
}

#[test]
fn test_incomplete_base64() {
    let token = create_valid_token();
    let (header, payload, _) = Token::split(&token).unwrap();
    let truncated = format!("{header}.{}.sig", &payload[..payload.len() - 3]);
    assert!(Token::clean(&truncated).unwrap_err().is_malformed());
}

// ============================================================================
// JSON Parsing Edge Cases
// ============================================================================

#[test]
fn test_malformed_json_header() {
    let wire = sign_raw(r#"{"alg":"HS256""#, r#"{"sub":"user"}"#, "secret");
    assert!(matches!(
        Token::clean(&wire),
        Err(Error::FormatInvalidJson {
            segment: Segment::Header,
            ..
        })
    ));
}

#[test]
fn test_non_object_payload() {
    for payload in ["null", "42", r#""text""#, "[]"] {
        let wire = sign_raw(r#"{"alg":"HS256","typ":"JWT"}"#, payload, "secret");
        assert!(
            matches!(
                Token::clean(&wire),
                Err(Error::FormatInvalidJson {
                    segment: Segment::Payload,
                    ..
                })
            ),
            "{payload}"
        );
    }
}

#[test]
fn test_empty_json_object() {
    let wire = sign_raw("{}", "{}", "secret");
    let decoded = Token::clean(&wire).unwrap();
    assert!(decoded.header().is_empty() && decoded.payload().is_empty());

    let err = expected()
        .verify(&wire, &Key::from("secret"), &HS256, &Validation::default())
        .unwrap_err();
    assert!(matches!(err, Error::ClaimMissing { ref claim } if claim == "typ"));
}

#[test]
fn test_missing_algorithm_in_header() {
    let wire = sign_raw(
        r#"{"typ":"JWT"}"#,
        r#"{"iss":"test","sub":"user"}"#,
        "secret",
    );
    let err = expected()
        .verify(&wire, &Key::from("secret"), &HS256, &Validation::default())
        .unwrap_err();
    assert_eq!(err, Error::ClaimMissing { claim: "alg".into() });
}

#[test]
fn test_non_utf8_payload() {
    let header = base64url::encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = base64url::encode_bytes(&[0xff, 0xfe, 0xfd]);
    let wire = format!("{header}.{payload}.");
    assert!(matches!(
        Token::clean(&wire),
        Err(Error::FormatInvalidBase64 {
            segment: Segment::Payload,
            ..
        })
    ));
}

// ============================================================================
// Claim Type Edge Cases
// ============================================================================

#[test]
fn test_identity_type_matters() {
    let wire = sign_raw(
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"aud":"42"}"#,
        "secret",
    );
    let expected = Token::new(
        &hs256_header(),
        &ClaimSetTemplate::of([ClaimKind::Audience]),
        &ClaimArgs::new().with(ClaimKind::Audience, Identity::from(42)),
    )
    .unwrap();

    let err = expected
        .verify(&wire, &Key::from("secret"), &HS256, &Validation::default())
        .unwrap_err();
    assert!(matches!(err, Error::ClaimMismatch { ref claim, .. } if claim == "aud"));
}

#[test]
fn test_string_timestamp_is_malformed() {
    let wire = sign_raw(
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"iss":"test","sub":"user","exp":"9999999999"}"#,
        "secret",
    );
    let err = expected()
        .verify(&wire, &Key::from("secret"), &HS256, &Validation::default())
        .unwrap_err();
    assert!(matches!(err, Error::ClaimMalformed { ref claim, .. } if claim == "exp"));
    assert!(err.is_claim());
}

#[test]
fn test_fractional_timestamp_accepted() {
    let wire = sign_raw(
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"iss":"test","sub":"user","exp":1000.75}"#,
        "secret",
    );
    let token = expected();
    let key = Key::from("secret");
    let v = Validation::default();
    assert!(token.verify_at(&wire, &key, &HS256, &v, at(1_000)).is_ok());
    assert!(token.verify_at(&wire, &key, &HS256, &v, at(1_001)).is_err());
}

// ============================================================================
// Time Boundaries
// ============================================================================

fn timed_token(kind: ClaimKind, offset: TimeDelta, now: DateTime<Utc>) -> (Token, String) {
    let token = Token::new_at(
        &hs256_header(),
        &ClaimSetTemplate::of([kind]),
        &ClaimArgs::new().with(kind, offset),
        now,
    )
    .unwrap()
    .sign(&Key::from("secret"), &HS256)
    .unwrap();
    let wire = token.build().unwrap();
    (token, wire)
}

#[test]
fn test_not_before_boundary() {
    let now = at(1_700_000_000);
    let (token, wire) = timed_token(ClaimKind::NotBefore, TimeDelta::seconds(30), now);
    let key = Key::from("secret");
    let v = Validation::default();

    assert!(token.verify_at(&wire, &key, &HS256, &v, now).is_err());
    assert!(token
        .verify_at(&wire, &key, &HS256, &v, now + TimeDelta::seconds(29))
        .is_err());
    assert!(token
        .verify_at(&wire, &key, &HS256, &v, now + TimeDelta::seconds(30))
        .is_ok());
    assert!(token
        .verify_at(&wire, &key, &HS256, &v, now + TimeDelta::seconds(31))
        .is_ok());
}

#[test]
fn test_expiration_boundary() {
    let now = at(1_700_000_000);
    let key = Key::from("secret");
    let v = Validation::default();

    let (token, wire) = timed_token(ClaimKind::Expiration, TimeDelta::seconds(-1), now);
    let err = token.verify_at(&wire, &key, &HS256, &v, now).unwrap_err();
    assert!(matches!(err, Error::TokenExpired { .. }));

    let (token, wire) = timed_token(ClaimKind::Expiration, TimeDelta::days(7), now);
    assert!(token.verify_at(&wire, &key, &HS256, &v, now).is_ok());
    assert!(token
        .verify_at(&wire, &key, &HS256, &v, now + TimeDelta::days(7))
        .is_ok());
    assert!(token
        .verify_at(
            &wire,
            &key,
            &HS256,
            &v,
            now + TimeDelta::days(7) + TimeDelta::seconds(1)
        )
        .is_err());
}

#[test]
fn test_zero_and_negative_leeway() {
    let now = at(1_700_000_000);
    let key = Key::from("secret");
    let (token, wire) = timed_token(ClaimKind::Expiration, TimeDelta::zero(), now);

    let zero = Validation::new().leeway(0);
    assert!(token.verify_at(&wire, &key, &HS256, &zero, now).is_ok());

    let negative = Validation::new().leeway(-1);
    assert!(token.verify_at(&wire, &key, &HS256, &negative, now).is_err());

    let positive = Validation::new().leeway(60);
    assert!(token
        .verify_at(&wire, &key, &HS256, &positive, now + TimeDelta::seconds(60))
        .is_ok());
}

#[test]
fn test_issued_in_future() {
    let now = at(1_700_000_000);
    let key = Key::from("secret");
    let (token, wire) = timed_token(ClaimKind::IssuedAt, TimeDelta::minutes(10), now);

    let err = token
        .verify_at(&wire, &key, &HS256, &Validation::default(), now)
        .unwrap_err();
    assert!(matches!(err, Error::TokenIssuedInFuture { .. }));

    let relaxed = Validation::new().no_iat_validation();
    assert!(token.verify_at(&wire, &key, &HS256, &relaxed, now).is_ok());
}

#[test]
fn test_excessive_leeway_rejected() {
    let now = at(1_700_000_000);
    let (token, wire) = timed_token(ClaimKind::Expiration, TimeDelta::zero(), now);
    let err = token
        .verify_at(
            &wire,
            &Key::from("secret"),
            &HS256,
            &Validation::new().leeway(86_400),
            now,
        )
        .unwrap_err();
    assert!(matches!(err, Error::LeewayTooLarge { .. }));
}
