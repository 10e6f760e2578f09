//! # jwtset - Claim-Set Based JSON Web Tokens
//!
//! > Build, sign, parse and verify JSON Web Tokens (RFC 7519) from declarative claim sets.
//!
//! **jwtset** describes each token segment as a *claim set*: an ordered list of claim kinds
//! (`typ`, `alg`, `iss`, `sub`, `aud`, `jti`, `nbf`, `exp`, `iat`) instantiated once per token.
//! The same claim sets that produce a token also validate an incoming one, so issuing and
//! verifying can never drift apart.
//!
//! ## Overview
//!
//! A token's wire form is three Base64URL segments joined by `.`:
//!
//! ```text
//! base64url(header JSON) . base64url(payload JSON) . base64url(signature)
//! ```
//!
//! The signature is an HMAC over the first two segments exactly as they appear on the wire.
//! Verification recomputes it over the received bytes, never over re-serialized JSON, and
//! compares in constant time.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtset::*;
//!
//! let payload = ClaimSetTemplate::of([
//!     ClaimKind::Issuer,
//!     ClaimKind::Audience,
//!     ClaimKind::NotBefore,
//!     ClaimKind::Expiration,
//! ]);
//! let args = ClaimArgs::new()
//!     .with(ClaimKind::Issuer, "issuer")
//!     .with(ClaimKind::Audience, Identity::from(42));
//!
//! let key = Key::from("secret");
//! let token = construct_token(&hs256_header(), &payload, &args)?.sign(&key, &HS256)?;
//! let wire = token.build()?;
//!
//! let claims = verify_token(&wire, &token, &key, &HS256, &Validation::default())?;
//! ```
//!
//! ## Token Lifecycle
//!
//! ```text
//! ClaimSetTemplate (header) + ClaimSetTemplate (payload) + ClaimArgs
//!     │ Token::new() / construct_token()
//!     ▼
//! Token [Unsigned]        ── build() fails with SignatureMissing
//!     │ .sign(key, algorithm)
//!     ▼
//! Token [Signed]
//!     │ .build()
//!     ▼
//! wire string
//!     │ Token::clean() (static, untrusted)
//!     ▼
//! DecodedToken ── verify: signature first, then header and payload claims
//! ```
//!
//! Claims that need input (`iss`, `sub`, `aud`, `jti`) fail at construction when no argument
//! is supplied, never later at serialization time.
//!
//! ## Algorithm Support
//!
//! All algorithms implement a common [`Algorithm`] trait:
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **`none`**: signs with an empty signature and never verifies
//! - **RS256**: placeholder that fails with [`Error::AlgorithmNotImplemented`]
//!
//! ## Errors
//!
//! Every [`Error`] belongs to an [`ErrorKind`], so a caller can tell a malformed token from a
//! forged one from an expired one without matching every variant:
//!
//! ```ignore
//! match settings.verify(&wire, user_id) {
//!     Ok(claims) => { /* authenticated */ }
//!     Err(e) if e.is_malformed() => { /* 400 */ }
//!     Err(e) if e.is_signature() => { /* 401, tampered */ }
//!     Err(e) if e.is_claim() => { /* 401, expired or wrong audience */ }
//!     Err(e) => { /* configuration problem */ }
//! }
//! ```
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! The verifying algorithm is always supplied by the caller (or by [`TokenSettings`]). A
//! token's `alg` header is only compared for equality against the expected header claim set,
//! after the signature has already been checked. A token declaring `"alg": "none"` with an
//! empty signature never verifies.
//!
//! ### Timing Attack Protection
//!
//! HMAC signature verification uses constant-time comparison via the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//! crate.
//!
//! ### Input Bounds
//!
//! Wire strings over 64KB and decoded segments over their limits are rejected before JSON
//! parsing.
//!
//! ## References
//!
//! - [RFC 4648](https://datatracker.ietf.org/doc/html/rfc4648) - Base64URL encoding (§5)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) - JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725) - JSON Web Token Best Current Practices

// Core modules
pub mod error;
mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Claims and validation
pub mod claims;

// Token types
pub mod token;

// Deployment configuration
pub mod settings;

// ============================================================================
// PUBLIC API
// ============================================================================

// Token construction and verification
pub use token::{construct_token, verify_token, DecodedToken, Segment, Token, TokenState};

// Claims
pub use claims::{
    hs256_header, hs384_header, hs512_header, unsigned_header, Claim, ClaimArg, ClaimArgs,
    ClaimKind, ClaimSet, ClaimSetTemplate, Identity, Requirement, Validation,
};

// Algorithms and keys
pub use algorithm::hmac::{HS256, HS384, HS512};
pub use algorithm::none::Unsigned;
pub use algorithm::rsa::RS256;
pub use algorithm::{get_signer, Algorithm, AlgorithmId, Signer};
pub use keys::Key;

// Configuration and errors
pub use error::{Error, ErrorKind, Result};
pub use settings::{SecretProvider, TokenSettings};
