//! Error types for token building, parsing and verification
//!
//! Every error belongs to one [`ErrorKind`]. Integration layers that need to
//! answer differently for a malformed token, a forged token and an expired
//! token branch on [`Error::kind`] instead of matching every variant.

use crate::token::Segment;
use thiserror::Error;

/// Broad failure category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The wire string is structurally broken (segments, base64, JSON, size)
    Malformed,
    /// The signature does not match the signing input
    Signature,
    /// `build()` was called on a token that was never signed
    SignatureMissing,
    /// A claim is missing, mismatched, malformed or outside its time window
    Claim,
    /// A claim set or settings value was configured incorrectly
    Configuration,
    /// The algorithm is unknown or has no implementation
    Algorithm,
}

/// Errors produced by this crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Invalid token format: expected header, payload and signature separated by '.'")]
    FormatInvalid { token: String },

    #[error("Base64URL decoding of the {segment} segment failed: {reason}")]
    FormatInvalidBase64 { segment: Segment, reason: String },

    #[error("JSON parsing of the {segment} segment failed: {reason}")]
    FormatInvalidJson { segment: Segment, reason: String },

    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Invalid token signature")]
    SignatureInvalid { token: String },

    #[error("Token has not been signed; call sign() before build()")]
    SignatureMissing,

    // ============================================================================
    // Claim Errors
    // ============================================================================
    #[error("Required claim '{claim}' is missing")]
    ClaimMissing { claim: String },

    #[error("Claim '{claim}' mismatch: expected {expected}, found {found}")]
    ClaimMismatch {
        claim: String,
        expected: String,
        found: String,
    },

    #[error("Claim '{claim}' is malformed: {reason}")]
    ClaimMalformed { claim: String, reason: String },

    #[error("Token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    TokenExpired {
        expired_at: i64,
        now: i64,
        leeway: i64,
    },

    #[error("Token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    TokenNotYetValid {
        not_before: i64,
        now: i64,
        leeway: i64,
    },

    #[error("Token issued in future at {issued_at} (now: {now}, leeway: {leeway}s)")]
    TokenIssuedInFuture {
        issued_at: i64,
        now: i64,
        leeway: i64,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Claim '{claim}' needs constructor arguments but none were supplied")]
    ClaimArgumentsMissing { claim: String },

    #[error("Claim '{claim}' was given the wrong kind of argument (expected {expected})")]
    ClaimArgumentMismatch { claim: String, expected: String },

    #[error("Leeway too large: {value} seconds (maximum: {max} seconds either way)")]
    LeewayTooLarge { value: i64, max: i64 },

    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("Invalid settings: {0}")]
    SettingsInvalid(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not implemented")]
    AlgorithmNotImplemented(String),

    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FormatInvalid { .. }
            | Error::FormatInvalidBase64 { .. }
            | Error::FormatInvalidJson { .. }
            | Error::TokenTooLarge { .. } => ErrorKind::Malformed,

            Error::SignatureInvalid { .. } => ErrorKind::Signature,
            Error::SignatureMissing => ErrorKind::SignatureMissing,

            Error::ClaimMissing { .. }
            | Error::ClaimMismatch { .. }
            | Error::ClaimMalformed { .. }
            | Error::TokenExpired { .. }
            | Error::TokenNotYetValid { .. }
            | Error::TokenIssuedInFuture { .. } => ErrorKind::Claim,

            Error::ClaimArgumentsMissing { .. }
            | Error::ClaimArgumentMismatch { .. }
            | Error::LeewayTooLarge { .. }
            | Error::ConfigurationInvalid(_)
            | Error::SettingsInvalid(_) => ErrorKind::Configuration,

            Error::AlgorithmNotImplemented(_) | Error::AlgorithmUnsupported(_) => {
                ErrorKind::Algorithm
            }
        }
    }

    /// Name of the claim this error is about, if any
    pub fn claim(&self) -> Option<&str> {
        match self {
            Error::ClaimMissing { claim }
            | Error::ClaimMismatch { claim, .. }
            | Error::ClaimMalformed { claim, .. }
            | Error::ClaimArgumentsMissing { claim }
            | Error::ClaimArgumentMismatch { claim, .. } => Some(claim),
            Error::TokenExpired { .. } => Some("exp"),
            Error::TokenNotYetValid { .. } => Some("nbf"),
            Error::TokenIssuedInFuture { .. } => Some("iat"),
            _ => None,
        }
    }

    /// Raw token the error was raised for, if it carries one
    pub fn token(&self) -> Option<&str> {
        match self {
            Error::FormatInvalid { token } | Error::SignatureInvalid { token } => Some(token),
            _ => None,
        }
    }

    /// `true` for structural failures of the wire string
    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::Malformed
    }

    /// `true` when the signature did not verify
    pub fn is_signature(&self) -> bool {
        self.kind() == ErrorKind::Signature
    }

    /// `true` for claim validation failures
    pub fn is_claim(&self) -> bool {
        self.kind() == ErrorKind::Claim
    }
}

/// Result type alias for jwtset operations
pub type Result<T> = std::result::Result<T, Error>;
