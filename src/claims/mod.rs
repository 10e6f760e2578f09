//! Claims: the named assertions carried by a token segment
//!
//! A claim is described by a [`ClaimKind`] (what it is) and materialised as a
//! [`Claim`] (what value it carries). Kinds that need caller input, like the
//! issuer name, are marked [`Requirement::Requires`]; they are instantiated
//! from a [`ClaimArg`] and fail at construction when none is supplied.
//!
//! Time claims compute their instant once, when the claim is instantiated, and
//! serialise it as integer Unix seconds.

mod claimset;
mod validation;

pub use claimset::{header_for, hs256_header, hs384_header, hs512_header, unsigned_header};
pub use claimset::{ClaimArgs, ClaimSet, ClaimSetTemplate};
pub use validation::Validation;

use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;

/// Default offset of a `nbf` claim from its instantiation time
pub const DEFAULT_NOT_BEFORE_OFFSET: TimeDelta = TimeDelta::seconds(30);

/// Default offset of an `exp` claim from its instantiation time
pub const DEFAULT_EXPIRATION_OFFSET: TimeDelta = TimeDelta::days(7);

/// Whether a claim kind can be instantiated without arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Instantiable on its own; an argument may still override the default
    Standalone,
    /// Needs a [`ClaimArg`] at construction
    Requires,
}

/// The closed set of claims this crate knows how to build and validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimKind {
    /// `typ`, always `"JWT"`
    Type,
    /// `alg`, fixed to the given algorithm's wire name
    Algorithm(AlgorithmId),
    /// `iss`
    Issuer,
    /// `sub`
    Subject,
    /// `aud`
    Audience,
    /// `jti`
    JwtId,
    /// `nbf`, earliest usable instant
    NotBefore,
    /// `exp`, expiry instant
    Expiration,
    /// `iat`, issue instant
    IssuedAt,
}

impl ClaimKind {
    /// Wire key of the claim
    pub fn name(&self) -> &'static str {
        match self {
            ClaimKind::Type => "typ",
            ClaimKind::Algorithm(_) => "alg",
            ClaimKind::Issuer => "iss",
            ClaimKind::Subject => "sub",
            ClaimKind::Audience => "aud",
            ClaimKind::JwtId => "jti",
            ClaimKind::NotBefore => "nbf",
            ClaimKind::Expiration => "exp",
            ClaimKind::IssuedAt => "iat",
        }
    }

    /// Construction requirement of this kind
    pub fn requirement(&self) -> Requirement {
        match self {
            ClaimKind::Issuer | ClaimKind::Subject | ClaimKind::Audience | ClaimKind::JwtId => {
                Requirement::Requires
            }
            ClaimKind::Type
            | ClaimKind::Algorithm(_)
            | ClaimKind::NotBefore
            | ClaimKind::Expiration
            | ClaimKind::IssuedAt => Requirement::Standalone,
        }
    }

    /// A required claim must be present in the decoded segment
    pub fn is_required(&self) -> bool {
        matches!(self, ClaimKind::Type | ClaimKind::Algorithm(_))
    }

    /// Time claims are compared against the clock instead of by equality
    pub fn is_time(&self) -> bool {
        matches!(
            self,
            ClaimKind::NotBefore | ClaimKind::Expiration | ClaimKind::IssuedAt
        )
    }
}

/// Principal identity carried by `sub` / `aud`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Numeric id, serialised as a JSON number
    Id(i64),
    /// Textual id, serialised as a JSON string
    Name(String),
}

impl Identity {
    /// Wire form of the identity
    pub fn to_value(&self) -> Value {
        match self {
            Identity::Id(id) => Value::from(*id),
            Identity::Name(name) => Value::from(name.as_str()),
        }
    }

    /// Read an identity back from a decoded claim value
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Identity::Id),
            Value::String(s) => Some(Identity::Name(s.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identity::Id(id) => write!(f, "{id}"),
            Identity::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Identity {
    fn from(id: i64) -> Self {
        Identity::Id(id)
    }
}

impl From<i32> for Identity {
    fn from(id: i32) -> Self {
        Identity::Id(id.into())
    }
}

impl From<u32> for Identity {
    fn from(id: u32) -> Self {
        Identity::Id(id.into())
    }
}

impl From<&str> for Identity {
    fn from(name: &str) -> Self {
        Identity::Name(name.to_string())
    }
}

impl From<String> for Identity {
    fn from(name: String) -> Self {
        Identity::Name(name)
    }
}

/// Construction argument for a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimArg {
    /// Literal text (`iss`, `jti`; also accepted as a named identity)
    Text(String),
    /// Principal identity (`sub`, `aud`)
    Identity(Identity),
    /// Offset from the instantiation time (`nbf`, `exp`, `iat`)
    Offset(TimeDelta),
}

impl ClaimArg {
    /// Text argument
    pub fn text(value: impl Into<String>) -> Self {
        ClaimArg::Text(value.into())
    }

    /// Identity argument
    pub fn identity(value: impl Into<Identity>) -> Self {
        ClaimArg::Identity(value.into())
    }

    /// Offset argument in whole seconds
    pub fn seconds(seconds: i64) -> Self {
        ClaimArg::Offset(TimeDelta::seconds(seconds))
    }
}

impl From<&str> for ClaimArg {
    fn from(value: &str) -> Self {
        ClaimArg::text(value)
    }
}

impl From<String> for ClaimArg {
    fn from(value: String) -> Self {
        ClaimArg::Text(value)
    }
}

impl From<Identity> for ClaimArg {
    fn from(value: Identity) -> Self {
        ClaimArg::Identity(value)
    }
}

impl From<TimeDelta> for ClaimArg {
    fn from(value: TimeDelta) -> Self {
        ClaimArg::Offset(value)
    }
}

/// An instantiated claim with its fixed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    Type,
    Algorithm(AlgorithmId),
    Issuer(String),
    Subject(Identity),
    Audience(Identity),
    JwtId(String),
    /// Unix seconds
    NotBefore(i64),
    /// Unix seconds
    Expiration(i64),
    /// Unix seconds
    IssuedAt(i64),
}

impl Claim {
    /// Instantiate a claim of `kind` at `now`
    ///
    /// Fails with [`Error::ClaimArgumentsMissing`] when the kind requires an
    /// argument and `arg` is `None`, and with [`Error::ClaimArgumentMismatch`]
    /// when the argument has the wrong shape.
    pub fn instantiate(kind: ClaimKind, arg: Option<&ClaimArg>, now: DateTime<Utc>) -> Result<Self> {
        if kind.requirement() == Requirement::Requires && arg.is_none() {
            return Err(Error::ClaimArgumentsMissing {
                claim: kind.name().to_string(),
            });
        }

        match (kind, arg) {
            (ClaimKind::Type, None) => Ok(Claim::Type),
            (ClaimKind::Algorithm(id), None) => Ok(Claim::Algorithm(id)),

            (ClaimKind::Issuer, Some(ClaimArg::Text(iss))) => Ok(Claim::Issuer(iss.clone())),
            (ClaimKind::JwtId, Some(ClaimArg::Text(jti))) => Ok(Claim::JwtId(jti.clone())),

            (ClaimKind::Subject, Some(ClaimArg::Identity(id))) => Ok(Claim::Subject(id.clone())),
            (ClaimKind::Subject, Some(ClaimArg::Text(name))) => {
                Ok(Claim::Subject(Identity::Name(name.clone())))
            }
            (ClaimKind::Audience, Some(ClaimArg::Identity(id))) => Ok(Claim::Audience(id.clone())),
            (ClaimKind::Audience, Some(ClaimArg::Text(name))) => {
                Ok(Claim::Audience(Identity::Name(name.clone())))
            }

            (ClaimKind::NotBefore, offset) => {
                instant(kind, offset, DEFAULT_NOT_BEFORE_OFFSET, now).map(Claim::NotBefore)
            }
            (ClaimKind::Expiration, offset) => {
                instant(kind, offset, DEFAULT_EXPIRATION_OFFSET, now).map(Claim::Expiration)
            }
            (ClaimKind::IssuedAt, offset) => {
                instant(kind, offset, TimeDelta::zero(), now).map(Claim::IssuedAt)
            }

            (kind, Some(_)) => Err(Error::ClaimArgumentMismatch {
                claim: kind.name().to_string(),
                expected: expected_arg(kind).to_string(),
            }),
            // Requires-kinds without an argument returned above
            (kind, None) => Err(Error::ClaimArgumentsMissing {
                claim: kind.name().to_string(),
            }),
        }
    }

    /// Kind of this claim
    pub fn kind(&self) -> ClaimKind {
        match self {
            Claim::Type => ClaimKind::Type,
            Claim::Algorithm(id) => ClaimKind::Algorithm(*id),
            Claim::Issuer(_) => ClaimKind::Issuer,
            Claim::Subject(_) => ClaimKind::Subject,
            Claim::Audience(_) => ClaimKind::Audience,
            Claim::JwtId(_) => ClaimKind::JwtId,
            Claim::NotBefore(_) => ClaimKind::NotBefore,
            Claim::Expiration(_) => ClaimKind::Expiration,
            Claim::IssuedAt(_) => ClaimKind::IssuedAt,
        }
    }

    /// Wire key of this claim
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Wire value of this claim
    pub fn value(&self) -> Value {
        match self {
            Claim::Type => Value::from("JWT"),
            Claim::Algorithm(id) => Value::from(id.as_str()),
            Claim::Issuer(s) | Claim::JwtId(s) => Value::from(s.as_str()),
            Claim::Subject(id) | Claim::Audience(id) => id.to_value(),
            Claim::NotBefore(t) | Claim::Expiration(t) | Claim::IssuedAt(t) => Value::from(*t),
        }
    }

    /// Validate a decoded candidate value against this claim
    ///
    /// `now` is Unix seconds. Time claims compare the candidate against `now`
    /// with the configured leeway; every other claim compares by equality.
    pub fn is_valid(&self, candidate: Option<&Value>, validation: &Validation, now: i64) -> Result<()> {
        let kind = self.kind();

        let Some(candidate) = candidate else {
            if kind.is_time() {
                return Ok(());
            }
            return Err(Error::ClaimMissing {
                claim: kind.name().to_string(),
            });
        };

        let leeway = validation.leeway_seconds;
        match self {
            Claim::NotBefore(_) => {
                let not_before = timestamp(kind, candidate)?;
                if validation.validate_nbf && now.saturating_add(leeway) < not_before {
                    return Err(Error::TokenNotYetValid {
                        not_before,
                        now,
                        leeway,
                    });
                }
                Ok(())
            }
            Claim::Expiration(_) => {
                let expired_at = timestamp(kind, candidate)?;
                if validation.validate_exp && now.saturating_sub(leeway) > expired_at {
                    return Err(Error::TokenExpired {
                        expired_at,
                        now,
                        leeway,
                    });
                }
                Ok(())
            }
            Claim::IssuedAt(_) => {
                let issued_at = timestamp(kind, candidate)?;
                if validation.validate_iat && issued_at > now.saturating_add(leeway) {
                    return Err(Error::TokenIssuedInFuture {
                        issued_at,
                        now,
                        leeway,
                    });
                }
                Ok(())
            }
            _ => {
                let expected = self.value();
                if *candidate == expected {
                    Ok(())
                } else {
                    Err(Error::ClaimMismatch {
                        claim: kind.name().to_string(),
                        expected: expected.to_string(),
                        found: candidate.to_string(),
                    })
                }
            }
        }
    }
}

fn instant(
    kind: ClaimKind,
    offset: Option<&ClaimArg>,
    default: TimeDelta,
    now: DateTime<Utc>,
) -> Result<i64> {
    let offset = match offset {
        None => default,
        Some(ClaimArg::Offset(delta)) => *delta,
        Some(_) => {
            return Err(Error::ClaimArgumentMismatch {
                claim: kind.name().to_string(),
                expected: expected_arg(kind).to_string(),
            })
        }
    };

    now.checked_add_signed(offset)
        .map(|t| t.timestamp())
        .ok_or_else(|| Error::ConfigurationInvalid(format!("{} offset out of range", kind.name())))
}

fn expected_arg(kind: ClaimKind) -> &'static str {
    match kind {
        ClaimKind::Issuer | ClaimKind::JwtId => "text",
        ClaimKind::Subject | ClaimKind::Audience => "identity",
        ClaimKind::NotBefore | ClaimKind::Expiration | ClaimKind::IssuedAt => "offset",
        ClaimKind::Type | ClaimKind::Algorithm(_) => "no argument",
    }
}

/// Read a NumericDate; fractional seconds are floored
fn timestamp(kind: ClaimKind, value: &Value) -> Result<i64> {
    let malformed = |reason: &str| Error::ClaimMalformed {
        claim: kind.name().to_string(),
        reason: reason.to_string(),
    };

    let Value::Number(n) = value else {
        return Err(malformed("expected a numeric timestamp"));
    };

    if let Some(t) = n.as_i64() {
        return Ok(t);
    }

    match n.as_f64() {
        Some(t) if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 => {
            Ok(t.floor() as i64)
        }
        _ => Err(malformed("timestamp out of range")),
    }
}
