use super::{Claim, ClaimArg, ClaimKind, Validation};
use crate::algorithm::AlgorithmId;
use crate::error::Result;
use crate::utils::base64url;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Per-instantiation claim arguments, keyed by claim kind
///
/// Passed explicitly when a token is constructed; nothing is stored on the
/// template itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimArgs {
    args: HashMap<ClaimKind, ClaimArg>,
}

impl ClaimArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the argument for one claim kind, replacing any previous one
    pub fn with(mut self, kind: ClaimKind, arg: impl Into<ClaimArg>) -> Self {
        self.args.insert(kind, arg.into());
        self
    }

    pub fn get(&self, kind: &ClaimKind) -> Option<&ClaimArg> {
        self.args.get(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Ordered, uninstantiated list of claim kinds for one token segment
///
/// Kinds are deduplicated by wire name; the first one added wins. Default
/// arguments attached here apply to every instantiation unless overridden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSetTemplate {
    kinds: Vec<ClaimKind>,
    defaults: ClaimArgs,
}

impl ClaimSetTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a template from a list of kinds
    pub fn of(kinds: impl IntoIterator<Item = ClaimKind>) -> Self {
        kinds.into_iter().fold(Self::new(), Self::claim)
    }

    /// Append a claim kind
    pub fn claim(mut self, kind: ClaimKind) -> Self {
        if !self.kinds.iter().any(|k| k.name() == kind.name()) {
            self.kinds.push(kind);
        }
        self
    }

    /// Attach a default argument for a claim kind
    pub fn with_arg(mut self, kind: ClaimKind, arg: impl Into<ClaimArg>) -> Self {
        self.defaults = self.defaults.with(kind, arg);
        self
    }

    /// Configured claim kinds in order
    pub fn kinds(&self) -> &[ClaimKind] {
        &self.kinds
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Instantiate every claim now
    pub fn instantiate(&self, args: &ClaimArgs) -> Result<ClaimSet> {
        self.instantiate_at(args, Utc::now())
    }

    /// Instantiate every claim at a fixed instant
    ///
    /// `args` take precedence over the template's defaults. The first claim
    /// that cannot be built aborts the whole set.
    pub fn instantiate_at(&self, args: &ClaimArgs, now: DateTime<Utc>) -> Result<ClaimSet> {
        let claims = self
            .kinds
            .iter()
            .map(|kind| {
                let arg = args.get(kind).or_else(|| self.defaults.get(kind));
                Claim::instantiate(*kind, arg, now)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ClaimSet { claims })
    }
}

/// Header template for the given algorithm: `typ` + `alg`
pub fn header_for(algorithm: AlgorithmId) -> ClaimSetTemplate {
    ClaimSetTemplate::of([ClaimKind::Type, ClaimKind::Algorithm(algorithm)])
}

/// `{"typ": "JWT", "alg": "HS256"}`
pub fn hs256_header() -> ClaimSetTemplate {
    header_for(AlgorithmId::HS256)
}

/// `{"typ": "JWT", "alg": "HS384"}`
pub fn hs384_header() -> ClaimSetTemplate {
    header_for(AlgorithmId::HS384)
}

/// `{"typ": "JWT", "alg": "HS512"}`
pub fn hs512_header() -> ClaimSetTemplate {
    header_for(AlgorithmId::HS512)
}

/// `{"typ": "JWT", "alg": "none"}`
pub fn unsigned_header() -> ClaimSetTemplate {
    header_for(AlgorithmId::Unsigned)
}

/// An instantiated, immutable set of claims
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Claims in template order
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Look up a claim by wire name
    pub fn get(&self, name: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.name() == name)
    }

    /// JSON object form of the set
    pub fn as_map(&self) -> Map<String, Value> {
        self.claims
            .iter()
            .map(|c| (c.name().to_string(), c.value()))
            .collect()
    }

    /// JSON text of the set
    pub fn as_json(&self) -> String {
        Value::Object(self.as_map()).to_string()
    }

    /// Base64URL segment of the set
    pub fn as_encoded(&self) -> String {
        base64url::encode(&self.as_json())
    }

    /// Validate a decoded segment against the current time
    pub fn is_valid(&self, decoded: &Map<String, Value>, validation: &Validation) -> Result<()> {
        self.is_valid_at(decoded, validation, Utc::now())
    }

    /// Validate a decoded segment claim by claim, failing on the first error
    ///
    /// Keys in `decoded` that this set does not configure are ignored.
    pub fn is_valid_at(
        &self,
        decoded: &Map<String, Value>,
        validation: &Validation,
        now: DateTime<Utc>,
    ) -> Result<()> {
        validation.check()?;
        let now = now.timestamp();

        for claim in &self.claims {
            claim.is_valid(decoded.get(claim.name()), validation, now)?;
        }

        Ok(())
    }
}
