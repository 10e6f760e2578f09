use super::{DecodedToken, Token};
use crate::algorithm::Algorithm;
use crate::claims::{ClaimArgs, ClaimSetTemplate, Validation};
use crate::error::{Error, Result};
use crate::keys::Key;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Construct an unsigned token from a header and a payload template
pub fn construct_token(
    header: &ClaimSetTemplate,
    payload: &ClaimSetTemplate,
    args: &ClaimArgs,
) -> Result<Token> {
    Token::new(header, payload, args)
}

/// Verify a wire string against the claims an expected token carries
///
/// `algorithm` and `key` come from the verifier's configuration. The header's
/// `alg` is only compared against `expected`'s header claims, after the
/// signature has been checked with `algorithm`.
pub fn verify_token(
    wire: &str,
    expected: &Token,
    key: &Key,
    algorithm: &dyn Algorithm,
    validation: &Validation,
) -> Result<DecodedToken> {
    expected.verify(wire, key, algorithm, validation)
}

impl Token {
    /// Verify `wire` with this token's claim sets as the expected values
    pub fn verify(
        &self,
        wire: &str,
        key: &Key,
        algorithm: &dyn Algorithm,
        validation: &Validation,
    ) -> Result<DecodedToken> {
        self.verify_at(wire, key, algorithm, validation, Utc::now())
    }

    /// Verify `wire` against a fixed notion of "now"
    ///
    /// Stages run in order and the first failure is returned:
    /// 1. structural decoding of all three segments
    /// 2. MAC over the signing input exactly as received
    /// 3. header claims, then payload claims (unless claims are skipped)
    pub fn verify_at(
        &self,
        wire: &str,
        key: &Key,
        algorithm: &dyn Algorithm,
        validation: &Validation,
        now: DateTime<Utc>,
    ) -> Result<DecodedToken> {
        let (signing_input, _) = Self::split_crypto(wire)?;
        let decoded = Self::clean(wire)?;

        if !algorithm.verify(signing_input.as_bytes(), key, decoded.signature())? {
            warn!(algorithm = algorithm.name(), "token signature mismatch");
            return Err(Error::SignatureInvalid {
                token: wire.to_string(),
            });
        }

        if validation.validate_claims {
            self.header()
                .is_valid_at(decoded.header(), validation, now)
                .and_then(|_| self.payload().is_valid_at(decoded.payload(), validation, now))
                .inspect_err(|e| warn!(claim = e.claim(), error = %e, "token claims rejected"))?;
        }

        debug!(algorithm = algorithm.name(), "token verified");
        Ok(decoded)
    }
}
