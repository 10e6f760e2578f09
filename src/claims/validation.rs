use crate::error::{Error, Result};
use crate::limits::MAX_LEEWAY_SECONDS;

/// Configuration for claims validation
///
/// Only affects how decoded claims are judged. The signature is always
/// checked regardless of these settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Validate expiration time (exp claim)
    pub validate_exp: bool,

    /// Validate not-before time (nbf claim)
    pub validate_nbf: bool,

    /// Validate issued-at time (iat claim)
    pub validate_iat: bool,

    /// Run claim validation at all after the signature verifies
    pub validate_claims: bool,

    /// Clock skew tolerance in seconds (default: 0)
    ///
    /// Zero and negative values are legal; a negative leeway narrows the
    /// accepted window.
    pub leeway_seconds: i64,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            validate_exp: true,
            validate_nbf: true,
            validate_iat: true,
            validate_claims: true,
            leeway_seconds: 0,
        }
    }
}

impl Validation {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clock skew tolerance
    pub fn leeway(mut self, seconds: i64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    /// Disable expiration validation
    pub fn no_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self
    }

    /// Disable not-before validation
    pub fn no_nbf_validation(mut self) -> Self {
        self.validate_nbf = false;
        self
    }

    /// Disable issued-at validation
    pub fn no_iat_validation(mut self) -> Self {
        self.validate_iat = false;
        self
    }

    /// Verify the signature only (use with extreme caution!)
    ///
    /// Decoded claims are returned without any check, including `typ` and
    /// `alg`. Only use this if the caller validates the claims itself.
    pub fn skip_claims(mut self) -> Self {
        self.validate_claims = false;
        self
    }

    /// Reject a leeway large enough to defeat the time checks
    pub fn check(&self) -> Result<()> {
        if self.leeway_seconds.unsigned_abs() > MAX_LEEWAY_SECONDS.unsigned_abs() {
            return Err(Error::LeewayTooLarge {
                value: self.leeway_seconds,
                max: MAX_LEEWAY_SECONDS,
            });
        }
        Ok(())
    }
}
