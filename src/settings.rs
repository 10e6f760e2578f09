//! Settings-driven token issuing and verification
//!
//! [`TokenSettings`] captures the deployment choices an integration layer
//! makes once: secret, algorithm, issuer, lifetimes and leeway. From those it
//! derives the header and payload templates and issues or verifies tokens for
//! a principal [`Identity`].
//!
//! ```ignore
//! let settings = TokenSettings::from_json(r#"{"secret_key": "secret", "issuer": "api"}"#)?;
//! let wire = settings.issue(42)?;
//! let claims = settings.verify(&wire, 42)?;
//! ```

use crate::algorithm::{get_signer, AlgorithmId, Signer};
use crate::claims::{header_for, ClaimArgs, ClaimKind, ClaimSetTemplate, Identity, Validation};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::token::{DecodedToken, Token};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::debug;

/// Source of the signing secret
pub trait SecretProvider {
    fn secret(&self) -> Result<Key>;
}

impl SecretProvider for Key {
    fn secret(&self) -> Result<Key> {
        Ok(self.clone())
    }
}

/// Token issuing and verification settings
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenSettings {
    /// Shared HMAC secret
    pub secret_key: String,

    /// Algorithm wire name used for signing and verification (default: HS256)
    pub algorithm: String,

    /// Value of the `iss` claim; omitted from tokens when unset
    pub issuer: Option<String>,

    /// Fixed `aud` value; when set, the principal moves to `sub`
    pub audience: Option<String>,

    /// Token lifetime (default: 7 days)
    pub expiration_seconds: i64,

    /// Delay before a fresh token becomes usable (default: 3 seconds)
    pub not_before_seconds: i64,

    /// Clock skew tolerance (default: 0)
    pub leeway_seconds: i64,

    pub verify_expiration: bool,
    pub verify_not_before: bool,
    pub verify_claims: bool,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            algorithm: AlgorithmId::HS256.as_str().to_string(),
            issuer: None,
            audience: None,
            expiration_seconds: 7 * 24 * 60 * 60,
            not_before_seconds: 3,
            leeway_seconds: 0,
            verify_expiration: true,
            verify_not_before: true,
            verify_claims: true,
        }
    }
}

// The secret never shows up in logs
impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_seconds", &self.expiration_seconds)
            .field("not_before_seconds", &self.not_before_seconds)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("verify_expiration", &self.verify_expiration)
            .field("verify_not_before", &self.verify_not_before)
            .field("verify_claims", &self.verify_claims)
            .finish()
    }
}

impl SecretProvider for TokenSettings {
    fn secret(&self) -> Result<Key> {
        if self.secret_key.is_empty() {
            return Err(Error::SettingsInvalid("secret_key is empty".to_string()));
        }
        Ok(Key::from(self.secret_key.as_str()))
    }
}

impl TokenSettings {
    /// Default settings with the given secret
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            ..Self::default()
        }
    }

    /// Load settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| Error::SettingsInvalid(e.to_string()))?;
        settings.check()?;
        Ok(settings)
    }

    pub fn with_algorithm(mut self, algorithm: AlgorithmId) -> Self {
        self.algorithm = algorithm.as_str().to_string();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_expiration(mut self, seconds: i64) -> Self {
        self.expiration_seconds = seconds;
        self
    }

    pub fn with_not_before(mut self, seconds: i64) -> Self {
        self.not_before_seconds = seconds;
        self
    }

    pub fn with_leeway(mut self, seconds: i64) -> Self {
        self.leeway_seconds = seconds;
        self
    }

    pub fn without_expiration_check(mut self) -> Self {
        self.verify_expiration = false;
        self
    }

    pub fn without_not_before_check(mut self) -> Self {
        self.verify_not_before = false;
        self
    }

    /// Verify signatures only
    pub fn without_claims_check(mut self) -> Self {
        self.verify_claims = false;
        self
    }

    /// Validate the settings as a whole
    pub fn check(&self) -> Result<()> {
        self.algorithm_id()?;
        self.validation().check()?;
        offset("expiration_seconds", self.expiration_seconds)?;
        offset("not_before_seconds", self.not_before_seconds)?;
        Ok(())
    }

    /// Configured algorithm
    ///
    /// `none` is refused here: an unsigned token can never verify, so a
    /// deployment configured with it could not authenticate anyone.
    pub fn algorithm_id(&self) -> Result<AlgorithmId> {
        match AlgorithmId::from_str(&self.algorithm) {
            Ok(AlgorithmId::Unsigned) => Err(Error::SettingsInvalid(
                "algorithm 'none' cannot be configured".to_string(),
            )),
            Ok(id) => Ok(id),
            Err(_) => Err(Error::SettingsInvalid(format!(
                "unknown algorithm '{}'",
                self.algorithm
            ))),
        }
    }

    /// Signer for the configured algorithm
    pub fn signer(&self) -> Result<Signer> {
        Ok(get_signer(&self.algorithm_id()?))
    }

    /// Claims validation derived from the settings
    pub fn validation(&self) -> Validation {
        let mut validation = Validation::new().leeway(self.leeway_seconds);
        if !self.verify_expiration {
            validation = validation.no_exp_validation();
        }
        if !self.verify_not_before {
            validation = validation.no_nbf_validation();
        }
        if !self.verify_claims {
            validation = validation.skip_claims();
        }
        validation
    }

    /// `typ` + `alg` for the configured algorithm
    pub fn header_template(&self) -> Result<ClaimSetTemplate> {
        Ok(header_for(self.algorithm_id()?))
    }

    /// `iss` (if configured), `sub` (if the audience is fixed), `aud`, `nbf`, `exp`
    pub fn payload_template(&self) -> Result<ClaimSetTemplate> {
        let mut template = ClaimSetTemplate::new();

        if let Some(issuer) = &self.issuer {
            template = template
                .claim(ClaimKind::Issuer)
                .with_arg(ClaimKind::Issuer, issuer.as_str());
        }
        if let Some(audience) = &self.audience {
            template = template
                .claim(ClaimKind::Subject)
                .claim(ClaimKind::Audience)
                .with_arg(ClaimKind::Audience, audience.as_str());
        } else {
            template = template.claim(ClaimKind::Audience);
        }

        Ok(template
            .claim(ClaimKind::NotBefore)
            .with_arg(
                ClaimKind::NotBefore,
                offset("not_before_seconds", self.not_before_seconds)?,
            )
            .claim(ClaimKind::Expiration)
            .with_arg(
                ClaimKind::Expiration,
                offset("expiration_seconds", self.expiration_seconds)?,
            ))
    }

    fn principal_claim(&self) -> ClaimKind {
        if self.audience.is_some() {
            ClaimKind::Subject
        } else {
            ClaimKind::Audience
        }
    }

    /// Unsigned token for a principal, instantiated now
    pub fn token_for(&self, identity: impl Into<Identity>) -> Result<Token> {
        self.token_for_at(identity, Utc::now())
    }

    /// Unsigned token for a principal, instantiated at `now`
    pub fn token_for_at(&self, identity: impl Into<Identity>, now: DateTime<Utc>) -> Result<Token> {
        let identity: Identity = identity.into();
        let args = ClaimArgs::new().with(self.principal_claim(), identity);
        Token::new_at(&self.header_template()?, &self.payload_template()?, &args, now)
    }

    /// Construct, sign and build a token for a principal
    pub fn issue(&self, identity: impl Into<Identity>) -> Result<String> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(&self, identity: impl Into<Identity>, now: DateTime<Utc>) -> Result<String> {
        let identity = identity.into();
        let signer = self.signer()?;
        let wire = self
            .token_for_at(identity.clone(), now)?
            .sign(&self.secret()?, signer.as_ref())?
            .build()?;

        debug!(principal = %identity, algorithm = signer.name(), "token issued");
        Ok(wire)
    }

    /// Verify a token issued for `identity`
    ///
    /// The algorithm is the configured one; the token's own `alg` is only
    /// compared as a claim.
    pub fn verify(&self, wire: &str, identity: impl Into<Identity>) -> Result<DecodedToken> {
        self.verify_at(wire, identity, Utc::now())
    }

    pub fn verify_at(
        &self,
        wire: &str,
        identity: impl Into<Identity>,
        now: DateTime<Utc>,
    ) -> Result<DecodedToken> {
        let expected = self.token_for_at(identity, now)?;
        let signer = self.signer()?;
        expected.verify_at(wire, &self.secret()?, signer.as_ref(), &self.validation(), now)
    }

    /// Read the principal a token claims to be for, without verifying it
    ///
    /// Lets an integration layer look the principal up before calling
    /// [`verify`](Self::verify). The value is attacker-controlled until then.
    pub fn peek_identity(&self, wire: &str) -> Result<Identity> {
        let claim = self.principal_claim().name();
        let (signing_input, _) = Token::split_crypto(wire)?;
        let (_, payload) = Token::clean_claimsets(signing_input)?;

        let value = payload.get(claim).ok_or_else(|| Error::ClaimMissing {
            claim: claim.to_string(),
        })?;

        Identity::from_value(value).ok_or_else(|| Error::ClaimMalformed {
            claim: claim.to_string(),
            reason: "expected an integer or string identity".to_string(),
        })
    }
}

fn offset(field: &str, seconds: i64) -> Result<TimeDelta> {
    TimeDelta::try_seconds(seconds)
        .ok_or_else(|| Error::SettingsInvalid(format!("{field} out of range: {seconds}")))
}
