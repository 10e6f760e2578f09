//! Token construction, signing and building
//!
//! A [`Token`] owns one header [`ClaimSet`] and one payload [`ClaimSet`]. It
//! starts [`TokenState::Unsigned`]; [`Token::sign`] stores the encoded MAC and
//! moves it to [`TokenState::Signed`], after which [`Token::build`] renders
//! the wire string.

use crate::algorithm::Algorithm;
use crate::claims::{ClaimArgs, ClaimSet, ClaimSetTemplate};
use crate::error::{Error, Result};
use crate::keys::Key;
use crate::utils::base64url;

use chrono::{DateTime, Utc};
use tracing::debug;

/// Signing state of a [`Token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Claims are fixed, no signature yet
    Unsigned,
    /// A signature has been computed; the token can be built
    Signed,
}

/// A token under construction
///
/// # Examples
///
/// ```ignore
/// use jwtset::*;
///
/// let payload = ClaimSetTemplate::of([ClaimKind::Issuer, ClaimKind::Expiration]);
/// let args = ClaimArgs::new().with(ClaimKind::Issuer, "issuer");
///
/// let wire = Token::new(&hs256_header(), &payload, &args)?
///     .sign(&Key::from("secret"), &HS256)?
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    header: ClaimSet,
    payload: ClaimSet,
    signature: Option<String>,
}

impl Token {
    /// Instantiate both claim sets now
    pub fn new(
        header: &ClaimSetTemplate,
        payload: &ClaimSetTemplate,
        args: &ClaimArgs,
    ) -> Result<Self> {
        Self::new_at(header, payload, args, Utc::now())
    }

    /// Instantiate both claim sets at a fixed instant
    pub fn new_at(
        header: &ClaimSetTemplate,
        payload: &ClaimSetTemplate,
        args: &ClaimArgs,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let header = header.instantiate_at(args, now)?;
        let payload = payload.instantiate_at(args, now)?;
        Ok(Self::from_claimsets(header, payload))
    }

    /// Wrap already instantiated claim sets
    pub fn from_claimsets(header: ClaimSet, payload: ClaimSet) -> Self {
        Self {
            header,
            payload,
            signature: None,
        }
    }

    pub fn header(&self) -> &ClaimSet {
        &self.header
    }

    pub fn payload(&self) -> &ClaimSet {
        &self.payload
    }

    pub fn state(&self) -> TokenState {
        match self.signature {
            Some(_) => TokenState::Signed,
            None => TokenState::Unsigned,
        }
    }

    /// Base64URL signature segment, once signed
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Encoded header `.` encoded payload
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header.as_encoded(), self.payload.as_encoded())
    }

    /// Sign the token, replacing any previous signature
    ///
    /// The `alg` claim in the header is not consulted; the caller decides which
    /// algorithm signs.
    pub fn sign(mut self, key: &Key, algorithm: &dyn Algorithm) -> Result<Self> {
        let signature = algorithm.sign(self.signing_input().as_bytes(), key)?;
        self.signature = Some(base64url::encode_bytes(&signature));

        debug!(algorithm = algorithm.name(), "token signed");
        Ok(self)
    }

    /// Render the three-segment wire string
    ///
    /// Fails with [`Error::SignatureMissing`] if the token was never signed.
    pub fn build(&self) -> Result<String> {
        let signature = self.signature.as_deref().ok_or(Error::SignatureMissing)?;
        let wire = format!("{}.{}", self.signing_input(), signature);

        debug!(length = wire.len(), "token built");
        Ok(wire)
    }
}
