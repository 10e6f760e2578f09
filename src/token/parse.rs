//! Static decoding of wire strings
//!
//! None of these functions need a [`Token`] instance and none of them trust
//! what they decode. Each stage returns borrowed slices of the original input
//! so the signing input is verified byte-for-byte as received.

use super::{Segment, Token};
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;

use serde_json::{Map, Value};

/// Decoded, not yet trusted, contents of a wire string
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    header: Map<String, Value>,
    payload: Map<String, Value>,
    signature: Vec<u8>,
}

impl DecodedToken {
    pub fn header(&self) -> &Map<String, Value> {
        &self.header
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Payload claim by name
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    pub fn into_parts(self) -> (Map<String, Value>, Map<String, Value>, Vec<u8>) {
        (self.header, self.payload, self.signature)
    }
}

impl Token {
    /// Split off the signature segment at the last `.`
    ///
    /// Returns `(signing_input, signature_segment)`.
    pub fn split_crypto(wire: &str) -> Result<(&str, &str)> {
        check_length(wire)?;
        wire.rsplit_once('.').ok_or_else(|| Error::FormatInvalid {
            token: wire.to_string(),
        })
    }

    /// Split a signing input into `(header_segment, payload_segment)`
    ///
    /// The input must contain exactly one `.`.
    pub fn split_claimsets(signing_input: &str) -> Result<(&str, &str)> {
        check_length(signing_input)?;
        match signing_input.split_once('.') {
            Some((header, payload)) if !payload.contains('.') => Ok((header, payload)),
            _ => Err(Error::FormatInvalid {
                token: signing_input.to_string(),
            }),
        }
    }

    /// Split a wire string into its three raw segments
    pub fn split(wire: &str) -> Result<(&str, &str, &str)> {
        let (signing_input, signature) = Self::split_crypto(wire)?;
        let (header, payload) = Self::split_claimsets(signing_input).map_err(|_| {
            Error::FormatInvalid {
                token: wire.to_string(),
            }
        })?;
        Ok((header, payload, signature))
    }

    /// Split off and decode the signature
    ///
    /// Returns `(signing_input, signature_bytes)`.
    pub fn clean_crypto(wire: &str) -> Result<(&str, Vec<u8>)> {
        let (signing_input, signature) = Self::split_crypto(wire)?;
        let signature =
            base64url::decode_bytes(signature, Segment::Signature, MAX_DECODED_SIGNATURE_SIZE)?;
        Ok((signing_input, signature))
    }

    /// Decode and parse both claim set segments of a signing input
    pub fn clean_claimsets(
        signing_input: &str,
    ) -> Result<(Map<String, Value>, Map<String, Value>)> {
        let (header, payload) = Self::split_claimsets(signing_input)?;
        let header = decode_object(header, Segment::Header, MAX_DECODED_HEADER_SIZE)?;
        let payload = decode_object(payload, Segment::Payload, MAX_DECODED_PAYLOAD_SIZE)?;
        Ok((header, payload))
    }

    /// Fully decode a wire string without verifying anything
    ///
    /// The segment count is checked before any segment is decoded.
    pub fn clean(wire: &str) -> Result<DecodedToken> {
        Self::split(wire)?;
        let (signing_input, signature) = Self::clean_crypto(wire)?;
        let (header, payload) = Self::clean_claimsets(signing_input)?;
        Ok(DecodedToken {
            header,
            payload,
            signature,
        })
    }
}

fn check_length(input: &str) -> Result<()> {
    if input.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: input.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }
    Ok(())
}

fn decode_object(segment_b64: &str, segment: Segment, max_size: usize) -> Result<Map<String, Value>> {
    let json = base64url::decode_string(segment_b64, segment, max_size)?;

    let value: Value = serde_json::from_str(&json).map_err(|e| Error::FormatInvalidJson {
        segment,
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Error::FormatInvalidJson {
            segment,
            reason: "expected a JSON object".to_string(),
        }),
    }
}
