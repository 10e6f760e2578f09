//! Base64URL encoding/decoding per RFC 4648 §5
//!
//! Output keeps the `=` padding the alphabet specifies. Input is accepted with
//! canonical padding or without any, so tokens from producers that strip
//! padding (RFC 7515 style) still decode; non-canonical padding is rejected.

use crate::error::{Error, Result};
use crate::token::Segment;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

const URL_SAFE_PADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes to a padded Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_PADDED.encode(input)
}

/// Encode a string to Base64URL
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode a Base64URL segment to bytes with maximum size limit
pub(crate) fn decode_bytes(input: &str, segment: Segment, max_size: usize) -> Result<Vec<u8>> {
    // Padding, when present, must fill the final quantum
    if input.contains('=') && input.len() % 4 != 0 {
        return Err(Error::FormatInvalidBase64 {
            segment,
            reason: "non-canonical padding".to_string(),
        });
    }

    let result = URL_SAFE_PADDED
        .decode(input)
        .map_err(|e| Error::FormatInvalidBase64 {
            segment,
            reason: e.to_string(),
        })?;

    if result.len() > max_size {
        return Err(Error::FormatInvalidBase64 {
            segment,
            reason: format!(
                "decoded size exceeds limit: {} bytes (max: {})",
                result.len(),
                max_size
            ),
        });
    }

    Ok(result)
}

/// Decode a Base64URL segment to a UTF-8 string with size limit
pub(crate) fn decode_string(input: &str, segment: Segment, max_size: usize) -> Result<String> {
    decode_bytes(input, segment, max_size).and_then(|bytes| {
        String::from_utf8(bytes).map_err(|e| Error::FormatInvalidBase64 {
            segment,
            reason: format!("invalid UTF-8: {e}"),
        })
    })
}
