use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;

/// RS256 placeholder (RSASSA-PKCS1-v1_5 with SHA-256)
///
/// Asymmetric signing is not implemented. Both operations fail with
/// [`Error::AlgorithmNotImplemented`] and never fall back to HMAC.
#[derive(Debug, Clone, Copy)]
pub struct RS256;

impl Algorithm for RS256 {
    fn name(&self) -> &'static str {
        "RS256"
    }

    fn sign(&self, _message: &[u8], _key: &Key) -> Result<Vec<u8>> {
        Err(Error::AlgorithmNotImplemented(self.name().to_string()))
    }

    fn verify(&self, _message: &[u8], _key: &Key, _signature: &[u8]) -> Result<bool> {
        Err(Error::AlgorithmNotImplemented(self.name().to_string()))
    }
}
