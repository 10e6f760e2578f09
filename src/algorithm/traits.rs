use crate::error::Result;
use crate::keys::Key;

/// Core algorithm trait that all token signing algorithms implement
///
/// Implementations are stateless. The verifying party picks the implementation
/// from its own configuration; the `alg` value of an untrusted header never
/// selects one.
pub trait Algorithm {
    /// The algorithm identifier (e.g., "HS256", "none")
    ///
    /// Informational only. The `alg` written into a header comes from the
    /// header claim set, not from this value.
    fn name(&self) -> &'static str;

    /// Sign a message
    ///
    /// # Arguments
    /// * `message` - The signing input (encoded header `.` encoded payload)
    /// * `key` - The secret to sign with
    fn sign(&self, message: &[u8], key: &Key) -> Result<Vec<u8>>;

    /// Verify raw signature bytes against a message
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for algorithms that
    /// cannot run at all.
    fn verify(&self, message: &[u8], key: &Key, signature: &[u8]) -> Result<bool>;
}

/// Type alias for boxed algorithm trait objects
pub type Signer = Box<dyn Algorithm + Send + Sync>;

/// Get the signer implementation for the given algorithm ID
pub fn get_signer(algorithm: &super::AlgorithmId) -> Signer {
    match algorithm {
        super::AlgorithmId::HS256 => Box::new(super::hmac::HS256),
        super::AlgorithmId::HS384 => Box::new(super::hmac::HS384),
        super::AlgorithmId::HS512 => Box::new(super::hmac::HS512),
        super::AlgorithmId::RS256 => Box::new(super::rsa::RS256),
        super::AlgorithmId::Unsigned => Box::new(super::none::Unsigned),
    }
}
