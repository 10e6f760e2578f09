use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::keys::Key;

/// The `none` algorithm
///
/// Produces an empty signature and never verifies. It exists so the `none`
/// header claim can be built and rejected; it is never a valid default.
#[derive(Debug, Clone, Copy)]
pub struct Unsigned;

impl Algorithm for Unsigned {
    fn name(&self) -> &'static str {
        "none"
    }

    fn sign(&self, _message: &[u8], _key: &Key) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn verify(&self, _message: &[u8], _key: &Key, _signature: &[u8]) -> Result<bool> {
        Ok(false)
    }
}
