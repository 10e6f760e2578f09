use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::Key;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
#[derive(Debug, Clone, Copy)]
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
#[derive(Debug, Clone, Copy)]
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
#[derive(Debug, Clone, Copy)]
pub struct HS512;

macro_rules! hmac_algorithm {
    ($alg:ident, $digest:ty, $name:literal) => {
        impl Algorithm for $alg {
            fn name(&self) -> &'static str {
                $name
            }

            fn sign(&self, message: &[u8], key: &Key) -> Result<Vec<u8>> {
                let mut mac = Hmac::<$digest>::new_from_slice(key.as_bytes())
                    .map_err(|e| Error::ConfigurationInvalid(format!("{}: {e}", $name)))?;
                mac.update(message);
                Ok(mac.finalize().into_bytes().to_vec())
            }

            fn verify(&self, message: &[u8], key: &Key, signature: &[u8]) -> Result<bool> {
                let expected = self.sign(message, key)?;
                Ok(signatures_match(&expected, signature))
            }
        }
    };
}

hmac_algorithm!(HS256, Sha256, "HS256");
hmac_algorithm!(HS384, Sha384, "HS384");
hmac_algorithm!(HS512, Sha512, "HS512");

/// Constant-time comparison of an expected and a provided MAC
fn signatures_match(expected: &[u8], provided: &[u8]) -> bool {
    if expected.len() != provided.len() {
        return false;
    }
    constant_time_eq(expected, provided)
}
