/// Secret key material for HMAC signing and verification
///
/// Text secrets are normalised to their UTF-8 bytes, so `Key::from("secret")`
/// and `Key::from(b"secret")` sign identically. The key is caller-owned and
/// carries no rotation or zeroing behaviour.
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    secret: Vec<u8>,
}

impl Key {
    /// Create a key from raw bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }

    /// `true` when the key holds no bytes
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

// Secrets never show up in logs or panics
impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for Key {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for Key {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Key {
    fn from(secret: &[u8; N]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for Key {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for Key {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
