mod traits;

pub mod hmac;
pub mod none;
pub mod rsa;

pub use traits::{get_signer, Algorithm, Signer};

use crate::error::{Error, Result};

/// Algorithm identifier as written into the `alg` header claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// RSA with SHA-256 (not implemented)
    RS256,

    /// No signature (`none`)
    Unsigned,
}

impl AlgorithmId {
    /// Parse an algorithm wire name
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),
            "RS256" => Ok(AlgorithmId::RS256),
            "none" => Ok(AlgorithmId::Unsigned),
            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }

    /// Convert to the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::Unsigned => "none",
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512
        )
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Key;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(AlgorithmId::from_str("HS256").unwrap(), AlgorithmId::HS256);
        assert_eq!(AlgorithmId::from_str("HS384").unwrap(), AlgorithmId::HS384);
        assert_eq!(AlgorithmId::from_str("HS512").unwrap(), AlgorithmId::HS512);
        assert_eq!(AlgorithmId::from_str("RS256").unwrap(), AlgorithmId::RS256);
        assert_eq!(
            AlgorithmId::from_str("none").unwrap(),
            AlgorithmId::Unsigned
        );

        assert!(matches!(
            AlgorithmId::from_str("hs256"),
            Err(Error::AlgorithmUnsupported(_))
        ));
        assert!(matches!(
            AlgorithmId::from_str("ES512"),
            Err(Error::AlgorithmUnsupported(_))
        ));
    }

    #[test]
    fn test_wire_names_round_trip() {
        for id in [
            AlgorithmId::HS256,
            AlgorithmId::HS384,
            AlgorithmId::HS512,
            AlgorithmId::RS256,
            AlgorithmId::Unsigned,
        ] {
            assert_eq!(AlgorithmId::from_str(id.as_str()).unwrap(), id);
            assert_eq!(id.to_string(), id.as_str());
        }
    }

    #[test]
    fn test_get_signer_matches_id() {
        for id in [
            AlgorithmId::HS256,
            AlgorithmId::HS384,
            AlgorithmId::HS512,
            AlgorithmId::RS256,
            AlgorithmId::Unsigned,
        ] {
            assert_eq!(get_signer(&id).name(), id.as_str());
        }
    }

    #[test]
    fn test_only_hmac_is_symmetric() {
        assert!(AlgorithmId::HS384.is_symmetric());
        assert!(!AlgorithmId::RS256.is_symmetric());
        assert!(!AlgorithmId::Unsigned.is_symmetric());

        let signer = get_signer(&AlgorithmId::Unsigned);
        assert!(signer.sign(b"x", &Key::from("k")).unwrap().is_empty());
    }
}
