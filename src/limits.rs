//! Size limit constants for input validation

/// Maximum length for a token wire string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

// ============================================================================
// Decoded segment size limits
// ============================================================================

/// Maximum size for decoded header JSON (8KB)
/// Headers carry a handful of short claims (`typ`, `alg`)
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// HS512 produces 64 bytes; the margin covers future algorithms
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

// ============================================================================
// Validation bounds
// ============================================================================

/// Maximum absolute leeway (300 seconds = 5 minutes)
/// Keeps a configured leeway from effectively disabling time checks
pub(crate) const MAX_LEEWAY_SECONDS: i64 = 300;
