//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded JWT header JSON (8KB)
/// Headers are typically small (< 1KB), but we allow reasonable margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (1KB)
/// RSA-4096 signatures are 512 bytes
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 1024;

/// Default tolerance for `iat` values ahead of the reference time
pub(crate) const DEFAULT_IAT_SKEW_SECONDS: i64 = 60;

/// Length of the random secret produced by the key generator (512 bits)
pub(crate) const HMAC_SECRET_BYTES: usize = 64;

/// Length of generated key identifiers
pub(crate) const KID_LENGTH: usize = 8;

/// Smallest RSA modulus accepted for signing or verification (RFC 7518 3.3)
pub(crate) const MIN_RSA_KEY_BITS: usize = 2048;

/// RSA modulus sizes offered by the key generator
pub(crate) const RSA_KEY_SIZES: [usize; 3] = [2048, 3072, 4096];
