//! Error types for token composition, decoding and key handling
//!
//! Validation check failures are not errors: the validator records them in a
//! [`ValidationResult`](crate::ValidationResult). Everything here is a hard
//! failure of an operation.

use thiserror::Error;

/// Errors that can occur while composing, parsing or handling keys
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(#[from] FormatError),

    #[error("Base64URL decoding failed: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    InvalidJson(String),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    // ============================================================================
    // Key & Signature Errors
    // ============================================================================
    #[error("Missing key material: {0}")]
    MissingKey(String),

    #[error(
        "Key type mismatch for algorithm '{algorithm}': expected {expected_key_type}, got {actual_key_type}"
    )]
    KeyTypeMismatch {
        algorithm: String,
        expected_key_type: String,
        actual_key_type: String,
    },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Signature verification failed")]
    SignatureInvalid,

    // ============================================================================
    // Key Storage Errors
    // ============================================================================
    #[error("Invalid key name '{0}'")]
    InvalidKeyName(String),

    #[error("Key store error: {0}")]
    KeyStore(String),
}

/// Structural problems found while decoding a compact token
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("token is empty")]
    Empty,

    #[error("token too large: {size} bytes (maximum: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("expected 3 parts separated by '.', got {found}")]
    SegmentCount { found: usize },

    #[error("{segment} segment is empty")]
    EmptySegment { segment: &'static str },

    #[error("failed to decode {segment}: {reason}")]
    Base64 {
        segment: &'static str,
        reason: String,
    },

    #[error("failed to parse {segment} JSON: {reason}")]
    Json {
        segment: &'static str,
        reason: String,
    },

    #[error("{segment} is not a JSON object")]
    NotAnObject { segment: &'static str },
}

/// Result type alias for jwtsmith operations
pub type Result<T> = std::result::Result<T, Error>;
