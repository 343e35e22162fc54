//! Cryptographic capability used by the composer and validator
//!
//! The composer and validator never call a primitive directly; they go through
//! a [`CryptoProvider`] so tests and embedders can substitute their own.

use crate::algorithm::{get_algorithm, AlgorithmId};
use crate::error::Result;
use crate::keys::SigningKey;

/// Signs and verifies raw signing input for a given algorithm
pub trait CryptoProvider: Send + Sync {
    /// Produce the raw signature bytes over `signing_input`
    fn sign(&self, algorithm: AlgorithmId, key: &SigningKey, signing_input: &[u8])
        -> Result<Vec<u8>>;

    /// Check `signature` against `signing_input`
    ///
    /// A mismatch is reported as
    /// [`Error::SignatureInvalid`](crate::Error::SignatureInvalid).
    fn verify(
        &self,
        algorithm: AlgorithmId,
        key: &SigningKey,
        signing_input: &[u8],
        signature: &[u8],
    ) -> Result<()>;
}

/// Provider backed by the built-in HMAC and RSA primitives
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProvider;

impl CryptoProvider for DefaultProvider {
    fn sign(
        &self,
        algorithm: AlgorithmId,
        key: &SigningKey,
        signing_input: &[u8],
    ) -> Result<Vec<u8>> {
        get_algorithm(algorithm).sign(signing_input, key)
    }

    fn verify(
        &self,
        algorithm: AlgorithmId,
        key: &SigningKey,
        signing_input: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        get_algorithm(algorithm).verify(signing_input, signature, key)
    }
}
