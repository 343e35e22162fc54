use crate::algorithm::AlgorithmId;
use crate::error::Result;
use crate::keys::SigningKey;

/// Core algorithm trait that all JWT signature algorithms implement
///
/// Different algorithm families (HMAC, RSA PKCS#1 v1.5, RSA-PSS) implement
/// this trait. Inputs and signatures are raw bytes; Base64URL handling lives
/// in the composer and validator.
pub trait Algorithm {
    /// The algorithm identifier (e.g., "HS256", "PS384")
    fn name(&self) -> &'static str;

    /// Sign the signing input (`header.payload`)
    fn sign(&self, signing_input: &[u8], key: &SigningKey) -> Result<Vec<u8>>;

    /// Verify a signature over the signing input
    ///
    /// Returns [`Error::SignatureInvalid`](crate::Error::SignatureInvalid) when
    /// the signature does not match.
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &SigningKey) -> Result<()>;
}

/// Type alias for boxed algorithm trait objects
pub type SignatureAlgorithm = Box<dyn Algorithm + Send + Sync>;

/// Get the signature algorithm for the given algorithm ID
pub fn get_algorithm(algorithm: AlgorithmId) -> SignatureAlgorithm {
    match algorithm {
        AlgorithmId::HS256 => Box::new(super::hmac::HS256),
        AlgorithmId::HS384 => Box::new(super::hmac::HS384),
        AlgorithmId::HS512 => Box::new(super::hmac::HS512),

        AlgorithmId::RS256 => Box::new(super::rsa::RS256),
        AlgorithmId::RS384 => Box::new(super::rsa::RS384),
        AlgorithmId::RS512 => Box::new(super::rsa::RS512),

        AlgorithmId::PS256 => Box::new(super::rsa::PS256),
        AlgorithmId::PS384 => Box::new(super::rsa::PS384),
        AlgorithmId::PS512 => Box::new(super::rsa::PS512),
    }
}
