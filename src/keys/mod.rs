//! Key material for signing and verification
//!
//! Keys are supplied by the caller on every call and never retained by the
//! composer or validator:
//! - HMAC secrets (for `HS*` algorithms)
//! - RSA keys as PEM text (for `RS*` and `PS*` algorithms)

pub mod generate;
pub mod store;

use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::limits::MIN_RSA_KEY_BITS;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Key material used to sign or verify a token
#[derive(Debug, Clone)]
pub enum SigningKey {
    /// Shared secret for HMAC algorithms
    Hmac(HmacSecret),

    /// PEM-encoded RSA key material
    Rsa(RsaKeyMaterial),
}

impl SigningKey {
    /// Create an HMAC key from secret bytes
    pub fn hmac(secret: impl Into<HmacSecret>) -> Self {
        SigningKey::Hmac(secret.into())
    }

    /// Create an RSA signing key from a PKCS#8 or PKCS#1 private key PEM
    pub fn rsa_private(pem: impl Into<String>) -> Self {
        SigningKey::Rsa(RsaKeyMaterial {
            private_key_pem: Some(pem.into()),
            public_key_pem: None,
        })
    }

    /// Create an RSA verification key from an SPKI or PKCS#1 public key PEM
    pub fn rsa_public(pem: impl Into<String>) -> Self {
        SigningKey::Rsa(RsaKeyMaterial {
            private_key_pem: None,
            public_key_pem: Some(pem.into()),
        })
    }

    /// Create an RSA key holding both halves of a key pair
    pub fn rsa_pair(private_pem: impl Into<String>, public_pem: impl Into<String>) -> Self {
        SigningKey::Rsa(RsaKeyMaterial {
            private_key_pem: Some(private_pem.into()),
            public_key_pem: Some(public_pem.into()),
        })
    }

    /// Signing method this key can be used with
    pub fn method(&self) -> SigningMethod {
        match self {
            SigningKey::Hmac(_) => SigningMethod::Hmac,
            SigningKey::Rsa(_) => SigningMethod::Rsa,
        }
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            SigningKey::Hmac(_) => "HMAC",
            SigningKey::Rsa(_) => "RSA",
        }
    }

    /// True when the key carries no usable material at all
    pub fn is_empty(&self) -> bool {
        match self {
            SigningKey::Hmac(secret) => secret.as_bytes().is_empty(),
            SigningKey::Rsa(material) => {
                material.private_key_pem.is_none() && material.public_key_pem.is_none()
            }
        }
    }

    /// Get as HMAC secret or return error
    pub fn as_hmac(&self, algorithm: &str) -> Result<&HmacSecret> {
        match self {
            SigningKey::Hmac(secret) => Ok(secret),
            _ => Err(self.mismatch(algorithm, "HMAC")),
        }
    }

    /// Get as RSA key material or return error
    pub fn as_rsa(&self, algorithm: &str) -> Result<&RsaKeyMaterial> {
        match self {
            SigningKey::Rsa(material) => Ok(material),
            _ => Err(self.mismatch(algorithm, "RSA")),
        }
    }

    fn mismatch(&self, algorithm: &str, expected: &str) -> Error {
        Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: expected.to_string(),
            actual_key_type: self.key_type().to_string(),
        }
    }
}

/// Shared secret for HMAC algorithms
#[derive(Clone, PartialEq, Eq)]
pub struct HmacSecret {
    secret: Vec<u8>,
}

impl HmacSecret {
    /// Create a new HMAC secret
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for HmacSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSecret")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for HmacSecret {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for HmacSecret {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for HmacSecret {
    fn from(secret: &[u8; N]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for HmacSecret {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for HmacSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// PEM-encoded RSA key material
///
/// Either half may be absent. Signing needs the private key; verification uses
/// the public key, or derives it from the private key when only that is held.
#[derive(Clone, Default)]
pub struct RsaKeyMaterial {
    pub private_key_pem: Option<String>,
    pub public_key_pem: Option<String>,
}

impl RsaKeyMaterial {
    /// PKCS#8 DER of the private key
    pub(crate) fn private_key_pkcs8_der(&self) -> Result<Vec<u8>> {
        let pem = self
            .private_key_pem
            .as_deref()
            .ok_or_else(|| Error::MissingKey("RSA private key is required for signing".into()))?;

        let private_key = parse_private_key(pem)?;
        check_modulus_size(&private_key)?;
        let der = private_key
            .to_pkcs8_der()
            .map_err(|e| Error::InvalidKey(format!("failed to encode private key: {e}")))?;
        Ok(der.as_bytes().to_vec())
    }

    /// PKCS#1 `RSAPublicKey` DER of the public key
    pub(crate) fn public_key_pkcs1_der(&self) -> Result<Vec<u8>> {
        let public_key = match (&self.public_key_pem, &self.private_key_pem) {
            (Some(pem), _) => parse_public_key(pem)?,
            (None, Some(pem)) => parse_private_key(pem)?.to_public_key(),
            (None, None) => {
                return Err(Error::MissingKey(
                    "RSA public key is required for verification".into(),
                ))
            }
        };

        check_modulus_size(&public_key)?;
        let der = public_key
            .to_pkcs1_der()
            .map_err(|e| Error::InvalidKey(format!("failed to encode public key: {e}")))?;
        Ok(der.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyMaterial")
            .field("has_private_key", &self.private_key_pem.is_some())
            .field("public_key_pem", &self.public_key_pem)
            .finish()
    }
}

/// Reject moduli below [`MIN_RSA_KEY_BITS`]
fn check_modulus_size<K: PublicKeyParts>(key: &K) -> Result<()> {
    let bits = key.size() * 8;
    if bits < MIN_RSA_KEY_BITS {
        return Err(Error::InvalidKey(format!(
            "RSA key is {bits} bits, at least {MIN_RSA_KEY_BITS} are required"
        )));
    }
    Ok(())
}

/// Parse a private key PEM: PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`)
pub(crate) fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    let pem = pem.trim();
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| Error::InvalidKey(format!("unable to parse RSA private key PEM: {e}")))
}

/// Parse a public key PEM: SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`)
pub(crate) fn parse_public_key(pem: &str) -> Result<RsaPublicKey> {
    let pem = pem.trim();
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| Error::InvalidKey(format!("unable to parse RSA public key PEM: {e}")))
}
