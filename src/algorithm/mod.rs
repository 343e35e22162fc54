mod traits;

pub mod hmac;
pub mod rsa;

pub use traits::{get_algorithm, Algorithm, SignatureAlgorithm};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Algorithm identifier carried in the `alg` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,

    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,

    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,

    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,

    /// RSASSA-PSS with SHA-256, salt length 32
    PS256,

    /// RSASSA-PSS with SHA-384, salt length 48
    PS384,

    /// RSASSA-PSS with SHA-512, salt length 64
    PS512,
}

impl AlgorithmId {
    /// All supported algorithms, HMAC first
    pub const ALL: [AlgorithmId; 9] = [
        AlgorithmId::HS256,
        AlgorithmId::HS384,
        AlgorithmId::HS512,
        AlgorithmId::RS256,
        AlgorithmId::RS384,
        AlgorithmId::RS512,
        AlgorithmId::PS256,
        AlgorithmId::PS384,
        AlgorithmId::PS512,
    ];

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",
            AlgorithmId::PS256 => "PS256",
            AlgorithmId::PS384 => "PS384",
            AlgorithmId::PS512 => "PS512",
        }
    }

    /// Signing method family the algorithm belongs to
    pub const fn method(&self) -> SigningMethod {
        match self {
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512 => SigningMethod::Hmac,
            _ => SigningMethod::Rsa,
        }
    }

    /// Output length in bytes of the digest selected by the algorithm suffix
    ///
    /// For PS* algorithms this is also the PSS salt length.
    pub const fn digest_len(&self) -> usize {
        match self {
            AlgorithmId::HS256 | AlgorithmId::RS256 | AlgorithmId::PS256 => 32,
            AlgorithmId::HS384 | AlgorithmId::RS384 | AlgorithmId::PS384 => 48,
            AlgorithmId::HS512 | AlgorithmId::RS512 | AlgorithmId::PS512 => 64,
        }
    }

    /// Check if algorithm uses RSA-PSS padding
    pub const fn is_pss(&self) -> bool {
        matches!(
            self,
            AlgorithmId::PS256 | AlgorithmId::PS384 | AlgorithmId::PS512
        )
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Err(Error::AlgorithmNoneRejected),

            "HS256" => Ok(AlgorithmId::HS256),
            "HS384" => Ok(AlgorithmId::HS384),
            "HS512" => Ok(AlgorithmId::HS512),

            "RS256" => Ok(AlgorithmId::RS256),
            "RS384" => Ok(AlgorithmId::RS384),
            "RS512" => Ok(AlgorithmId::RS512),

            "PS256" => Ok(AlgorithmId::PS256),
            "PS384" => Ok(AlgorithmId::PS384),
            "PS512" => Ok(AlgorithmId::PS512),

            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Signing method family: shared secret or RSA key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningMethod {
    /// HMAC with a shared secret (`HS*`)
    Hmac,

    /// RSA signatures, PKCS#1 v1.5 (`RS*`) or PSS (`PS*`)
    Rsa,
}

impl SigningMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SigningMethod::Hmac => "hmac",
            SigningMethod::Rsa => "rsa",
        }
    }

    /// Algorithm a composer picks when only the method is known
    pub const fn default_algorithm(&self) -> AlgorithmId {
        match self {
            SigningMethod::Hmac => AlgorithmId::HS256,
            SigningMethod::Rsa => AlgorithmId::RS256,
        }
    }
}

impl FromStr for SigningMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hmac" => Ok(SigningMethod::Hmac),
            "rsa" => Ok(SigningMethod::Rsa),
            _ => Err(Error::AlgorithmUnsupported(format!("signing method '{s}'"))),
        }
    }
}

impl std::fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
