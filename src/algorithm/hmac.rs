use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::SigningKey;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
pub struct HS512;

macro_rules! impl_hmac {
    ($alg:ident, $digest:ty) => {
        impl Algorithm for $alg {
            fn name(&self) -> &'static str {
                stringify!($alg)
            }

            fn sign(&self, signing_input: &[u8], key: &SigningKey) -> Result<Vec<u8>> {
                let secret = hmac_secret(key, self.name())?;
                let mut mac = Hmac::<$digest>::new_from_slice(secret)
                    .map_err(|e| Error::InvalidKey(e.to_string()))?;
                mac.update(signing_input);
                Ok(mac.finalize().into_bytes().to_vec())
            }

            fn verify(
                &self,
                signing_input: &[u8],
                signature: &[u8],
                key: &SigningKey,
            ) -> Result<()> {
                let expected = self.sign(signing_input, key)?;
                verify_mac(signature, &expected)
            }
        }
    };
}

impl_hmac!(HS256, Sha256);
impl_hmac!(HS384, Sha384);
impl_hmac!(HS512, Sha512);

/// Extract a non-empty HMAC secret from the key
fn hmac_secret<'k>(key: &'k SigningKey, algorithm: &str) -> Result<&'k [u8]> {
    let secret = key.as_hmac(algorithm)?.as_bytes();
    if secret.is_empty() {
        return Err(Error::MissingKey(format!(
            "HMAC secret is required for {algorithm}"
        )));
    }
    Ok(secret)
}

/// Compare a provided MAC against the recomputed one in constant time
fn verify_mac(provided: &[u8], expected: &[u8]) -> Result<()> {
    if provided.len() != expected.len() {
        return Err(Error::SignatureInvalid);
    }

    if constant_time_eq(provided, expected) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}
