use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::keys::SigningKey;

use ring::rand::SystemRandom;
use ring::signature::{self, RsaEncoding, RsaKeyPair, UnparsedPublicKey, VerificationAlgorithm};

/// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
pub struct RS256;

/// RS384 algorithm (RSASSA-PKCS1-v1_5 with SHA-384)
pub struct RS384;

/// RS512 algorithm (RSASSA-PKCS1-v1_5 with SHA-512)
pub struct RS512;

/// PS256 algorithm (RSASSA-PSS with SHA-256)
pub struct PS256;

/// PS384 algorithm (RSASSA-PSS with SHA-384)
pub struct PS384;

/// PS512 algorithm (RSASSA-PSS with SHA-512)
pub struct PS512;

// ring's PSS encodings use a salt as long as the digest output.
// Moduli below 2048 bits are refused with `Error::InvalidKey` before ring runs.
macro_rules! impl_rsa {
    ($alg:ident, $encoding:ident, $verification:ident) => {
        impl Algorithm for $alg {
            fn name(&self) -> &'static str {
                stringify!($alg)
            }

            fn sign(&self, signing_input: &[u8], key: &SigningKey) -> Result<Vec<u8>> {
                sign_rsa(self.name(), signing_input, key, &signature::$encoding)
            }

            fn verify(
                &self,
                signing_input: &[u8],
                signature: &[u8],
                key: &SigningKey,
            ) -> Result<()> {
                verify_rsa(
                    self.name(),
                    signing_input,
                    signature,
                    key,
                    &signature::$verification,
                )
            }
        }
    };
}

impl_rsa!(RS256, RSA_PKCS1_SHA256, RSA_PKCS1_2048_8192_SHA256);
impl_rsa!(RS384, RSA_PKCS1_SHA384, RSA_PKCS1_2048_8192_SHA384);
impl_rsa!(RS512, RSA_PKCS1_SHA512, RSA_PKCS1_2048_8192_SHA512);
impl_rsa!(PS256, RSA_PSS_SHA256, RSA_PSS_2048_8192_SHA256);
impl_rsa!(PS384, RSA_PSS_SHA384, RSA_PSS_2048_8192_SHA384);
impl_rsa!(PS512, RSA_PSS_SHA512, RSA_PSS_2048_8192_SHA512);

/// Generic RSA signing with a PKCS#8 private key
fn sign_rsa(
    algorithm: &str,
    signing_input: &[u8],
    key: &SigningKey,
    encoding: &'static dyn RsaEncoding,
) -> Result<Vec<u8>> {
    let pkcs8_der = key.as_rsa(algorithm)?.private_key_pkcs8_der()?;

    let key_pair = RsaKeyPair::from_pkcs8(&pkcs8_der)
        .map_err(|e| Error::Signing(format!("{algorithm}: private key rejected: {e}")))?;

    let rng = SystemRandom::new();
    let mut signature = vec![0u8; key_pair.public().modulus_len()];
    key_pair
        .sign(encoding, &rng, signing_input, &mut signature)
        .map_err(|_| Error::Signing(format!("{algorithm}: signing operation failed")))?;

    Ok(signature)
}

/// Generic RSA signature verification
fn verify_rsa(
    algorithm: &str,
    signing_input: &[u8],
    signature: &[u8],
    key: &SigningKey,
    verification: &'static dyn VerificationAlgorithm,
) -> Result<()> {
    let public_key_der = key.as_rsa(algorithm)?.public_key_pkcs1_der()?;

    let public_key = UnparsedPublicKey::new(verification, public_key_der);
    public_key
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}
