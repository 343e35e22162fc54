use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};
use crate::keys::SigningKey;
use crate::provider::{CryptoProvider, DefaultProvider};
use crate::utils::base64url;

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Builds signed compact tokens
///
/// The header's `alg` member is always overwritten with the selected
/// algorithm; every other header and payload member is kept in order.
///
/// # Example
///
/// ```ignore
/// use jwtsmith::*;
/// use serde_json::json;
///
/// let token = TokenComposer::new().sign(
///     &json!({"typ": "JWT"}),
///     &json!({"sub": "1234567890"}),
///     AlgorithmId::HS256,
///     &SigningKey::hmac("your-256-bit-secret"),
/// )?;
/// ```
#[derive(Clone)]
pub struct TokenComposer {
    provider: Arc<dyn CryptoProvider>,
}

impl Default for TokenComposer {
    fn default() -> Self {
        Self {
            provider: Arc::new(DefaultProvider),
        }
    }
}

impl std::fmt::Debug for TokenComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenComposer").finish_non_exhaustive()
    }
}

impl TokenComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different cryptographic provider
    pub fn provider<P: CryptoProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    /// Share a provider with other composers or validators
    pub fn shared_provider(mut self, provider: Arc<dyn CryptoProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Sign a header and payload that serialize to JSON objects
    pub fn sign<H, P>(
        &self,
        header: &H,
        payload: &P,
        algorithm: AlgorithmId,
        key: &SigningKey,
    ) -> Result<String>
    where
        H: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        let header = to_object(header, "header")?;
        let payload = to_object(payload, "payload")?;
        self.compose(header, payload, algorithm, key)
    }

    /// Sign a header and payload given as JSON text
    pub fn sign_json(
        &self,
        header_json: &str,
        payload_json: &str,
        algorithm: AlgorithmId,
        key: &SigningKey,
    ) -> Result<String> {
        let header = parse_object(header_json, "header")?;
        let payload = parse_object(payload_json, "payload")?;
        self.compose(header, payload, algorithm, key)
    }

    fn compose(
        &self,
        mut header: Map<String, Value>,
        payload: Map<String, Value>,
        algorithm: AlgorithmId,
        key: &SigningKey,
    ) -> Result<String> {
        check_key(algorithm, key)?;

        header.insert("alg".to_string(), Value::String(algorithm.to_string()));

        let header_json = serde_json::to_string(&header)
            .map_err(|e| Error::InvalidJson(format!("header: {e}")))?;
        let payload_json = serde_json::to_string(&payload)
            .map_err(|e| Error::InvalidJson(format!("payload: {e}")))?;

        let signing_input = format!(
            "{}.{}",
            base64url::encode(&header_json),
            base64url::encode(&payload_json)
        );

        let signature = self
            .provider
            .sign(algorithm, key, signing_input.as_bytes())
            .map_err(|e| match e {
                Error::MissingKey(_) | Error::KeyTypeMismatch { .. } | Error::Signing(_) => e,
                other => Error::Signing(other.to_string()),
            })?;

        tracing::debug!(
            alg = %algorithm,
            claims = payload.len(),
            "composed token"
        );

        Ok(format!(
            "{signing_input}.{}",
            base64url::encode_bytes(&signature)
        ))
    }
}

/// Sign with the default provider
pub fn sign<H, P>(header: &H, payload: &P, algorithm: AlgorithmId, key: &SigningKey) -> Result<String>
where
    H: Serialize + ?Sized,
    P: Serialize + ?Sized,
{
    TokenComposer::new().sign(header, payload, algorithm, key)
}

/// Reject keys that cannot sign with `algorithm` before touching the provider
fn check_key(algorithm: AlgorithmId, key: &SigningKey) -> Result<()> {
    if key.method() != algorithm.method() {
        return Err(Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected_key_type: algorithm.method().as_str().to_uppercase(),
            actual_key_type: key.key_type().to_string(),
        });
    }

    match key {
        SigningKey::Hmac(secret) if secret.as_bytes().is_empty() => Err(Error::MissingKey(
            format!("HMAC secret is required for {algorithm}"),
        )),
        SigningKey::Rsa(material) if material.private_key_pem.is_none() => Err(Error::MissingKey(
            format!("RSA private key is required for {algorithm}"),
        )),
        _ => Ok(()),
    }
}

fn to_object<T: Serialize + ?Sized>(value: &T, segment: &str) -> Result<Map<String, Value>> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::InvalidJson(format!("{segment} must be a JSON object"))),
        Err(e) => Err(Error::InvalidJson(format!("{segment}: {e}"))),
    }
}

fn parse_object(text: &str, segment: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(Error::InvalidJson(format!("{segment} must be a JSON object"))),
        Err(e) => Err(Error::InvalidJson(format!("{segment}: {e}"))),
    }
}
