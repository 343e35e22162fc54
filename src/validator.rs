//! Token validation report
//!
//! [`TokenValidator`] runs every check against a [`ParsedToken`] and records
//! each outcome in a [`ValidationResult`]. A failing check never stops the
//! ones after it, and never surfaces as an [`Error`](crate::Error): the caller
//! always receives the complete report.
//!
//! Checks, in order:
//!
//! 1. **Signature Verification**: skipped when no usable key is supplied
//! 2. **Token Expiration**: only when `exp` is present
//! 3. **Not Before Time**: only when `nbf` is present
//! 4. **Issued At Time**: only when `iat` is present
//! 5. **Algorithm Consistency**: only when an expected signing method is given

use crate::algorithm::{AlgorithmId, SigningMethod};
use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::keys::SigningKey;
use crate::limits::DEFAULT_IAT_SKEW_SECONDS;
use crate::provider::{CryptoProvider, DefaultProvider};
use crate::token::ParsedToken;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

/// Configuration for the validation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// How far in the future `iat` may lie before it is flagged (default: 60)
    pub iat_skew_seconds: i64,

    /// Signing method the token is expected to use, when not given per call
    pub expected_method: Option<SigningMethod>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            iat_skew_seconds: DEFAULT_IAT_SKEW_SECONDS,
            expected_method: None,
        }
    }
}

impl ValidationConfig {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance for `iat` values in the future
    pub fn iat_skew(mut self, seconds: i64) -> Self {
        self.iat_skew_seconds = seconds;
        self
    }

    /// Expect tokens signed with the given method family
    pub fn expect_method(mut self, method: SigningMethod) -> Self {
        self.expected_method = Some(method);
        self
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    Passed,
    Failed,
    /// Reported but not evaluated; excluded from the overall verdict
    Skipped,
}

/// One entry in a [`ValidationResult`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub outcome: CheckOutcome,
    pub message: String,
}

impl Check {
    pub const SIGNATURE: &'static str = "Signature Verification";
    pub const EXPIRATION: &'static str = "Token Expiration";
    pub const NOT_BEFORE: &'static str = "Not Before Time";
    pub const ISSUED_AT: &'static str = "Issued At Time";
    pub const ALGORITHM: &'static str = "Algorithm Consistency";

    fn passed(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Passed,
            message: message.into(),
        }
    }

    fn failed(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Failed,
            message: message.into(),
        }
    }

    fn skipped(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Skipped,
            message: message.into(),
        }
    }

    /// True only when the check ran and passed
    pub fn is_passed(&self) -> bool {
        self.outcome == CheckOutcome::Passed
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome == CheckOutcome::Skipped
    }
}

impl Serialize for Check {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Check", 4)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("passed", &self.is_passed())?;
        state.serialize_field("outcome", &self.outcome)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// Complete validation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Conjunction of every check that was not skipped
    pub is_valid: bool,
    pub checks: Vec<Check>,
}

impl ValidationResult {
    fn from_checks(checks: Vec<Check>) -> Self {
        let is_valid = checks
            .iter()
            .filter(|check| !check.is_skipped())
            .all(Check::is_passed);
        Self { is_valid, checks }
    }

    /// Look up a check by name
    pub fn check(&self, name: &str) -> Option<&Check> {
        self.checks.iter().find(|check| check.name == name)
    }

    /// Checks that ran and failed
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks
            .iter()
            .filter(|check| check.outcome == CheckOutcome::Failed)
    }
}

/// Produces a [`ValidationResult`] for parsed tokens
///
/// # Example
///
/// ```ignore
/// use jwtsmith::*;
///
/// let parsed = ParsedToken::from_string(token_str)?;
/// let report = TokenValidator::new()
///     .config(ValidationConfig::new().iat_skew(30))
///     .validate(&parsed, Some(&SigningKey::hmac("secret")), Some(SigningMethod::Hmac));
///
/// for check in &report.checks {
///     println!("{}: {:?} ({})", check.name, check.outcome, check.message);
/// }
/// ```
#[derive(Clone)]
pub struct TokenValidator {
    config: ValidationConfig,
    clock: Arc<dyn Clock>,
    provider: Arc<dyn CryptoProvider>,
}

impl Default for TokenValidator {
    fn default() -> Self {
        Self {
            config: ValidationConfig::default(),
            clock: Arc::new(SystemClock),
            provider: Arc::new(DefaultProvider),
        }
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a different time source for temporal checks
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
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

    /// Validate against the configured clock
    ///
    /// `method` overrides [`ValidationConfig::expected_method`] for this call.
    pub fn validate(
        &self,
        token: &ParsedToken,
        key: Option<&SigningKey>,
        method: Option<SigningMethod>,
    ) -> ValidationResult {
        self.validate_at(token, key, method, self.clock.now())
    }

    /// Validate as of `now` (seconds since the Unix epoch)
    pub fn validate_at(
        &self,
        token: &ParsedToken,
        key: Option<&SigningKey>,
        method: Option<SigningMethod>,
        now: i64,
    ) -> ValidationResult {
        let mut checks = vec![self.check_signature(token, key)];

        if let Some(check) = temporal_check(token, "exp", Check::EXPIRATION, |exp| {
            if now as f64 > exp {
                Err(format!("Token expired at {exp} (now {now})"))
            } else {
                Ok(format!("Token expires at {exp}"))
            }
        }) {
            checks.push(check);
        }

        if let Some(check) = temporal_check(token, "nbf", Check::NOT_BEFORE, |nbf| {
            if (now as f64) < nbf {
                Err(format!("Token is not valid before {nbf} (now {now})"))
            } else {
                Ok(format!("Token valid since {nbf}"))
            }
        }) {
            checks.push(check);
        }

        let skew = self.config.iat_skew_seconds;
        if let Some(check) = temporal_check(token, "iat", Check::ISSUED_AT, |iat| {
            if iat > now.saturating_add(skew) as f64 {
                Err(format!(
                    "Token issued in the future at {iat} (now {now}, allowed skew {skew}s)"
                ))
            } else {
                Ok(format!("Token issued at {iat}"))
            }
        }) {
            checks.push(check);
        }

        if let Some(expected) = method.or(self.config.expected_method) {
            checks.push(check_algorithm(token, expected));
        }

        let result = ValidationResult::from_checks(checks);
        tracing::debug!(
            alg = token.algorithm_str().unwrap_or("<none>"),
            is_valid = result.is_valid,
            checks = result.checks.len(),
            "validated token"
        );
        result
    }

    fn check_signature(&self, token: &ParsedToken, key: Option<&SigningKey>) -> Check {
        let Some(key) = key.filter(|key| !key.is_empty()) else {
            return Check::skipped(Check::SIGNATURE, "No key provided, signature not verified");
        };

        let algorithm = match token.algorithm() {
            Ok(algorithm) => algorithm,
            Err(e) => return signature_failed(e.to_string()),
        };

        let signature = match token.signature_bytes() {
            Ok(signature) => signature,
            Err(e) => return signature_failed(format!("Signature is not valid Base64URL: {e}")),
        };

        match self.provider.verify(
            algorithm,
            key,
            token.signing_input().as_bytes(),
            &signature,
        ) {
            Ok(()) => Check::passed(Check::SIGNATURE, format!("Signature is valid ({algorithm})")),
            Err(Error::SignatureInvalid) => {
                signature_failed(format!("Signature does not match ({algorithm})"))
            }
            Err(e) => signature_failed(e.to_string()),
        }
    }
}

/// Validate with the system clock and default provider
pub fn validate(
    token: &ParsedToken,
    key: Option<&SigningKey>,
    method: Option<SigningMethod>,
) -> ValidationResult {
    TokenValidator::new().validate(token, key, method)
}

fn signature_failed(message: String) -> Check {
    tracing::warn!(reason = %message, "signature verification failed");
    Check::failed(Check::SIGNATURE, message)
}

/// Evaluate a numeric time claim, if the token carries one
///
/// A `null` claim counts as absent; any other non-number fails the check.
fn temporal_check<F>(token: &ParsedToken, claim: &str, name: &'static str, evaluate: F) -> Option<Check>
where
    F: FnOnce(f64) -> std::result::Result<String, String>,
{
    let value = match token.claim(claim) {
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };

    let Some(seconds) = value.as_f64() else {
        return Some(Check::failed(
            name,
            format!("'{claim}' claim is not a number: {value}"),
        ));
    };

    Some(match evaluate(seconds) {
        Ok(message) => Check::passed(name, message),
        Err(message) => Check::failed(name, message),
    })
}

fn check_algorithm(token: &ParsedToken, expected: SigningMethod) -> Check {
    let algorithm: AlgorithmId = match token.algorithm() {
        Ok(algorithm) => algorithm,
        Err(e) => return Check::failed(Check::ALGORITHM, e.to_string()),
    };

    if algorithm.method() == expected {
        Check::passed(
            Check::ALGORITHM,
            format!("Algorithm {algorithm} matches signing method {expected}"),
        )
    } else {
        Check::failed(
            Check::ALGORITHM,
            format!(
                "Algorithm {algorithm} belongs to {}, expected {expected}",
                algorithm.method()
            ),
        )
    }
}
