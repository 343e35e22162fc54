//! # jwtsmith - JWT Composer, Decoder and Validator
//!
//! **jwtsmith** builds signed JSON Web Tokens from arbitrary header and payload
//! objects, decodes any compact token back into its parts, and produces a
//! complete validation report instead of failing on the first problem.
//!
//! ## Overview
//!
//! A token is three Base64URL segments joined by dots: header, payload and
//! signature. Composing one overwrites the header's `alg`, signs
//! `header.payload` and appends the signature. Decoding reverses the encoding
//! without trusting anything. Validation then runs every check it can and
//! records each outcome, so a tool can show *why* a token is bad rather than
//! only *that* it is.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtsmith::*;
//! use serde_json::json;
//!
//! let key = SigningKey::hmac("your-256-bit-secret");
//! let token = sign(
//!     &json!({"typ": "JWT"}),
//!     &json!({"sub": "1234567890", "iat": 1516239022, "exp": 9999999999u64}),
//!     AlgorithmId::HS256,
//!     &key,
//! )?;
//!
//! let parsed = ParsedToken::from_string(&token)?;
//! let report = TokenValidator::new().validate(&parsed, Some(&key), Some(SigningMethod::Hmac));
//! assert!(report.is_valid);
//! ```
//!
//! ## Validation Report
//!
//! ```text
//! Signature Verification   skipped when no key is supplied
//! Token Expiration         when `exp` is present: fails if now > exp
//! Not Before Time          when `nbf` is present: fails if now < nbf
//! Issued At Time           when `iat` is present: fails if iat > now + skew
//! Algorithm Consistency    when a signing method is expected
//! ```
//!
//! `is_valid` is the conjunction of every check that was not skipped. Check
//! failures never surface as [`Error`]s; only malformed input, missing keys
//! and signing failures do.
//!
//! ## Algorithm Support
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSASSA-PKCS1-v1_5**: RS256, RS384, RS512
//! - **RSASSA-PSS**: PS256, PS384, PS512 (salt length equals digest length)
//!
//! RSA keys are PEM text: PKCS#8 or PKCS#1 private keys, SPKI or PKCS#1
//! public keys. Moduli must be at least 2048 bits (RFC 7518 section 3.3):
//! a 1024-bit key fails signing with an error and fails the signature check
//! with an `Invalid key` message. See [`keys::generate`] for producing fresh key material and
//! [`keys::store`] for keeping it under a name.
//!
//! ## Seams
//!
//! Cryptography goes through a [`CryptoProvider`] and time through a
//! [`Clock`]. Both can be replaced on [`TokenComposer`] and
//! [`TokenValidator`], which is how the tests pin the clock and observe
//! provider calls.
//!
//! ## Security
//!
//! - The `"none"` algorithm is always rejected ([RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725)).
//! - HMAC signatures are compared in constant time via
//!   [`constant_time_eq`](https://crates.io/crates/constant_time_eq).
//! - Key material is never logged, and `Debug` output redacts it.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515): JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519): JSON Web Token (JWT)
//! - [RFC 7517](https://datatracker.ietf.org/doc/html/rfc7517): JSON Web Key (JWK)

// Core modules
pub mod error;
pub(crate) mod limits;
pub mod utils;

// Algorithms and keys
pub mod algorithm;
pub mod keys;

// Injected capabilities
pub mod clock;
pub mod provider;

// Token composition and parsing
pub mod token;

// Validation report
pub mod validator;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use token::{parse, sign, ParsedToken, TokenComposer};
pub use validator::{
    validate, Check, CheckOutcome, TokenValidator, ValidationConfig, ValidationResult,
};

pub use algorithm::{AlgorithmId, SigningMethod};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, FormatError, Result};
pub use keys::generate::{generate_hmac_secret, generate_rsa_key_pair, GeneratedKeyPair, GeneratedSecret};
pub use keys::store::{FileKeyStore, KeyStore, MemoryKeyStore, StoredKey, StoredMaterial};
pub use keys::{HmacSecret, RsaKeyMaterial, SigningKey};
pub use provider::{CryptoProvider, DefaultProvider};
