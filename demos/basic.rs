//! Run with
//!
//! ```not_rust
//! RUST_LOG=jwtsmith=debug cargo run --example basic
//! ```

use jwtsmith::{
    generate_rsa_key_pair, sign, AlgorithmId, FileKeyStore, KeyStore, ParsedToken, SigningKey,
    SigningMethod, StoredKey, TokenValidator,
};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jwtsmith=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // HMAC: the jwt.io example
    let secret = SigningKey::hmac("your-256-bit-secret");
    let token = sign(
        &json!({"typ": "JWT"}),
        &json!({"sub": "1234567890", "name": "John Doe", "iat": 1516239022}),
        AlgorithmId::HS256,
        &secret,
    )?;
    println!("HS256 token:\n  {token}\n");

    let parsed = ParsedToken::from_string(&token)?;
    println!("header:  {}", parsed.header_json());
    println!("payload: {}\n", parsed.payload_json());

    let validator = TokenValidator::new();
    let report = validator.validate(&parsed, Some(&secret), Some(SigningMethod::Hmac));
    println!("{}\n", serde_json::to_string_pretty(&report)?);

    // Same token checked against the wrong family: every check is still reported
    let report = validator.validate(&parsed, Some(&SigningKey::hmac("wrong")), Some(SigningMethod::Rsa));
    for check in &report.checks {
        println!("{:<24} {:?}: {}", check.name, check.outcome, check.message);
    }
    println!("valid: {}\n", report.is_valid);

    // RSA-PSS with a freshly generated key, kept in a directory store
    let pair = generate_rsa_key_pair(2048)?;
    let store_dir = std::env::temp_dir().join("jwtsmith-demo-keys");
    let store = FileKeyStore::open(&store_dir)?;
    store.set("demo signing key", StoredKey::from_key_pair("demo signing key", &pair, 0))?;
    println!("stored keys in {}: {:?}", store_dir.display(), store.list()?);

    let stored = store
        .get("demo signing key")?
        .ok_or("stored key disappeared")?;
    let token = sign(
        &json!({"typ": "JWT", "kid": pair.kid}),
        &json!({"sub": "demo", "exp": 9999999999u64}),
        AlgorithmId::PS256,
        &stored.signing_key(),
    )?;

    let report = validator.validate(
        &ParsedToken::from_string(&token)?,
        Some(&pair.verification_key()),
        Some(SigningMethod::Rsa),
    );
    println!("PS256 valid: {}", report.is_valid);
    println!("JWKS: {}", serde_json::to_string_pretty(&pair.public_jwks()?)?);

    store.remove("demo signing key")?;
    Ok(())
}
