//! Edge case tests for token parsing and validation

use jwtsmith::*;
use serde_json::json;

fn create_valid_token() -> String {
    sign(
        &json!({"typ": "JWT"}),
        &json!({"iss": "test", "sub": "user", "exp": 9999999999u64}),
        AlgorithmId::HS256,
        &SigningKey::hmac("secret"),
    )
    .unwrap()
}

fn malformed(token: &str) -> FormatError {
    match ParsedToken::from_string(token) {
        Err(Error::MalformedToken(reason)) => reason,
        other => panic!("expected malformed token, got {other:?}"),
    }
}

// ============================================================================
// Token Format Edge Cases
// ============================================================================

#[test]
fn test_empty_token() {
    assert_eq!(malformed(""), FormatError::Empty);
    assert_eq!(malformed("   \n\t"), FormatError::Empty);
}

#[test]
fn test_two_segments() {
    assert_eq!(malformed("a.b"), FormatError::SegmentCount { found: 2 });
}

#[test]
fn test_single_segment() {
    assert_eq!(malformed("abc"), FormatError::SegmentCount { found: 1 });
}

#[test]
fn test_only_dots() {
    assert_eq!(
        malformed(".."),
        FormatError::EmptySegment { segment: "header" }
    );
}

#[test]
fn test_missing_signature() {
    let token = create_valid_token();
    let (signing_input, _) = token.rsplit_once('.').unwrap();
    assert_eq!(
        malformed(&format!("{signing_input}.")),
        FormatError::EmptySegment {
            segment: "signature"
        }
    );
}

#[test]
fn test_invalid_base64_header() {
    assert!(matches!(
        malformed("a.b.c"),
        FormatError::Base64 {
            segment: "header",
            ..
        }
    ));
}

#[test]
fn test_padded_base64_rejected() {
    let token = create_valid_token();
    let mut parts = token.split('.');
    let header = parts.next().unwrap();
    let rest: Vec<&str> = parts.collect();

    // `=` is outside the Base64URL alphabet used by compact tokens
    let padded = format!("{header}==.{}.{}", rest[0], rest[1]);
    assert!(matches!(
        malformed(&padded),
        FormatError::Base64 {
            segment: "header",
            ..
        }
    ));
}

#[test]
fn test_standard_base64_alphabet_rejected() {
    let token = create_valid_token();
    let bad = token.replacen('e', "+", 1);
    assert!(matches!(malformed(&bad), FormatError::Base64 { .. }));
}

#[test]
fn test_header_is_json_array() {
    let token = format!(
        "{}.{}.sig",
        utils::encode("[\"alg\"]"),
        utils::encode("{}")
    );
    assert_eq!(
        malformed(&token),
        FormatError::NotAnObject { segment: "header" }
    );
}

#[test]
fn test_payload_is_not_json() {
    let token = format!(
        "{}.{}.sig",
        utils::encode(r#"{"alg":"HS256"}"#),
        utils::encode("hello")
    );
    assert!(matches!(
        malformed(&token),
        FormatError::Json {
            segment: "payload",
            ..
        }
    ));
}

#[test]
fn test_payload_not_utf8() {
    let token = format!(
        "{}.{}.sig",
        utils::encode(r#"{"alg":"HS256"}"#),
        utils::encode_bytes(&[0xff, 0xfe, 0xfd])
    );
    assert!(matches!(malformed(&token), FormatError::Json { .. }));
}

#[test]
fn test_oversized_header() {
    let header = format!(r#"{{"alg":"HS256","pad":"{}"}}"#, "x".repeat(9 * 1024));
    let token = format!("{}.{}.sig", utils::encode(&header), utils::encode("{}"));
    assert!(matches!(
        malformed(&token),
        FormatError::Base64 {
            segment: "header",
            ..
        }
    ));
}

#[test]
fn test_token_with_whitespace_is_trimmed() {
    let token = create_valid_token();
    let parsed = ParsedToken::from_string(&format!("\n  {token}  \n")).unwrap();
    assert_eq!(parsed.claim("sub").unwrap(), "user");
}

// ============================================================================
// Validation Edge Cases
// ============================================================================

#[test]
fn test_undecodable_signature_is_a_failed_check() {
    let token = create_valid_token();
    let (signing_input, _) = token.rsplit_once('.').unwrap();
    let parsed = ParsedToken::from_string(&format!("{signing_input}.x")).unwrap();

    let report = validate(&parsed, Some(&SigningKey::hmac("secret")), None);
    let check = report.check(Check::SIGNATURE).unwrap();
    assert_eq!(check.outcome, CheckOutcome::Failed);
    assert!(check.message.contains("Base64URL"));
    // Later checks still run
    assert!(report.check(Check::EXPIRATION).unwrap().is_passed());
}

#[test]
fn test_tampered_payload() {
    let token = create_valid_token();
    let parts: Vec<&str> = token.split('.').collect();
    let forged = utils::encode(r#"{"iss":"test","sub":"admin","exp":9999999999}"#);
    let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

    let parsed = ParsedToken::from_string(&tampered).unwrap();
    let report = validate(&parsed, Some(&SigningKey::hmac("secret")), None);

    assert!(!report.is_valid);
    assert!(!report.check(Check::SIGNATURE).unwrap().is_passed());
    assert!(report.check(Check::EXPIRATION).unwrap().is_passed());
}

#[test]
fn test_float_timestamps() {
    let token = sign(
        &json!({}),
        &json!({"exp": 1_700_000_000.5, "nbf": 1_699_999_999.5}),
        AlgorithmId::HS256,
        &SigningKey::hmac("secret"),
    )
    .unwrap();
    let parsed = ParsedToken::from_string(&token).unwrap();

    let report = TokenValidator::new()
        .clock(FixedClock(1_700_000_000))
        .validate(&parsed, None, None);
    assert!(report.is_valid);

    let report = TokenValidator::new()
        .clock(FixedClock(1_700_000_001))
        .validate(&parsed, None, None);
    assert!(!report.check(Check::EXPIRATION).unwrap().is_passed());
}

#[test]
fn test_none_algorithm_variants_fail_signature() {
    for alg in ["none", "None", "NONE", "nOnE"] {
        let token = format!(
            "{}.{}.c2ln",
            utils::encode(&format!(r#"{{"alg":"{alg}"}}"#)),
            utils::encode("{}")
        );
        let parsed = ParsedToken::from_string(&token).unwrap();
        let report = validate(&parsed, Some(&SigningKey::hmac("secret")), None);
        assert!(!report.is_valid, "alg {alg} must not validate");
    }
}

#[test]
fn test_unicode_claims_round_trip() {
    let payload = json!({"name": "Jöhn Dœ ✓", "emoji": "🔐"});
    let token = sign(&json!({}), &payload, AlgorithmId::HS256, &SigningKey::hmac("s")).unwrap();
    let parsed = ParsedToken::from_string(&token).unwrap();
    assert_eq!(parsed.claim("name").unwrap(), "Jöhn Dœ ✓");
    assert_eq!(parsed.claim("emoji").unwrap(), "🔐");
}
