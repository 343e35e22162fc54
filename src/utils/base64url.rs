//! Base64URL encoding/decoding per RFC 4648
//!
//! URL-safe alphabet, no padding. Decoding rejects `=` and any character
//! outside `[A-Za-z0-9_-]`.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes to Base64URL string
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Encode string to Base64URL (as UTF-8 bytes)
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Decode Base64URL string to bytes
pub fn decode_bytes(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| Error::Decode(e.to_string()))
}

/// Decode Base64URL string to UTF-8 string
pub fn decode(input: &str) -> Result<String> {
    let bytes = decode_bytes(input)?;
    String::from_utf8(bytes).map_err(|e| Error::Decode(format!("Invalid UTF-8: {e}")))
}

/// Decode Base64URL string to bytes with maximum size limit
pub(crate) fn decode_bytes_bounded(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Every 4 characters decode to at most 3 bytes
    if input.len() / 4 * 3 > max_size {
        return Err(Error::Decode(format!(
            "Decoded size exceeds limit (max: {max_size} bytes)"
        )));
    }

    let result = decode_bytes(input)?;
    if result.len() > max_size {
        return Err(Error::Decode(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            result.len(),
            max_size
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_bytes() {
        assert_eq!(encode_bytes(b""), "");
        assert_eq!(encode_bytes(b"f"), "Zg");
        assert_eq!(encode_bytes(b"fo"), "Zm8");
        assert_eq!(encode_bytes(b"foo"), "Zm9v");
        assert_eq!(encode_bytes(b"foob"), "Zm9vYg");
        assert_eq!(encode_bytes(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_url_safe_characters() {
        let encoded = encode_bytes(&[0xfb, 0xff, 0xbf]);
        assert_eq!(encoded, "-_-_");
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_utf8_text_is_encoded_as_bytes() {
        let text = "héllo wörld ✓";
        let encoded = encode(text);
        assert_eq!(decode(&encoded).unwrap(), text);
        assert_eq!(decode_bytes(&encoded).unwrap(), text.as_bytes());
    }

    #[test]
    fn test_decode_invalid() {
        assert!(matches!(decode_bytes("!!!"), Err(Error::Decode(_))));
        assert!(matches!(decode_bytes("A"), Err(Error::Decode(_))));
        assert!(matches!(decode_bytes("ab+/"), Err(Error::Decode(_))));
        // Padding is not part of the wire form
        assert!(matches!(decode_bytes("SGVsbG8="), Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let encoded = encode_bytes(&[0xff, 0xfe]);
        assert!(decode_bytes(&encoded).is_ok());
        assert!(matches!(decode(&encoded), Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_with_limit() {
        assert_eq!(decode_bytes_bounded("SGVsbG8", 10).unwrap(), b"Hello");
        assert!(decode_bytes_bounded("SGVsbG8", 3).is_err());
        assert_eq!(decode_bytes_bounded("", 0).unwrap(), Vec::<u8>::new());
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let encoded = encode_bytes(&bytes);
            prop_assert!(!encoded.contains('='));
            prop_assert_eq!(decode_bytes(&encoded).unwrap(), bytes);
        }
    }
}
