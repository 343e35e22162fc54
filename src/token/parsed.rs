use crate::algorithm::AlgorithmId;
use crate::error::{Error, FormatError, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;

use serde_json::{Map, Value};
use std::str::FromStr;

/// A structurally decoded token
///
/// Parsing splits the token, decodes header and payload, and keeps the raw
/// segments so the signing input can be rebuilt byte for byte. Nothing here
/// is verified: treat the contents as untrusted until a
/// [`TokenValidator`](crate::TokenValidator) has reported on them.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedToken {
    header: Map<String, Value>,
    payload: Map<String, Value>,
    header_b64: String,
    payload_b64: String,
    signature_b64: String,
}

impl ParsedToken {
    /// Parse a compact `header.payload.signature` token
    ///
    /// Surrounding whitespace is ignored.
    pub fn from_string(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(FormatError::Empty.into());
        }

        if token.len() > MAX_TOKEN_LENGTH {
            return Err(FormatError::TooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            }
            .into());
        }

        let parts: Vec<&str> = token.split('.').collect();
        let [header_b64, payload_b64, signature_b64] = parts[..] else {
            return Err(FormatError::SegmentCount { found: parts.len() }.into());
        };

        for (segment, value) in [
            ("header", header_b64),
            ("payload", payload_b64),
            ("signature", signature_b64),
        ] {
            if value.is_empty() {
                return Err(FormatError::EmptySegment { segment }.into());
            }
        }

        let header = decode_object(header_b64, "header", MAX_DECODED_HEADER_SIZE)?;
        let payload = decode_object(payload_b64, "payload", MAX_DECODED_PAYLOAD_SIZE)?;

        let alg = header.get("alg").and_then(Value::as_str).unwrap_or("<none>");
        tracing::trace!(
            alg,
            claims = payload.len(),
            "parsed token"
        );

        Ok(Self {
            header,
            payload,
            header_b64: header_b64.to_string(),
            payload_b64: payload_b64.to_string(),
            signature_b64: signature_b64.to_string(),
        })
    }

    /// Decoded header members, in token order
    pub fn header(&self) -> &Map<String, Value> {
        &self.header
    }

    /// Decoded payload claims, in token order
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// A single payload claim
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// Raw `alg` header member, if it is a string
    pub fn algorithm_str(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Algorithm named in the header
    pub fn algorithm(&self) -> Result<AlgorithmId> {
        self.algorithm_str()
            .ok_or_else(|| Error::InvalidJson("header has no string 'alg' member".into()))?
            .parse()
    }

    /// Raw Base64URL signature segment
    pub fn signature(&self) -> &str {
        &self.signature_b64
    }

    /// Decoded signature bytes
    pub fn signature_bytes(&self) -> Result<Vec<u8>> {
        base64url::decode_bytes_bounded(&self.signature_b64, MAX_DECODED_SIGNATURE_SIZE)
    }

    /// The bytes that were signed: `header_b64 "." payload_b64`
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    /// Header as compact JSON text
    pub fn header_json(&self) -> String {
        Value::Object(self.header.clone()).to_string()
    }

    /// Payload as compact JSON text
    pub fn payload_json(&self) -> String {
        Value::Object(self.payload.clone()).to_string()
    }
}

impl FromStr for ParsedToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

/// Parse with default settings
pub fn parse(token: &str) -> Result<ParsedToken> {
    ParsedToken::from_string(token)
}

fn decode_object(
    encoded: &str,
    segment: &'static str,
    max_size: usize,
) -> Result<Map<String, Value>> {
    let bytes = base64url::decode_bytes_bounded(encoded, max_size).map_err(|e| {
        FormatError::Base64 {
            segment,
            reason: e.to_string(),
        }
    })?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| FormatError::Json {
        segment,
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(FormatError::NotAnObject { segment }.into()),
    }
}
