//! Transport encoding for the contents API: documents travel as base64 text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

use crate::error::StoreError;

/// Encode a serialized document for a contents-API write.
pub fn encode_document(json: &str) -> String {
    B64.encode(json.as_bytes())
}

/// Decode a contents-API `content` field back to the document text.
///
/// The API line-wraps the base64 payload, so whitespace is stripped before
/// decoding. The payload is UTF-8; multi-byte text must come back bit-exact,
/// which is why this goes through raw bytes rather than any char-level
/// transform.
pub fn decode_document(raw: &str) -> Result<String, StoreError> {
    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = B64
        .decode(compact.as_bytes())
        .map_err(|e| StoreError::InvalidDocument(format!("base64 decode failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| StoreError::InvalidDocument(format!("payload is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_multibyte_text() {
        let text = r#"{"messages":[{"content":"grüße aus Kyōto — こんにちは 🚲"}]}"#;
        let encoded = encode_document(text);
        assert_eq!(decode_document(&encoded).unwrap(), text);
    }

    #[test]
    fn tolerates_line_wrapped_content() {
        // The contents API inserts newlines every 60 characters.
        let text = "{\"messages\":[]}";
        let encoded = encode_document(text);
        let wrapped: String = encoded
            .as_bytes()
            .chunks(10)
            .map(|c| format!("{}\n", std::str::from_utf8(c).unwrap()))
            .collect();
        assert_eq!(decode_document(&wrapped).unwrap(), text);
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(decode_document("not base64 !!!").is_err());
    }

    #[test]
    fn rejects_non_utf8_payload() {
        let encoded = B64.encode([0xff, 0xfe, 0x00]);
        assert!(decode_document(&encoded).is_err());
    }
}
