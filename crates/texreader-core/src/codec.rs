//! Base64 transport encoding for document text.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::CodecError;

/// Standard alphabet; tolerates missing padding the way `atob` does.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode UTF-8 text as padded standard base64.
pub fn encode_base64(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
}

/// Decode base64 into UTF-8 text. ASCII whitespace is ignored.
pub fn decode_base64(encoded: &str) -> Result<String, CodecError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Decode, logging and returning an empty string on failure.
pub fn decode_base64_or_empty(encoded: &str) -> String {
    decode_base64(encoded).unwrap_or_else(|e| {
        tracing::warn!("base64 decode failed: {e}");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_utf8() {
        assert_eq!(encode_base64("E=mc^2"), "RT1tY14y");
        assert_eq!(encode_base64("数学"), "5pWw5a2m");
        assert_eq!(encode_base64(""), "");
    }

    #[test]
    fn test_decode_padding_optional() {
        assert_eq!(decode_base64("SGk=").unwrap(), "Hi");
        assert_eq!(decode_base64("SGk").unwrap(), "Hi");
    }

    #[test]
    fn test_decode_ignores_whitespace() {
        assert_eq!(decode_base64(" 5pWw\n5a2m ").unwrap(), "数学");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_base64("@@@@"), Err(CodecError::Base64(_))));
        // 0xFF 0xFE is not UTF-8.
        assert!(matches!(decode_base64("//4="), Err(CodecError::Utf8(_))));
        assert_eq!(decode_base64_or_empty("@@@@"), "");
    }

    #[test]
    fn test_latex_source_survives() {
        let src = r"\int_0^\infty e^{-x^2}dx = \frac{\sqrt{\pi}}{2}";
        assert_eq!(decode_base64(&encode_base64(src)).unwrap(), src);
    }
}
