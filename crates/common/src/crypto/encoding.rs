use base64::{engine::general_purpose::STANDARD, Engine};

use super::CryptoError;

/// Encode arbitrary bytes as padded standard base64.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode padded standard base64 back into bytes.
pub fn decode(encoded: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(encoded.trim().as_bytes())
        .map_err(|e| CryptoError::Decode(format!("{e}")))
}
