//! Standalone text/crypto helpers: reversible base64 encoding, symmetric
//! authenticated encryption and SHA-256 digests. None of these share state
//! with the student directory.

use thiserror::Error;

pub mod digest;
pub mod encoding;
pub mod encryption;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("base64 decoding failed: {0}")]
    Decode(String),
    #[error("invalid key; expected 32 bytes of url-safe base64")]
    InvalidKey,
    #[error("encryption failed: {0}")]
    Encrypt(String),
    #[error("decryption failed: {0}")]
    Decrypt(String),
}
