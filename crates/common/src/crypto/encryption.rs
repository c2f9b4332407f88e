//! Symmetric authenticated encryption built on ChaCha20-Poly1305.
//! Keys and tokens are url-safe base64 so they can be pasted into a terminal
//! or an environment variable. A token is `nonce || ciphertext || tag`.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use super::CryptoError;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Generate a fresh random key, url-safe base64 encoded.
pub fn generate_key() -> String {
    let mut key = [0u8; KEY_LEN];
    OsRng.fill_bytes(&mut key);
    URL_SAFE.encode(key)
}

/// Cipher bound to a single key.
pub struct Cipher {
    inner: ChaCha20Poly1305,
}

impl Cipher {
    /// Build a cipher from a key produced by [`generate_key`].
    pub fn new(key: &str) -> Result<Self, CryptoError> {
        let bytes = URL_SAFE
            .decode(key.trim().as_bytes())
            .map_err(|_| CryptoError::InvalidKey)?;
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKey);
        }
        let key = Key::from_slice(&bytes);
        Ok(Self { inner: ChaCha20Poly1305::new(key) })
    }

    /// Encrypt plaintext into a url-safe token. Each call uses a fresh nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, CryptoError> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .inner
            .encrypt(&nonce, plaintext)
            .map_err(|e| CryptoError::Encrypt(format!("{e}")))?;

        let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        token.extend_from_slice(&nonce);
        token.extend_from_slice(&ciphertext);
        Ok(URL_SAFE.encode(token))
    }

    /// Decrypt a token. Fails on a wrong key or any tampering.
    pub fn decrypt(&self, token: &str) -> Result<Vec<u8>, CryptoError> {
        let raw = URL_SAFE
            .decode(token.trim().as_bytes())
            .map_err(|e| CryptoError::Decode(format!("{e}")))?;
        if raw.len() < NONCE_LEN {
            return Err(CryptoError::Decrypt("token shorter than nonce".to_string()));
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        self.inner
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| CryptoError::Decrypt(format!("{e}")))
    }
}
