use sha2::{Digest, Sha256};

/// Hex encoded SHA-256 digest of the input, 64 lowercase characters.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Unsalted SHA-256 of a password. Deterministic, so it can be compared for equality.
pub fn hash_password(password: &str) -> String {
    sha256_hex(password.as_bytes())
}

/// Check a candidate password against a stored hex digest.
pub fn verify_password(candidate: &str, stored_hex: &str) -> bool {
    hash_password(candidate).eq_ignore_ascii_case(stored_hex.trim())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, sha256_hex, verify_password};

    #[test]
    fn hashes_to_known_hex() {
        assert_eq!(sha256_hex(b""), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
        assert_eq!(sha256_hex(b"abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn digest_is_deterministic_and_distinct() {
        let a = hash_password("my_secret_password");
        assert_eq!(a, hash_password("my_secret_password"));
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_password("my_secret_aspassword"));
    }

    #[test]
    fn verifies_passwords() {
        let stored = hash_password("my_secret_password");
        assert!(verify_password("my_secret_password", &stored));
        assert!(verify_password("my_secret_password", &stored.to_uppercase()));
        assert!(!verify_password("my_secret_aspassword", &stored));
    }
}
