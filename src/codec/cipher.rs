// src/codec/cipher.rs
// =============================================================================
// AES-256-GCM over raw bytes.
//
// Layout of one sealed message:
//   [ 12-byte random nonce | ciphertext | 16-byte tag ]
//
// The key is SHA-256 of the configured secret, so any secret string (of any
// length) yields a valid 256-bit key.
// =============================================================================

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use anyhow::{anyhow, bail, Result};
use sha2::{Digest, Sha256};

pub const NONCE_SIZE: usize = 12;

// Holds the expanded AES key; immutable once built
pub struct TokenCipher {
    aead: Aes256Gcm,
}

impl TokenCipher {
    // Derives the key from the secret
    //
    // Same secret in -> same key out, so tokens survive a restart
    pub fn new(secret: &[u8]) -> Self {
        let digest = Sha256::digest(secret);
        let key = Key::<Aes256Gcm>::from_slice(&digest);
        Self { aead: Aes256Gcm::new(key) }
    }

    // Encrypts bytes under a fresh random nonce
    //
    // Returns: nonce followed by ciphertext and tag
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        // A nonce must never repeat under one key, so draw it from the OS
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .aead
            .encrypt(&nonce, plaintext)
            .map_err(|e| anyhow!("AES encryption failed: {}", e))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    // Decrypts what seal() produced
    //
    // Errors: input shorter than a nonce, or a tag that doesn't verify
    // (wrong key or modified bytes)
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < NONCE_SIZE {
            bail!(
                "ciphertext too short, need at least {} bytes, got {}",
                NONCE_SIZE,
                sealed.len()
            );
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);

        self.aead
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| anyhow!("AES authentication failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open() {
        let cipher = TokenCipher::new(b"secret");
        let sealed = cipher.seal(b"https://github.com/a/b").unwrap();
        assert_eq!(cipher.open(&sealed).unwrap(), b"https://github.com/a/b");
    }

    #[test]
    fn test_nonce_is_random() {
        let cipher = TokenCipher::new(b"secret");
        let a = cipher.seal(b"same input").unwrap();
        let b = cipher.seal(b"same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key() {
        let sealed = TokenCipher::new(b"one").seal(b"payload").unwrap();
        assert!(TokenCipher::new(b"two").open(&sealed).is_err());
    }

    #[test]
    fn test_open_too_short() {
        let cipher = TokenCipher::new(b"secret");
        assert!(cipher.open(&[0u8; NONCE_SIZE - 1]).is_err());
    }

    #[test]
    fn test_open_tampered() {
        let cipher = TokenCipher::new(b"secret");
        let mut sealed = cipher.seal(b"payload").unwrap();
        if let Some(last) = sealed.last_mut() {
            *last ^= 0xFF;
        }
        assert!(cipher.open(&sealed).is_err());
    }
}
