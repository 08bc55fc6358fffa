// src/codec/mod.rs
// =============================================================================
// This module turns GitHub URLs into opaque tokens and back.
//
// Token format:
//   base64url( nonce | AES-256-GCM(url) | tag ), no padding
//
// Guarantees:
// - encrypt only accepts GitHub URLs
// - decrypt only ever returns GitHub URLs (or the empty string for an
//   empty token)
// - decrypt(encrypt(u)) == u
//
// Every decrypt failure is reported as the same ProxyError::Decryption so a
// caller probing with forged tokens learns nothing about why one failed.
//
// Submodules:
// - cipher: The AES-256-GCM layer
// =============================================================================

mod cipher;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ProxyError;
use crate::github::is_valid_github_url;
use cipher::TokenCipher;

pub struct UrlCodec {
    cipher: TokenCipher,
}

impl UrlCodec {
    pub fn new(secret: &SecretString) -> Self {
        Self {
            cipher: TokenCipher::new(secret.expose_secret().as_bytes()),
        }
    }

    // Encrypts a GitHub URL into a token
    //
    // Errors: ProxyError::InvalidInput for an empty or non-GitHub URL
    pub fn encrypt(&self, url: &str) -> Result<String, ProxyError> {
        if url.is_empty() || !is_valid_github_url(url) {
            return Err(ProxyError::InvalidInput);
        }

        // A cipher failure is our fault, not the caller's
        let sealed = self
            .cipher
            .seal(url.as_bytes())
            .map_err(|e| ProxyError::Internal(format!("token encryption failed: {}", e)))?;

        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    // Decrypts a token back into the GitHub URL it was made from
    //
    // Steps:
    //   base64url decode -> AES-GCM open -> UTF-8 -> GitHub URL check
    //
    // An empty token decrypts to an empty string rather than failing.
    //
    // Errors: ProxyError::Decryption for anything that is not a token this
    // codec produced from a GitHub URL
    pub fn decrypt(&self, token: &str) -> Result<String, ProxyError> {
        if token.is_empty() {
            return Ok(String::new());
        }

        let url = self.open(token).ok_or(ProxyError::Decryption)?;

        if !is_valid_github_url(&url) {
            tracing::debug!("decrypted token is not a GitHub URL");
            return Err(ProxyError::Decryption);
        }

        Ok(url)
    }

    // Undoes the token layers; None means "not one of our tokens"
    fn open(&self, token: &str) -> Option<String> {
        // Padding is optional on the way in, never emitted on the way out
        let sealed = URL_SAFE_NO_PAD.decode(token.trim_end_matches('=')).ok()?;
        let plaintext = match self.cipher.open(&sealed) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                tracing::debug!(error = %e, "token rejected");
                return None;
            }
        };
        // Valid ciphertext that isn't text still can't be a URL
        String::from_utf8(plaintext).ok()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option inside open() but Result in decrypt()?
//    - open() only needs to say "worked" or "didn't"
//    - `.ok()?` turns each failed step into an early None
//    - decrypt() then maps None to the single ProxyError::Decryption
//
// 2. What is SecretString?
//    - A String wrapper from the secrecy crate
//    - Its Debug output is redacted and its memory is zeroed on drop
//    - expose_secret() is the one explicit way to read it
//
// 3. What is URL_SAFE_NO_PAD?
//    - A base64 alphabet using '-' and '_' instead of '+' and '/'
//    - No trailing '=' either, so tokens drop into a query string as-is
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> UrlCodec {
        UrlCodec::new(&SecretString::from(secret.to_string()))
    }

    #[test]
    fn test_roundtrip() {
        let codec = codec("test-secret");
        for url in [
            "https://github.com/rust-lang/rust/archive/refs/heads/master.zip",
            "https://github.com/o/repo/releases/download/v1/app.exe",
            "https://raw.githubusercontent.com/o/repo/main/file.txt",
            "https://codeload.github.com/o/r/zip/refs/tags/v1?x=1&y=2",
        ] {
            let token = codec.encrypt(url).unwrap();
            assert_eq!(codec.decrypt(&token).unwrap(), url);
        }
    }

    #[test]
    fn test_token_is_query_safe() {
        let codec = codec("test-secret");
        let token = codec.encrypt("https://github.com/a/b").unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_token_hides_url() {
        let codec = codec("test-secret");
        let token = codec.encrypt("https://github.com/secret-owner/b").unwrap();
        assert!(!token.contains("github"));
        assert!(!token.contains("secret-owner"));
    }

    #[test]
    fn test_encrypt_rejects_non_github() {
        let codec = codec("test-secret");
        assert!(matches!(
            codec.encrypt("https://example.com/x"),
            Err(ProxyError::InvalidInput)
        ));
        assert!(matches!(codec.encrypt(""), Err(ProxyError::InvalidInput)));
        assert!(matches!(codec.encrypt("not-a-url"), Err(ProxyError::InvalidInput)));
    }

    #[test]
    fn test_decrypt_empty_is_empty() {
        assert_eq!(codec("test-secret").decrypt("").unwrap(), "");
    }

    #[test]
    fn test_decrypt_garbage() {
        let codec = codec("test-secret");
        assert!(matches!(codec.decrypt("aGVsbG8gd29ybGQ"), Err(ProxyError::Decryption)));
        assert!(matches!(codec.decrypt("!!!not base64!!!"), Err(ProxyError::Decryption)));
    }

    #[test]
    fn test_decrypt_wrong_secret() {
        let token = codec("one").encrypt("https://github.com/a/b").unwrap();
        assert!(matches!(codec("two").decrypt(&token), Err(ProxyError::Decryption)));
    }

    #[test]
    fn test_decrypt_tolerates_padding() {
        let codec = codec("test-secret");
        let token = codec.encrypt("https://github.com/a/b").unwrap();
        let padded = format!("{}==", token);
        assert_eq!(codec.decrypt(&padded).unwrap(), "https://github.com/a/b");
    }

    #[test]
    fn test_decrypt_rejects_non_github_plaintext() {
        // Sealed with the right key, but the plaintext was never validated
        let codec = codec("test-secret");
        let sealed = codec.cipher.seal(b"https://example.com/x").unwrap();
        let token = URL_SAFE_NO_PAD.encode(sealed);
        assert!(matches!(codec.decrypt(&token), Err(ProxyError::Decryption)));
    }

    #[test]
    fn test_decrypt_rejects_non_utf8_plaintext() {
        // Authenticates fine, but the bytes are not text
        let codec = codec("test-secret");
        let sealed = codec.cipher.seal(&[0xff, 0xfe, 0x00]).unwrap();
        let token = URL_SAFE_NO_PAD.encode(sealed);
        assert!(matches!(codec.decrypt(&token), Err(ProxyError::Decryption)));
    }
}
