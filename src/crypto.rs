//! Symmetric encryption and data fingerprinting.
//!
//! AES-256-GCM with a fresh random nonce per call; payloads are
//! `nonceHex:cipherHex`. The nonce is bound into both directions, so a
//! tampered or foreign payload fails authentication instead of decrypting
//! to garbage.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use sha2::{Digest, Sha256};

use crate::config::EncryptionConfig;
use crate::error::SecurityError;

/// GCM standard nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Symmetric encryption under a fixed server-held key.
pub struct DataEncryption {
    key: [u8; 32],
}

impl DataEncryption {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Build from the configured hex-encoded key.
    pub fn from_config(config: &EncryptionConfig) -> Result<Self, SecurityError> {
        let bytes = hex::decode(&config.key_hex).map_err(|_| SecurityError::InvalidKey)?;
        let key: [u8; 32] = bytes.try_into().map_err(|_| SecurityError::InvalidKey)?;
        Ok(Self::new(key))
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key))
    }

    /// Encrypt `plaintext`, returning `nonceHex:cipherHex`.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, SecurityError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher()
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| SecurityError::Decryption)?;
        Ok(format!("{}:{}", hex::encode(nonce), hex::encode(ciphertext)))
    }

    /// Invert [`encrypt`](Self::encrypt) for a payload produced under the
    /// same key. Malformed or foreign payloads fail with an error.
    pub fn decrypt(&self, payload: &str) -> Result<String, SecurityError> {
        let (nonce_hex, cipher_hex) = payload
            .split_once(':')
            .ok_or(SecurityError::MalformedPayload)?;

        let nonce_bytes = hex::decode(nonce_hex).map_err(|_| SecurityError::MalformedPayload)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(SecurityError::MalformedPayload);
        }
        let ciphertext = hex::decode(cipher_hex).map_err(|_| SecurityError::MalformedPayload)?;

        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|_| SecurityError::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| SecurityError::Decryption)
    }
}

/// Deterministic SHA-256 hex digest for non-secret fingerprinting.
///
/// Not for passwords; see [`crate::password`].
pub fn hash_data(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}
