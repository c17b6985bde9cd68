//! AES-256-GCM authenticated encryption for container blocks.
//!
//! Block layout: salt (16) || nonce (12) || tag (16) || ciphertext. There is
//! no version field; any change to the field order or lengths breaks
//! compatibility with previously produced containers.

use crate::config::{BLOCK_HEADER_LENGTH, NONCE_LENGTH, SALT_LENGTH, TAG_LENGTH};
use crate::crypto::kdf::KeyDerivation;
use crate::error::{Error, Result};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;

/// AES-256-GCM cipher wrapper.
pub struct Cipher {
    cipher: Aes256Gcm,
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: [u8; 32]) -> Self {
        let cipher = Aes256Gcm::new_from_slice(&key).expect("Invalid key length");
        Self { cipher }
    }

    /// Encrypt data under a fresh random nonce.
    ///
    /// Returns (nonce, tag, ciphertext) with the 16-byte tag split off the
    /// tail of the aes-gcm output so the block can store it separately.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<([u8; NONCE_LENGTH], Vec<u8>, Vec<u8>)> {
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let mut sealed = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))?;

        let tag = sealed.split_off(sealed.len() - TAG_LENGTH);

        Ok((nonce_bytes, tag, sealed))
    }

    /// Verify and decrypt. Expects the tag separated from the ciphertext.
    pub fn decrypt(&self, nonce: &[u8], tag: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce);

        let mut sealed = Vec::with_capacity(ciphertext.len() + tag.len());
        sealed.extend_from_slice(ciphertext);
        sealed.extend_from_slice(tag);

        self.cipher
            .decrypt(nonce, sealed.as_ref())
            .map_err(|_| Error::Authentication)
    }
}

/// Encrypt a payload with a password into a container block.
///
/// Generates a fresh random salt and nonce, derives the key with PBKDF2,
/// and returns salt || nonce || tag || ciphertext.
pub fn encrypt_data(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let kdf = KeyDerivation::new();
    let key = kdf.derive_key(password);
    let cipher = Cipher::new(key);

    let (nonce, tag, ciphertext) = cipher.encrypt(plaintext)?;

    let mut block = Vec::with_capacity(BLOCK_HEADER_LENGTH + ciphertext.len());
    block.extend_from_slice(kdf.salt());
    block.extend_from_slice(&nonce);
    block.extend_from_slice(&tag);
    block.extend_from_slice(&ciphertext);

    Ok(block)
}

/// Decrypt a container block with a password.
///
/// Re-derives the key from the salt stored in the block. Fails with
/// [`Error::Authentication`] if the tag does not verify (wrong password,
/// tampering, or foreign data); no partial plaintext is ever returned.
pub fn decrypt_data(block: &[u8], password: &str) -> Result<Vec<u8>> {
    if block.len() < BLOCK_HEADER_LENGTH {
        return Err(Error::BlockTooSmall { len: block.len() });
    }

    let (salt, rest) = block.split_at(SALT_LENGTH);
    let (nonce, rest) = rest.split_at(NONCE_LENGTH);
    let (tag, ciphertext) = rest.split_at(TAG_LENGTH);

    let mut salt_bytes = [0u8; SALT_LENGTH];
    salt_bytes.copy_from_slice(salt);

    let kdf = KeyDerivation::from_salt(salt_bytes);
    let key = kdf.derive_key(password);
    let cipher = Cipher::new(key);

    cipher.decrypt(nonce, tag, ciphertext)
}
