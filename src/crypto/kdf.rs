//! PBKDF2 key derivation for password-based encryption.

use crate::config::pbkdf2_params;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

/// Key derivation using PBKDF2-HMAC-SHA256.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: [u8; pbkdf2_params::SALT_LENGTH],
}

impl KeyDerivation {
    /// Create a new KDF with a random salt.
    pub fn new() -> Self {
        let mut salt = [0u8; pbkdf2_params::SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);
        Self { salt }
    }

    /// Create a KDF from the salt stored in a container (for decryption).
    pub fn from_salt(salt: [u8; pbkdf2_params::SALT_LENGTH]) -> Self {
        Self { salt }
    }

    /// Get the salt for storage.
    pub fn salt(&self) -> &[u8; pbkdf2_params::SALT_LENGTH] {
        &self.salt
    }

    /// Derive a 256-bit key from a password.
    ///
    /// Uses PBKDF2-HMAC-SHA256 with 200,000 iterations. Deterministic for
    /// identical (password, salt), which is what lets decryption recompute
    /// the key from the salt stored in the container. Empty passwords are
    /// allowed; there is no strength policy at this layer.
    pub fn derive_key(&self, password: &str) -> [u8; pbkdf2_params::KEY_LENGTH] {
        let mut key = [0u8; pbkdf2_params::KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(
            password.as_bytes(),
            &self.salt,
            pbkdf2_params::ITERATIONS,
            &mut key,
        );
        key
    }
}

impl Default for KeyDerivation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let salt = [1u8; 16];
        let kdf = KeyDerivation::from_salt(salt);

        let key1 = kdf.derive_key("password123");
        let key2 = kdf.derive_key("password123");

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_different_passwords_different_keys() {
        let salt = [2u8; 16];
        let kdf = KeyDerivation::from_salt(salt);

        let key1 = kdf.derive_key("password1");
        let key2 = kdf.derive_key("password2");

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_different_salts_different_keys() {
        let kdf1 = KeyDerivation::from_salt([1u8; 16]);
        let kdf2 = KeyDerivation::from_salt([2u8; 16]);

        let key1 = kdf1.derive_key("password");
        let key2 = kdf2.derive_key("password");

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_new_generates_random_salt() {
        let kdf1 = KeyDerivation::new();
        let kdf2 = KeyDerivation::new();

        assert_ne!(kdf1.salt(), kdf2.salt());
    }

    #[test]
    fn test_empty_password_allowed() {
        let kdf = KeyDerivation::from_salt([3u8; 16]);

        let key1 = kdf.derive_key("");
        let key2 = kdf.derive_key("");

        assert_eq!(key1, key2);
    }
}
