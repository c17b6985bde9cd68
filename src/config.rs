//! Constants for the container format and the batch engine.

/// Salt length in bytes, stored at the front of every container.
pub const SALT_LENGTH: usize = 16;

/// AES-GCM nonce length (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// AES-GCM authentication tag length (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Fixed block prefix: salt || nonce || tag.
pub const BLOCK_HEADER_LENGTH: usize = SALT_LENGTH + NONCE_LENGTH + TAG_LENGTH;

/// Smallest extracted blob accepted as a container produced by this program.
pub const MIN_BLOCK_LENGTH: usize = 48;

/// PBKDF2 parameters for key derivation.
pub mod pbkdf2_params {
    /// Iteration count (work factor).
    pub const ITERATIONS: u32 = 200_000;

    /// Output length in bytes (256 bits).
    pub const KEY_LENGTH: usize = 32;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = super::SALT_LENGTH;
}

/// Minimum stored extension length in bytes (the leading dot counts).
pub const MIN_EXT_LENGTH: usize = 1;

/// Maximum stored extension length in bytes.
pub const MAX_EXT_LENGTH: usize = 10;

/// Lowercase extensions that qualify a file for encryption.
pub const ENCRYPT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tiff"];

/// Lowercase extensions that qualify a file for decryption.
pub const DECRYPT_EXTENSIONS: &[&str] = &["png"];

/// Directory created under the output base when encrypting.
pub const ENCRYPT_OUTPUT_DIR: &str = "encrypted_output";

/// Directory created under the output base when decrypting.
pub const DECRYPT_OUTPUT_DIR: &str = "decrypted_output";

/// Suffix appended to the stem of encrypted containers.
pub const ENCRYPTED_SUFFIX: &str = "_encrypted";
