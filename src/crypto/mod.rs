//! Cryptographic operations for blobify.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption
//! - PBKDF2-HMAC-SHA256 password-based key derivation

mod cipher;
mod kdf;

pub use cipher::{decrypt_data, encrypt_data, Cipher};
pub use kdf::KeyDerivation;
