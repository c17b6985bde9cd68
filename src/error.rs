//! Error types for blobify operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for blobify operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encrypting or decrypting containers.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The file's detected content format is not PNG.
    #[error("Not a valid PNG: {0}")]
    NotAPng(PathBuf),

    /// The extracted blob is smaller than any container this program produces.
    #[error("PNG not encrypted with this program (data too small: {len} bytes)")]
    BlockTooSmall { len: usize },

    /// Encryption error.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption error (wrong password or corrupted data).
    #[error("Decryption failed: wrong password or corrupted data")]
    Authentication,

    /// Extension length outside the valid range for the framing format.
    #[error("Invalid file extension length: {0}")]
    ExtensionLength(usize),

    /// Decrypted payload too short to contain the declared extension.
    #[error("Decrypted data too small to contain an extension")]
    TruncatedPayload,

    /// Stored extension bytes are not valid UTF-8.
    #[error("File extension is not valid UTF-8")]
    ExtensionUtf8(#[from] std::string::FromUtf8Error),

    /// Pixel data did not decode as base64.
    #[error("Invalid PNG or not encrypted with this program (bad base64)")]
    InvalidBase64,

    /// No qualifying files were processed.
    #[error("No supported files found in {0}")]
    NoFilesFound(PathBuf),
}
