//! Steganographic PNG container codec.
//!
//! An encrypted block is base64-encoded and the text bytes are written,
//! row-major, into a square 8-bit greyscale raster; leftover pixels stay
//! zero and are treated as padding on decode. Base64 keeps every embedded
//! byte a valid non-zero pixel value and PNG is lossless, so the round trip
//! is exact. This is a deterministic byte-to-pixel mapping, not
//! steganalysis-resistant hiding.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{GrayImage, ImageFormat, ImageReader};
use std::path::Path;

/// Side of the square raster holding `b64_len` bytes of base64 text.
///
/// floor(sqrt(len)) + 1 strictly accommodates the text even when the
/// integer square root rounds down.
fn side_length(b64_len: usize) -> u32 {
    (b64_len as f64).sqrt() as u32 + 1
}

/// Build the square greyscale raster holding a block's base64 text.
pub fn encode_block(block: &[u8]) -> GrayImage {
    let b64 = STANDARD.encode(block);
    let side = side_length(b64.len());

    let mut pixels = vec![0u8; (side as usize) * (side as usize)];
    pixels[..b64.len()].copy_from_slice(b64.as_bytes());

    GrayImage::from_raw(side, side, pixels).expect("pixel buffer sized to side * side")
}

/// Encode a block and save it as a PNG.
pub fn write_block(block: &[u8], path: &Path) -> Result<()> {
    encode_block(block).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Read an encrypted block back out of a PNG container.
///
/// The format is sniffed from the file content, not the extension; anything
/// other than PNG fails with [`Error::NotAPng`]. Pixel data that does not
/// decode as base64 fails with [`Error::InvalidBase64`].
pub fn read_block(path: &Path) -> Result<Vec<u8>> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    if reader.format() != Some(ImageFormat::Png) {
        return Err(Error::NotAPng(path.to_path_buf()));
    }

    let pixels = reader.decode()?.into_luma8().into_raw();

    // Trailing zero pixels are square-fill padding. Base64 text never
    // contains a zero byte, so the trim cannot eat real content.
    let content_len = pixels.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);

    STANDARD
        .decode(&pixels[..content_len])
        .map_err(|_| Error::InvalidBase64)
}
