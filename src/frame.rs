//! Payload framing: the original file extension packed ahead of its bytes.
//!
//! Layout: extLen (1 byte, in [1,10]) || ext (UTF-8, leading dot included) || file bytes.
//!
//! An extension length outside [1,10] marks the payload as corrupt or
//! foreign. This check is the main guard against data that happens to pass
//! the AEAD tag but was never produced by this program, e.g. an edited
//! container.

use crate::config::{MAX_EXT_LENGTH, MIN_EXT_LENGTH};
use crate::error::{Error, Result};

/// Pack an extension and file contents into a single payload.
///
/// The extension must be 1 to 10 bytes including its leading dot;
/// anything else fails with [`Error::ExtensionLength`] so the caller can
/// skip the file instead of silently truncating.
pub fn frame(ext: &str, data: &[u8]) -> Result<Vec<u8>> {
    let ext_bytes = ext.as_bytes();
    if ext_bytes.len() < MIN_EXT_LENGTH || ext_bytes.len() > MAX_EXT_LENGTH {
        return Err(Error::ExtensionLength(ext_bytes.len()));
    }

    let mut payload = Vec::with_capacity(1 + ext_bytes.len() + data.len());
    payload.push(ext_bytes.len() as u8);
    payload.extend_from_slice(ext_bytes);
    payload.extend_from_slice(data);

    Ok(payload)
}

/// Unpack a payload into its extension and file contents.
pub fn unframe(payload: &[u8]) -> Result<(String, Vec<u8>)> {
    let (&ext_len, rest) = payload.split_first().ok_or(Error::TruncatedPayload)?;
    let ext_len = ext_len as usize;

    if !(MIN_EXT_LENGTH..=MAX_EXT_LENGTH).contains(&ext_len) {
        return Err(Error::ExtensionLength(ext_len));
    }
    if rest.len() < ext_len {
        return Err(Error::TruncatedPayload);
    }

    let ext = String::from_utf8(rest[..ext_len].to_vec())?;
    Ok((ext, rest[ext_len..].to_vec()))
}
