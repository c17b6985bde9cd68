//! Batch engine: applies the encrypt/decrypt pipeline over a file tree.
//!
//! One run walks a single file or a directory tree, transforms every
//! qualifying file, and mirrors the source's subdirectory structure under a
//! fresh output root. Per-file failures are reported and skipped; only
//! output-root setup failures and an empty result abort the run.

use crate::config::{
    DECRYPT_EXTENSIONS, DECRYPT_OUTPUT_DIR, ENCRYPTED_SUFFIX, ENCRYPT_EXTENSIONS,
    ENCRYPT_OUTPUT_DIR, MIN_BLOCK_LENGTH,
};
use crate::crypto::{decrypt_data, encrypt_data};
use crate::error::{Error, Result};
use crate::{frame, stego};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Direction of one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    /// Name of the output directory created under the output base.
    pub fn output_dir(self) -> &'static str {
        match self {
            Mode::Encrypt => ENCRYPT_OUTPUT_DIR,
            Mode::Decrypt => DECRYPT_OUTPUT_DIR,
        }
    }

    /// Whether a walked file qualifies for this mode, by lowercase extension.
    fn qualifies(self, path: &Path) -> bool {
        let table = match self {
            Mode::Encrypt => ENCRYPT_EXTENSIONS,
            Mode::Decrypt => DECRYPT_EXTENSIONS,
        };
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| table.contains(&e.as_str()))
    }
}

/// Parameters of one batch run.
///
/// Immutable for the duration of the run; [`crate::worker::spawn`] moves it
/// into the executing thread, so nothing is shared mutably with the caller.
#[derive(Debug, Clone)]
pub struct Operation {
    pub mode: Mode,
    /// File or directory to process.
    pub source: PathBuf,
    /// Directory under which the mode's output root is created.
    pub output_base: PathBuf,
    pub password: String,
}

/// Progress events, one per file or per recoverable error.
#[derive(Debug)]
pub enum Event {
    /// A qualifying file is about to be processed.
    Processing { path: PathBuf },
    /// A file failed and was skipped; the batch continues.
    Failed { path: PathBuf, error: Error },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Processing { path } => write!(f, "Processing: {}", path.display()),
            Event::Failed { path, error } => {
                write!(f, "Warning - error on {}: {}", path.display(), error)
            }
        }
    }
}

/// Run one batch operation, reporting progress through `report`.
///
/// Returns the number of files processed. Fails with
/// [`Error::NoFilesFound`] when nothing was processed, and with the
/// underlying I/O error when the output root cannot be reset.
pub fn run(op: &Operation, report: &mut dyn FnMut(Event)) -> Result<usize> {
    let output_root = setup_output_root(op)?;
    let files = enumerate(op, &output_root)?;

    let mut processed = 0;
    for file in files {
        report(Event::Processing { path: file.clone() });
        match process_file(op, &file, &output_root) {
            Ok(()) => processed += 1,
            Err(error) => report(Event::Failed { path: file, error }),
        }
    }

    if processed == 0 {
        return Err(Error::NoFilesFound(op.source.clone()));
    }
    Ok(processed)
}

/// Delete and recreate the mode's output root under the output base.
///
/// Destructive precondition: callers confirm with the user before starting
/// a run against a non-empty output root.
fn setup_output_root(op: &Operation) -> Result<PathBuf> {
    let output_root = op.output_base.join(op.mode.output_dir());
    if output_root.exists() {
        fs::remove_dir_all(&output_root)?;
    }
    fs::create_dir_all(&output_root)?;
    Ok(output_root)
}

/// Collect the files this run will process.
///
/// A single-file source is taken as-is; a directory is walked recursively,
/// keeping files that qualify for the mode and excluding anything inside
/// the just-created output root so a run never consumes its own output.
fn enumerate(op: &Operation, output_root: &Path) -> Result<Vec<PathBuf>> {
    if op.source.is_file() {
        return Ok(vec![op.source.clone()]);
    }

    // Canonical paths make the exclusion hold even when the output root
    // sits inside the source tree under a different spelling.
    let canonical_root = fs::canonicalize(output_root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(&op.source)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if let Ok(canonical) = fs::canonicalize(path) {
            if canonical.starts_with(&canonical_root) {
                continue;
            }
        }
        if op.mode.qualifies(path) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Transform one file into the mirrored output directory.
fn process_file(op: &Operation, file: &Path, output_root: &Path) -> Result<()> {
    let out_dir = if op.source.is_dir() {
        let rel = file
            .parent()
            .and_then(|p| p.strip_prefix(&op.source).ok())
            .unwrap_or_else(|| Path::new(""));
        output_root.join(rel)
    } else {
        output_root.to_path_buf()
    };
    fs::create_dir_all(&out_dir)?;

    match op.mode {
        Mode::Encrypt => encrypt_file(file, &out_dir, &op.password),
        Mode::Decrypt => decrypt_file(file, &out_dir, &op.password),
    }
}

/// frame -> encrypt -> stego-encode; written only after the full in-memory
/// transform succeeded, so a failure leaves no partial output.
fn encrypt_file(file: &Path, out_dir: &Path, password: &str) -> Result<()> {
    let ext = file
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    let data = fs::read(file)?;

    let payload = frame::frame(&ext, &data)?;
    let block = encrypt_data(&payload, password)?;

    let output_path = out_dir.join(format!("{}{}.png", file_stem(file), ENCRYPTED_SUFFIX));
    stego::write_block(&block, &output_path)
}

/// stego-decode -> decrypt -> unframe; the recovered file keeps the source
/// stem minus the `_encrypted` suffix plus its original extension.
fn decrypt_file(file: &Path, out_dir: &Path, password: &str) -> Result<()> {
    let block = stego::read_block(file)?;
    if block.len() < MIN_BLOCK_LENGTH {
        return Err(Error::BlockTooSmall { len: block.len() });
    }

    let payload = decrypt_data(&block, password)?;
    let (ext, data) = frame::unframe(&payload)?;

    let mut stem = file_stem(file);
    if let Some(stripped) = stem.strip_suffix(ENCRYPTED_SUFFIX) {
        stem = stripped.to_string();
    }

    let output_path = free_path(out_dir, &stem, &ext);
    fs::write(output_path, data)?;

    Ok(())
}

fn file_stem(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// First non-existing `stem + ext` path in `out_dir`, appending `_1`, `_2`,
/// ... until free.
fn free_path(out_dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let mut candidate = out_dir.join(format!("{}{}", stem, ext));
    let mut counter = 1;
    while candidate.exists() {
        candidate = out_dir.join(format!("{}_{}{}", stem, counter, ext));
        counter += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_qualifies_by_lowercase_extension() {
        assert!(Mode::Encrypt.qualifies(Path::new("photo.JPG")));
        assert!(Mode::Encrypt.qualifies(Path::new("dir/photo.tiff")));
        assert!(!Mode::Encrypt.qualifies(Path::new("notes.txt")));
        assert!(!Mode::Encrypt.qualifies(Path::new("no_extension")));

        assert!(Mode::Decrypt.qualifies(Path::new("a_encrypted.png")));
        assert!(!Mode::Decrypt.qualifies(Path::new("photo.jpg")));
    }

    #[test]
    fn test_free_path_counts_from_one() {
        let dir = TempDir::new().unwrap();

        assert_eq!(
            free_path(dir.path(), "a", ".txt"),
            dir.path().join("a.txt")
        );

        fs::write(dir.path().join("a.txt"), b"first").unwrap();
        assert_eq!(
            free_path(dir.path(), "a", ".txt"),
            dir.path().join("a_1.txt")
        );

        fs::write(dir.path().join("a_1.txt"), b"second").unwrap();
        assert_eq!(
            free_path(dir.path(), "a", ".txt"),
            dir.path().join("a_2.txt")
        );
    }

    #[test]
    fn test_setup_resets_output_root() {
        let dir = TempDir::new().unwrap();
        let op = Operation {
            mode: Mode::Encrypt,
            source: dir.path().join("src"),
            output_base: dir.path().to_path_buf(),
            password: String::new(),
        };

        let stale = dir.path().join(ENCRYPT_OUTPUT_DIR).join("stale.png");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, b"old run").unwrap();

        let root = setup_output_root(&op).unwrap();

        assert!(root.exists());
        assert!(!stale.exists());
    }

    #[test]
    fn test_encrypt_skips_extension_over_ten_bytes() {
        let dir = TempDir::new().unwrap();
        let long = dir.path().join("file.extension11");
        fs::write(&long, b"data").unwrap();

        let result = encrypt_file(&long, dir.path(), "pw");
        assert!(matches!(result, Err(Error::ExtensionLength(12))));

        // No partial output was written
        assert!(!dir.path().join("file_encrypted.png").exists());
    }

    #[test]
    fn test_encrypt_rejects_missing_extension() {
        let dir = TempDir::new().unwrap();
        let bare = dir.path().join("README");
        fs::write(&bare, b"data").unwrap();

        let result = encrypt_file(&bare, dir.path(), "pw");
        assert!(matches!(result, Err(Error::ExtensionLength(0))));
    }
}
