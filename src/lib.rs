//! Blobify: password-based file encryption disguised as greyscale PNGs.
//!
//! Files are framed with their original extension, encrypted with
//! AES-256-GCM under a PBKDF2-derived key, and the resulting block is
//! written into the pixel data of a square greyscale PNG. A batch engine
//! applies the pipeline recursively over a directory tree, mirroring its
//! structure under an output root and skipping files that fail without
//! aborting the run.
//!
//! # Architecture
//!
//! ```text
//! extLen | ext | bytes -> Encrypt (AES-256-GCM) -> base64 -> PNG pixels
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use blobify::batch::{self, Mode, Operation};
//!
//! let op = Operation {
//!     mode: Mode::Encrypt,
//!     source: "./photos".into(),
//!     output_base: ".".into(),
//!     password: "hunter2".into(),
//! };
//!
//! let processed = batch::run(&op, &mut |event| println!("{}", event)).unwrap();
//! println!("{} file(s) processed", processed);
//! ```

pub mod batch;
pub mod config;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod stego;
pub mod worker;

pub use batch::{Event, Mode, Operation};
pub use error::{Error, Result};
pub use worker::Update;
