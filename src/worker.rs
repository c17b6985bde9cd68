//! Background execution of a batch operation.
//!
//! The operation parameters are moved into a dedicated thread and all
//! communication back to the caller happens over a channel: progress events
//! while the run is in flight, then exactly one terminal result. Nothing is
//! shared mutably between caller and worker. There is no cancellation
//! primitive; an in-flight run finishes on its own.

use crate::batch::{self, Event, Operation};
use crate::error::Error;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Messages streamed from a worker to its caller.
#[derive(Debug)]
pub enum Update {
    /// One per file or per recoverable error.
    Progress(Event),
    /// Terminal message: files processed, or the fatal error.
    Finished(Result<usize, Error>),
}

/// Run `op` on a background thread, streaming updates over a channel.
///
/// The receiver yields zero or more `Progress` updates followed by exactly
/// one `Finished`, after which the channel disconnects.
pub fn spawn(op: Operation) -> Receiver<Update> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let progress = tx.clone();
        let result = batch::run(&op, &mut |event| {
            // The receiver may have been dropped; the run still completes.
            let _ = progress.send(Update::Progress(event));
        });
        let _ = tx.send(Update::Finished(result));
    });

    rx
}
