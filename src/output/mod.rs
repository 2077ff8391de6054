//! Snapshot persistence.
//!
//! This module provides the abstraction for writing the latest encoded
//! snapshot to its destination, plus the file-based implementation.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileOutput;

use std::io;

use thiserror::Error;

/// Errors that can occur while persisting a snapshot.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to write the output file.
    #[error("Failed to write output file: {0}")]
    Write(#[source] io::Error),

    /// The blocking write task did not complete.
    #[error("Output write task failed: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// Abstraction for persisting the encoded snapshot.
///
/// Implementations replace the previous contents entirely; readers should
/// never observe a partially written snapshot.
pub trait SnapshotWriter: Send + Sync {
    /// Replaces the persisted snapshot with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be written.
    fn write(&self, bytes: &[u8]) -> impl std::future::Future<Output = Result<(), OutputError>> + Send;
}
