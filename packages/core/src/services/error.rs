//! Service Layer Error Types

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the reconciliation, graph, and projection services
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A store call failed and aborted the operation
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    /// The save finished, but one or more best-effort steps failed.
    ///
    /// Nothing is rolled back; the store may hold a recoverable-but-
    /// inconsistent state the next save can repair.
    #[error("save finished with {} failed step(s): {}", failures.len(), failures.join("; "))]
    PartialSave { failures: Vec<String> },
}

impl ServiceError {
    /// Create a partial-save error from the collected step failures
    pub fn partial_save(failures: Vec<String>) -> Self {
        Self::PartialSave { failures }
    }
}
