//! Store Error Types
//!
//! This module defines error types for store operations. Callers branch on
//! [`StoreError::is_not_found`] where a missing record is safe to skip (the
//! graph builder treats a missing opposing node as a no-op, for example);
//! everything else propagates.

use thiserror::Error;

use crate::models::ValidationError;

/// Store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested record is absent
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A record with this id already exists
    #[error("{kind} already exists: {id}")]
    Duplicate { kind: &'static str, id: String },

    /// The anchor pair is already connected by a link
    #[error("anchors {anchor1_id} and {anchor2_id} are already linked")]
    PairAlreadyLinked {
        anchor1_id: String,
        anchor2_id: String,
    },

    /// A link endpoint references a missing anchor
    #[error("link endpoint references missing anchor: {anchor_id}")]
    MissingEndpoint { anchor_id: String },

    /// Model validation rejected the write
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Backend failure (network, disk, injected test failure)
    #[error("store backend failed: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a not-found error
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a duplicate-record error
    pub fn duplicate(kind: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            id: id.into(),
        }
    }

    /// Create a pair-already-linked error
    pub fn pair_already_linked(
        anchor1_id: impl Into<String>,
        anchor2_id: impl Into<String>,
    ) -> Self {
        Self::PairAlreadyLinked {
            anchor1_id: anchor1_id.into(),
            anchor2_id: anchor2_id.into(),
        }
    }

    /// Create a missing-endpoint error
    pub fn missing_endpoint(anchor_id: impl Into<String>) -> Self {
        Self::MissingEndpoint {
            anchor_id: anchor_id.into(),
        }
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Whether this failure just means the record is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
