//! NodeStore Trait - Node Persistence Abstraction
//!
//! Abstracts node persistence so business logic never touches a concrete
//! backend. In the deployed system nodes live behind an HTTP+JSON gateway;
//! [`crate::store::MemoryStore`] is the in-process implementation used by
//! the engine's tests and by the bundled gateway.
//!
//! All methods are async and implementations must be `Send + Sync` so store
//! handles can be shared across tasks as `Arc<dyn NodeStore>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Node, NodeUpdate};
use crate::store::StoreError;

/// Result of a delete operation
///
/// Deletes are idempotent: removing an absent node succeeds, and `existed`
/// records whether anything was actually removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub existed: bool,
}

impl DeleteResult {
    /// The node existed and was deleted
    pub fn existed() -> Self {
        Self { existed: true }
    }

    /// The node didn't exist (idempotent no-op)
    pub fn not_found() -> Self {
        Self { existed: false }
    }
}

/// Node persistence operations
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Persist a new node.
    ///
    /// # Errors
    ///
    /// Fails on duplicate id or if [`Node::validate`] rejects the node.
    async fn create_node(&self, node: Node) -> Result<Node, StoreError>;

    /// Fetch a node by id
    async fn get_node(&self, node_id: &str) -> Result<Node, StoreError>;

    /// Fetch several nodes at once, in request order.
    ///
    /// Missing ids are skipped rather than failing the whole batch.
    async fn get_nodes(&self, node_ids: &[String]) -> Result<Vec<Node>, StoreError>;

    /// Apply a partial property patch and return the updated node
    async fn update_node(&self, node_id: &str, update: NodeUpdate) -> Result<Node, StoreError>;

    /// Delete a node by id.
    ///
    /// Descendant cleanup is the caller's concern; this removes one record.
    async fn delete_node(&self, node_id: &str) -> Result<DeleteResult, StoreError>;

    /// Case-insensitive substring search over titles and content
    async fn search_nodes(&self, query: &str) -> Result<Vec<Node>, StoreError>;
}
