//! AnchorStore Trait - Anchor Persistence Abstraction
//!
//! Anchors are written by user link-marking actions and by reconciliation;
//! the extent-update path validates extents before persisting so a malformed
//! extent (inverted bounds, length mismatch) never reaches the store.

use async_trait::async_trait;

use crate::models::{Anchor, Extent};
use crate::store::StoreError;

/// Anchor persistence operations
#[async_trait]
pub trait AnchorStore: Send + Sync {
    /// Persist a new anchor.
    ///
    /// # Errors
    ///
    /// Fails on duplicate id, a missing owning node, or an extent that does
    /// not satisfy the offset invariant.
    async fn create_anchor(&self, anchor: Anchor) -> Result<Anchor, StoreError>;

    /// Fetch an anchor by id
    async fn get_anchor(&self, anchor_id: &str) -> Result<Anchor, StoreError>;

    /// All anchors owned by a node, in creation order
    async fn get_anchors_by_node_id(&self, node_id: &str) -> Result<Vec<Anchor>, StoreError>;

    /// Replace an anchor's extent.
    ///
    /// The new extent is validated before persistence; `None` marks the
    /// anchor as covering its whole node.
    async fn update_extent(
        &self,
        anchor_id: &str,
        extent: Option<Extent>,
    ) -> Result<Anchor, StoreError>;

    /// Delete a batch of anchors, returning how many existed.
    ///
    /// Idempotent: absent ids are ignored.
    async fn delete_anchors(&self, anchor_ids: &[String]) -> Result<usize, StoreError>;
}
