//! LinkStore Trait - Link Persistence Abstraction
//!
//! Links reference exactly two anchors. The store enforces referential
//! integrity at create time (both endpoints must exist) and the
//! one-link-per-anchor-pair rule. Reads preserve creation order, which is
//! what makes "first link found" selection deterministic for consumers.

use async_trait::async_trait;

use crate::models::Link;
use crate::store::StoreError;

/// Link persistence operations
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Persist a new link.
    ///
    /// # Errors
    ///
    /// Fails on duplicate id, a missing endpoint anchor, or when the anchor
    /// pair is already connected.
    async fn create_link(&self, link: Link) -> Result<Link, StoreError>;

    /// Fetch a link by id
    async fn get_link(&self, link_id: &str) -> Result<Link, StoreError>;

    /// All links touching an anchor, in creation order
    async fn get_links_by_anchor_id(&self, anchor_id: &str) -> Result<Vec<Link>, StoreError>;

    /// All links touching any of the anchors, deduplicated, in creation order
    async fn get_links_by_anchor_ids(&self, anchor_ids: &[String])
        -> Result<Vec<Link>, StoreError>;

    /// Delete a batch of links, returning how many existed.
    ///
    /// Idempotent: absent ids are ignored.
    async fn delete_links(&self, link_ids: &[String]) -> Result<usize, StoreError>;
}
