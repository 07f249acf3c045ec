//! In-Memory Store
//!
//! [`MemoryStore`] implements all three store traits over one shared record
//! set behind a `tokio::sync::RwLock`. It stands in for the deployed
//! system's database-backed gateways: the lock makes each call atomic, but
//! there is no cross-call concurrency control. Two editors saving the same
//! node can still race, exactly as they can against the real backend.
//!
//! Records are kept in flat vectors so every read preserves creation order.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Anchor, Extent, Link, Node, NodeUpdate};
use crate::store::{AnchorStore, DeleteResult, LinkStore, NodeStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    nodes: Vec<Node>,
    anchors: Vec<Anchor>,
    links: Vec<Link>,
}

/// Shared in-memory implementation of the node/anchor/link stores
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored anchors (test observability)
    pub async fn anchor_count(&self) -> usize {
        self.inner.read().await.anchors.len()
    }

    /// Number of stored links (test observability)
    pub async fn link_count(&self) -> usize {
        self.inner.read().await.links.len()
    }
}

#[async_trait]
impl NodeStore for MemoryStore {
    async fn create_node(&self, node: Node) -> Result<Node, StoreError> {
        node.validate()?;
        let mut inner = self.inner.write().await;
        if inner.nodes.iter().any(|n| n.node_id == node.node_id) {
            return Err(StoreError::duplicate("node", &node.node_id));
        }
        inner.nodes.push(node.clone());
        Ok(node)
    }

    async fn get_node(&self, node_id: &str) -> Result<Node, StoreError> {
        let inner = self.inner.read().await;
        inner
            .nodes
            .iter()
            .find(|n| n.node_id == node_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("node", node_id))
    }

    async fn get_nodes(&self, node_ids: &[String]) -> Result<Vec<Node>, StoreError> {
        let inner = self.inner.read().await;
        Ok(node_ids
            .iter()
            .filter_map(|id| inner.nodes.iter().find(|n| &n.node_id == id).cloned())
            .collect())
    }

    async fn update_node(&self, node_id: &str, update: NodeUpdate) -> Result<Node, StoreError> {
        let mut inner = self.inner.write().await;
        let node = inner
            .nodes
            .iter_mut()
            .find(|n| n.node_id == node_id)
            .ok_or_else(|| StoreError::not_found("node", node_id))?;
        update.apply(node)?;
        Ok(node.clone())
    }

    async fn delete_node(&self, node_id: &str) -> Result<DeleteResult, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.nodes.len();
        inner.nodes.retain(|n| n.node_id != node_id);
        Ok(if inner.nodes.len() < before {
            DeleteResult::existed()
        } else {
            DeleteResult::not_found()
        })
    }

    async fn search_nodes(&self, query: &str) -> Result<Vec<Node>, StoreError> {
        let needle = query.to_lowercase();
        let inner = self.inner.read().await;
        Ok(inner
            .nodes
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.content().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AnchorStore for MemoryStore {
    async fn create_anchor(&self, anchor: Anchor) -> Result<Anchor, StoreError> {
        anchor.validate()?;
        let mut inner = self.inner.write().await;
        if inner.anchors.iter().any(|a| a.anchor_id == anchor.anchor_id) {
            return Err(StoreError::duplicate("anchor", &anchor.anchor_id));
        }
        if !inner.nodes.iter().any(|n| n.node_id == anchor.node_id) {
            return Err(StoreError::not_found("node", &anchor.node_id));
        }
        inner.anchors.push(anchor.clone());
        Ok(anchor)
    }

    async fn get_anchor(&self, anchor_id: &str) -> Result<Anchor, StoreError> {
        let inner = self.inner.read().await;
        inner
            .anchors
            .iter()
            .find(|a| a.anchor_id == anchor_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("anchor", anchor_id))
    }

    async fn get_anchors_by_node_id(&self, node_id: &str) -> Result<Vec<Anchor>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .anchors
            .iter()
            .filter(|a| a.node_id == node_id)
            .cloned()
            .collect())
    }

    async fn update_extent(
        &self,
        anchor_id: &str,
        extent: Option<Extent>,
    ) -> Result<Anchor, StoreError> {
        if let Some(extent) = &extent {
            extent.validate()?;
        }
        let mut inner = self.inner.write().await;
        let anchor = inner
            .anchors
            .iter_mut()
            .find(|a| a.anchor_id == anchor_id)
            .ok_or_else(|| StoreError::not_found("anchor", anchor_id))?;
        anchor.extent = extent;
        Ok(anchor.clone())
    }

    async fn delete_anchors(&self, anchor_ids: &[String]) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.anchors.len();
        inner
            .anchors
            .retain(|a| !anchor_ids.contains(&a.anchor_id));
        Ok(before - inner.anchors.len())
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn create_link(&self, link: Link) -> Result<Link, StoreError> {
        link.validate()?;
        let mut inner = self.inner.write().await;
        if inner.links.iter().any(|l| l.link_id == link.link_id) {
            return Err(StoreError::duplicate("link", &link.link_id));
        }
        for anchor_id in [&link.anchor1_id, &link.anchor2_id] {
            if !inner.anchors.iter().any(|a| &a.anchor_id == anchor_id) {
                return Err(StoreError::missing_endpoint(anchor_id));
            }
        }
        if inner
            .links
            .iter()
            .any(|l| l.connects_pair(&link.anchor1_id, &link.anchor2_id))
        {
            return Err(StoreError::pair_already_linked(
                &link.anchor1_id,
                &link.anchor2_id,
            ));
        }
        inner.links.push(link.clone());
        Ok(link)
    }

    async fn get_link(&self, link_id: &str) -> Result<Link, StoreError> {
        let inner = self.inner.read().await;
        inner
            .links
            .iter()
            .find(|l| l.link_id == link_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("link", link_id))
    }

    async fn get_links_by_anchor_id(&self, anchor_id: &str) -> Result<Vec<Link>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .links
            .iter()
            .filter(|l| l.touches(anchor_id))
            .cloned()
            .collect())
    }

    async fn get_links_by_anchor_ids(
        &self,
        anchor_ids: &[String],
    ) -> Result<Vec<Link>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .links
            .iter()
            .filter(|l| anchor_ids.iter().any(|id| l.touches(id)))
            .cloned()
            .collect())
    }

    async fn delete_links(&self, link_ids: &[String]) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.links.len();
        inner.links.retain(|l| !link_ids.contains(&l.link_id));
        Ok(before - inner.links.len())
    }
}
