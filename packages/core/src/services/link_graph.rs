//! Link Graph Construction
//!
//! Builds the per-node view of anchors and their connections that drives
//! both the textual link menu and the node-to-node graph visualization.
//!
//! For composite documents (a recipe whose description/ingredients/steps are
//! separate child text nodes) the anchors physically live on the sub-nodes,
//! so the builder runs once per constituent and merges the results.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::models::{Anchor, Link, Node};
use crate::services::ServiceError;
use crate::store::{AnchorStore, LinkStore, NodeStore};

/// In-memory node lookup, keyed by node id
///
/// The dashboard builds this once per load; the graph service uses it as the
/// fast path and falls back to the node store for ids it doesn't contain.
pub type NodeMap = HashMap<String, Node>;

/// One link as seen from a particular anchor: the connection plus the
/// endpoint on the other side
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEndpointView {
    pub link: Link,
    pub opp_node: Node,
    pub opp_anchor: Anchor,
}

/// An anchor together with everything it connects to
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorLinkEntry {
    pub anchor: Anchor,
    pub links: Vec<LinkEndpointView>,
}

/// A node in the graph visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

/// An edge in the graph visualization, one per link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The node-to-node view rendered by the graph modal
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Assembles anchor/link entries and the graph view for a node
pub struct LinkGraphService {
    nodes: Arc<dyn NodeStore>,
    anchors: Arc<dyn AnchorStore>,
    links: Arc<dyn LinkStore>,
}

impl LinkGraphService {
    pub fn new(
        nodes: Arc<dyn NodeStore>,
        anchors: Arc<dyn AnchorStore>,
        links: Arc<dyn LinkStore>,
    ) -> Self {
        Self {
            nodes,
            anchors,
            links,
        }
    }

    /// Build the anchor-id to entry map for `node`.
    ///
    /// Recipe nodes merge the maps of their three constituent sub-nodes.
    /// Links whose opposing node or anchor no longer exists are skipped with
    /// a warning rather than failing the whole build.
    pub async fn build_for_node(
        &self,
        node: &Node,
        node_map: &NodeMap,
    ) -> Result<HashMap<String, AnchorLinkEntry>, ServiceError> {
        let Some(recipe) = node.as_recipe() else {
            return self.build_single(node, node_map).await;
        };

        let mut merged = HashMap::new();
        for sub_id in recipe.sub_node_ids() {
            let sub_node = match self.resolve_node(sub_id, node_map).await {
                Ok(sub_node) => sub_node,
                Err(err) if err.is_not_found() => {
                    warn!("recipe {} references missing sub-node {}", node.node_id, sub_id);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            merged.extend(self.build_single(&sub_node, node_map).await?);
        }
        Ok(merged)
    }

    /// Derive the graph visualization for `node`.
    ///
    /// Nodes: the current node plus every distinct opposing node. Edges: one
    /// per link, from the current node to the opposing node. Links that loop
    /// back to the current node are excluded entirely, so an anchor whose
    /// links are all self-loops contributes neither an edge nor a node.
    pub async fn graph_view(
        &self,
        node: &Node,
        node_map: &NodeMap,
    ) -> Result<GraphView, ServiceError> {
        let entries = self.build_for_node(node, node_map).await?;

        let mut nodes = vec![GraphNode {
            id: node.node_id.clone(),
            label: node.title.clone(),
        }];
        let mut seen_nodes: HashSet<String> = HashSet::from([node.node_id.clone()]);
        let mut edges = Vec::new();
        let mut seen_edges = HashSet::new();

        for entry in entries.values() {
            for view in &entry.links {
                if view.opp_node.node_id == node.node_id {
                    // Self-loop: no edge, and no isolated point in the graph
                    continue;
                }
                if !seen_edges.insert(view.link.link_id.clone()) {
                    continue;
                }
                if seen_nodes.insert(view.opp_node.node_id.clone()) {
                    nodes.push(GraphNode {
                        id: view.opp_node.node_id.clone(),
                        label: view.opp_node.title.clone(),
                    });
                }
                edges.push(GraphEdge {
                    id: view.link.link_id.clone(),
                    source: node.node_id.clone(),
                    target: view.opp_node.node_id.clone(),
                });
            }
        }

        // Entry iteration order is arbitrary; pin the output down
        nodes[1..].sort_by(|a, b| a.id.cmp(&b.id));
        edges.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(GraphView { nodes, edges })
    }

    async fn build_single(
        &self,
        node: &Node,
        node_map: &NodeMap,
    ) -> Result<HashMap<String, AnchorLinkEntry>, ServiceError> {
        let anchors = self.anchors.get_anchors_by_node_id(&node.node_id).await?;

        let mut entries = HashMap::new();
        for anchor in anchors {
            let links = self.links.get_links_by_anchor_id(&anchor.anchor_id).await?;

            let mut views = Vec::new();
            for link in links {
                let (opp_anchor_id, opp_node_id) = {
                    let (a, n) = link.opposite_of(&anchor.anchor_id);
                    (a.to_string(), n.to_string())
                };

                let opp_node = match self.resolve_node(&opp_node_id, node_map).await {
                    Ok(opp_node) => opp_node,
                    Err(err) if err.is_not_found() => {
                        warn!(
                            "link {} references missing node {}, skipping",
                            link.link_id, opp_node_id
                        );
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                let opp_anchor = match self.anchors.get_anchor(&opp_anchor_id).await {
                    Ok(opp_anchor) => opp_anchor,
                    Err(err) if err.is_not_found() => {
                        warn!(
                            "link {} references missing anchor {}, skipping",
                            link.link_id, opp_anchor_id
                        );
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };

                views.push(LinkEndpointView {
                    link,
                    opp_node,
                    opp_anchor,
                });
            }

            entries.insert(
                anchor.anchor_id.clone(),
                AnchorLinkEntry {
                    anchor,
                    links: views,
                },
            );
        }
        Ok(entries)
    }

    /// Node-map fast path with store-lookup fallback
    async fn resolve_node(
        &self,
        node_id: &str,
        node_map: &NodeMap,
    ) -> Result<Node, crate::store::StoreError> {
        if let Some(node) = node_map.get(node_id) {
            return Ok(node.clone());
        }
        self.nodes.get_node(node_id).await
    }
}
