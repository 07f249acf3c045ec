//! Business Services
//!
//! This module contains the hypermedia engine's three services:
//!
//! - `AnchorSyncService` - reconciles anchor extents with the edited
//!   document on save and cascades orphan deletion
//! - `LinkGraphService` - assembles the per-node anchor/link view and the
//!   graph visualization
//! - `MarkProjectionService` - re-applies persisted anchors as editor marks
//!   on node load
//!
//! Services take their store handles and context explicitly; there is no
//! ambient global state.

pub mod anchor_sync;
pub mod error;
pub mod link_graph;
pub mod projection;

pub use anchor_sync::{AnchorSyncService, SaveReport};
pub use error::ServiceError;
pub use link_graph::{
    AnchorLinkEntry, GraphEdge, GraphNode, GraphView, LinkEndpointView, LinkGraphService, NodeMap,
};
pub use projection::{MarkProjectionService, ProjectionReport};
