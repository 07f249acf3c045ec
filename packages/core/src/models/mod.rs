//! Data Models
//!
//! This module contains the core data structures used throughout MyHypermedia:
//!
//! - `Node` - a stored document (text, image, folder, recipe) with a
//!   hierarchical path
//! - `Anchor` / `Extent` - a linkable region of one node's content
//! - `Link` - a symmetric connection between two anchors

mod anchor;
mod extent;
mod link;
mod node;

pub use anchor::{make_anchor_id, Anchor};
pub use extent::{Extent, TextExtent};
pub use link::{make_link_id, Link};
pub use node::{
    make_node_id, Cuisine, FolderViewType, Node, NodePath, NodeType, NodeUpdate, NodeVariant,
    RecipeFields, ValidationError,
};
