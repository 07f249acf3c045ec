//! MyHypermedia Core Engine
//!
//! This crate implements the hypermedia heart of MyHypermedia: nodes hold
//! rich text, users mark sub-ranges of that text (or whole images) as
//! anchors, anchors connect pairwise through links, and the engine keeps all
//! of it consistent while the text underneath keeps changing.
//!
//! # Architecture
//!
//! - [`models`] - data structures (Node, Anchor, Extent, Link)
//! - [`document`] - the rich-text editor abstraction and HTML codec
//! - [`store`] - persistence traits, the in-memory store, refresh signals
//! - [`services`] - extent reconciliation on save, link graph construction,
//!   anchor mark projection on load
//! - [`http`] - the JSON gateway exposing the stores
//!
//! # Control flow
//!
//! Load a node and `MarkProjectionService` paints its stored anchors into
//! the editor. The user edits and saves; `AnchorSyncService` walks the
//! edited document, recomputes anchor extents, deletes anchors whose text is
//! gone (cascading to their links, and across same-node links to the paired
//! anchor), persists the new content, and bumps the refresh counters.
//! `LinkGraphService` assembles the bidirectional link view on demand.

pub mod document;
pub mod http;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use models::*;
pub use services::*;
pub use store::*;
