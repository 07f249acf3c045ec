//! Store Layer
//!
//! This module abstracts persistence for the three record kinds the engine
//! works with:
//!
//! - [`NodeStore`] - documents
//! - [`AnchorStore`] - linkable regions
//! - [`LinkStore`] - anchor-to-anchor connections
//!
//! In the deployed system these operations sit behind HTTP+JSON gateways;
//! the traits preserve that interface contract so the engine never depends
//! on a concrete backend. [`MemoryStore`] implements all three in process.
//!
//! [`RefreshSignals`] carries the post-commit refresh notifications the UI
//! listens to.

mod anchor_store;
mod error;
mod events;
mod link_store;
mod memory;
mod node_store;

pub use anchor_store::AnchorStore;
pub use error::StoreError;
pub use events::RefreshSignals;
pub use link_store::LinkStore;
pub use memory::MemoryStore;
pub use node_store::{DeleteResult, NodeStore};
