//! Gateway Route Handlers
//!
//! One module per record kind, mirroring the store traits they front.

pub mod anchors;
pub mod links;
pub mod nodes;
