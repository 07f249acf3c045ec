//! Links
//!
//! A link is an undirected, symmetric connection between exactly two anchors.
//! The two anchors may live on the same node (a "self-link"), which gets
//! special treatment during reconciliation: deleting one side must also sever
//! the paired side. The link is the sole owner of the connectedness
//! relationship; anchors hold no back-pointers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ValidationError;

/// A symmetric connection between two anchors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub link_id: String,
    pub anchor1_id: String,
    pub anchor1_node_id: String,
    pub anchor2_id: String,
    pub anchor2_node_id: String,
}

impl Link {
    /// Create a link with a freshly generated id
    pub fn new(
        anchor1_id: impl Into<String>,
        anchor1_node_id: impl Into<String>,
        anchor2_id: impl Into<String>,
        anchor2_node_id: impl Into<String>,
    ) -> Self {
        Self {
            link_id: make_link_id(),
            anchor1_id: anchor1_id.into(),
            anchor1_node_id: anchor1_node_id.into(),
            anchor2_id: anchor2_id.into(),
            anchor2_node_id: anchor2_node_id.into(),
        }
    }

    /// Whether both endpoints live on the same node
    pub fn is_self_link(&self) -> bool {
        self.anchor1_node_id == self.anchor2_node_id
    }

    /// Whether either endpoint is `anchor_id`
    pub fn touches(&self, anchor_id: &str) -> bool {
        self.anchor1_id == anchor_id || self.anchor2_id == anchor_id
    }

    /// Whether this link connects the given unordered anchor pair
    pub fn connects_pair(&self, a: &str, b: &str) -> bool {
        (self.anchor1_id == a && self.anchor2_id == b)
            || (self.anchor1_id == b && self.anchor2_id == a)
    }

    /// The endpoint on the other side of `anchor_id`, as (anchor id, node id).
    ///
    /// A degenerate link whose two endpoints reference the same anchor id
    /// opposes itself.
    pub fn opposite_of(&self, anchor_id: &str) -> (&str, &str) {
        if self.anchor1_id == anchor_id {
            (&self.anchor2_id, &self.anchor2_node_id)
        } else {
            (&self.anchor1_id, &self.anchor1_node_id)
        }
    }

    /// The node id on the other side of `node_id`.
    ///
    /// For a self-link this is the same node, by construction.
    pub fn opposite_node_of(&self, node_id: &str) -> &str {
        if self.anchor1_node_id == node_id {
            &self.anchor2_node_id
        } else {
            &self.anchor1_node_id
        }
    }

    /// Validate that all ids are present
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.link_id.is_empty() {
            return Err(ValidationError::MissingField("linkId".to_string()));
        }
        for (field, value) in [
            ("anchor1Id", &self.anchor1_id),
            ("anchor1NodeId", &self.anchor1_node_id),
            ("anchor2Id", &self.anchor2_id),
            ("anchor2NodeId", &self.anchor2_node_id),
        ] {
            if value.is_empty() {
                return Err(ValidationError::MissingField(field.to_string()));
            }
        }
        Ok(())
    }
}

/// Generate a link id, e.g. `link.91d4…`
pub fn make_link_id() -> String {
    format!("link.{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_link() -> Link {
        Link::new("anchor.a1", "text.n1", "anchor.a2", "text.n2")
    }

    #[test]
    fn test_link_creation() {
        let link = cross_link();

        assert!(link.link_id.starts_with("link."));
        assert!(!link.is_self_link());
        assert!(link.touches("anchor.a1"));
        assert!(link.touches("anchor.a2"));
        assert!(!link.touches("anchor.a3"));
        assert!(link.validate().is_ok());
    }

    #[test]
    fn test_opposite_of_either_side() {
        let link = cross_link();

        assert_eq!(link.opposite_of("anchor.a1"), ("anchor.a2", "text.n2"));
        assert_eq!(link.opposite_of("anchor.a2"), ("anchor.a1", "text.n1"));
    }

    #[test]
    fn test_degenerate_link_opposes_itself() {
        let link = Link::new("anchor.a1", "text.n1", "anchor.a1", "text.n1");

        assert_eq!(link.opposite_of("anchor.a1"), ("anchor.a1", "text.n1"));
    }

    #[test]
    fn test_opposite_node_of_self_link() {
        let link = Link::new("anchor.a1", "text.n1", "anchor.a2", "text.n1");

        assert!(link.is_self_link());
        assert_eq!(link.opposite_node_of("text.n1"), "text.n1");
    }

    #[test]
    fn test_connects_pair_is_unordered() {
        let link = cross_link();

        assert!(link.connects_pair("anchor.a1", "anchor.a2"));
        assert!(link.connects_pair("anchor.a2", "anchor.a1"));
        assert!(!link.connects_pair("anchor.a1", "anchor.a3"));
    }

    #[test]
    fn test_link_serialization() {
        let link = Link {
            link_id: "link.l1".to_string(),
            anchor1_id: "anchor.a1".to_string(),
            anchor1_node_id: "text.n1".to_string(),
            anchor2_id: "anchor.a2".to_string(),
            anchor2_node_id: "text.n2".to_string(),
        };
        let json = serde_json::to_value(&link).unwrap();

        assert_eq!(json["linkId"], "link.l1");
        assert_eq!(json["anchor1NodeId"], "text.n1");
        assert_eq!(json["anchor2Id"], "anchor.a2");
    }
}
