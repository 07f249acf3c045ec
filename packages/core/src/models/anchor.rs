//! Anchors
//!
//! An anchor marks a region of one node's content as linkable: a character
//! range of a text node, or a whole image node. Anchors are owned by exactly
//! one node and connected pairwise by links.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Extent, ValidationError};

/// A linkable region of a node
///
/// Created when the user marks a selection (or an image) as linkable.
/// The extent is `None` for whole-image anchors. After creation the extent
/// is mutated only by reconciliation, which keeps it in line with edits to
/// the underlying text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    pub anchor_id: String,
    pub node_id: String,
    pub extent: Option<Extent>,
}

impl Anchor {
    /// Create an anchor on `node_id` with a freshly generated id
    pub fn new(node_id: impl Into<String>, extent: Option<Extent>) -> Self {
        Self {
            anchor_id: make_anchor_id(),
            node_id: node_id.into(),
            extent,
        }
    }

    /// The text extent, if this anchor has one
    pub fn text_extent(&self) -> Option<&crate::models::TextExtent> {
        self.extent.as_ref().and_then(Extent::as_text)
    }

    /// Validate ids and the extent invariant
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.anchor_id.is_empty() {
            return Err(ValidationError::MissingField("anchorId".to_string()));
        }
        if self.node_id.is_empty() {
            return Err(ValidationError::MissingField("nodeId".to_string()));
        }
        if let Some(extent) = &self.extent {
            extent.validate()?;
        }
        Ok(())
    }
}

/// Generate an anchor id, e.g. `anchor.7be0…`
pub fn make_anchor_id() -> String {
    format!("anchor.{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TextExtent;

    #[test]
    fn test_anchor_creation() {
        let anchor = Anchor::new("text.n1", Some(Extent::Text(TextExtent::covering("hi", 0))));

        assert!(anchor.anchor_id.starts_with("anchor."));
        assert_eq!(anchor.node_id, "text.n1");
        assert_eq!(anchor.text_extent().unwrap().text, "hi");
        assert!(anchor.validate().is_ok());
    }

    #[test]
    fn test_whole_image_anchor_has_no_extent() {
        let anchor = Anchor::new("image.n2", None);

        assert!(anchor.extent.is_none());
        assert!(anchor.text_extent().is_none());
        assert!(anchor.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_extent() {
        let mut anchor = Anchor::new("text.n1", Some(Extent::Text(TextExtent::covering("hi", 0))));
        if let Some(Extent::Text(extent)) = &mut anchor.extent {
            extent.end_character = 99;
        }

        assert!(matches!(
            anchor.validate(),
            Err(ValidationError::InvalidExtent(_))
        ));
    }

    #[test]
    fn test_anchor_serialization() {
        let anchor = Anchor {
            anchor_id: "anchor.a1".to_string(),
            node_id: "text.n1".to_string(),
            extent: None,
        };
        let json = serde_json::to_value(&anchor).unwrap();

        assert_eq!(json["anchorId"], "anchor.a1");
        assert_eq!(json["nodeId"], "text.n1");
        assert!(json["extent"].is_null());
    }
}
