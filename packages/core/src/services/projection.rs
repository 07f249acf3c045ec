//! Anchor Mark Projection on Load
//!
//! When a node's content is loaded into a fresh editor, its persisted
//! anchors come back as inline link marks at their stored offsets. Each
//! mark's href points at the node on the other side of the anchor's link so
//! a click navigates there.
//!
//! An anchor participates in at most one link in this model. When more than
//! one exists the first in store order is used; see DESIGN.md for the open
//! question around richer multi-link semantics. Anchors with no link yet
//! (marked but never completed) project nothing.

use std::sync::Arc;

use tracing::debug;

use crate::document::{Editor, LinkMark};
use crate::services::ServiceError;
use crate::store::{AnchorStore, LinkStore};

/// What a projection pass applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionReport {
    pub marks_applied: usize,
    pub skipped_linkless: usize,
}

/// Re-applies persisted anchors as editor marks on node load
pub struct MarkProjectionService {
    anchors: Arc<dyn AnchorStore>,
    links: Arc<dyn LinkStore>,
}

impl MarkProjectionService {
    pub fn new(anchors: Arc<dyn AnchorStore>, links: Arc<dyn LinkStore>) -> Self {
        Self { anchors, links }
    }

    /// Paint every stored text anchor of `node_id` into `editor`.
    ///
    /// Marks cover the position range `[start + 1, end + 1]`, the inverse of
    /// the `position - 1` offset convention used on save. The mark's href is
    /// `/` + the opposing node id and its target is the anchor id.
    ///
    /// # Errors
    ///
    /// Anchor or link fetch failures abort the pass. Marks applied before
    /// the failure remain on the editor; nothing is rolled back.
    pub async fn project<E: Editor>(
        &self,
        editor: &mut E,
        node_id: &str,
    ) -> Result<ProjectionReport, ServiceError> {
        let anchors = self.anchors.get_anchors_by_node_id(node_id).await?;

        let mut report = ProjectionReport::default();
        for anchor in anchors {
            // Whole-node (image) anchors have no sub-range to mark
            let Some(extent) = anchor.text_extent() else {
                continue;
            };

            let links = self.links.get_links_by_anchor_id(&anchor.anchor_id).await?;
            let Some(link) = links.first() else {
                // Freshly created, link not completed yet
                report.skipped_linkless += 1;
                continue;
            };
            if links.len() > 1 {
                debug!(
                    "anchor {} has {} links, using the first",
                    anchor.anchor_id,
                    links.len()
                );
            }

            let opposing = link.opposite_node_of(node_id);
            editor.set_link_mark(
                extent.start_character + 1,
                extent.end_character + 1,
                LinkMark::new(format!("/{}", opposing), anchor.anchor_id.clone()),
            );
            report.marks_applied += 1;
        }
        Ok(report)
    }
}
