//! Anchor Synchronization - Extent Reconciliation on Save
//!
//! When the user saves an edited document, persisted anchors must be brought
//! back in line with what is actually on screen:
//!
//! 1. **Extent recomputation** - walk the document once; every text run
//!    carrying a link mark re-derives its anchor's extent from the run's
//!    current text and position. Changed extents are written back.
//! 2. **Orphan detection** - anchors stored for the node but no longer
//!    represented by any mark lost their backing text and are deleted.
//! 3. **Cascade** - every link touching an orphan is deleted. If such a link
//!    connects two anchors on the *same* node, the surviving endpoint is
//!    orphaned too: its editor mark is cleared (so no dangling clickable
//!    span remains) and its record joins the delete set.
//! 4. **Commit** - links are deleted before anchors (a link must never
//!    reference a missing anchor), then the node's serialized content is
//!    persisted.
//! 5. **Refresh** - the three generation counters are bumped so open views
//!    re-fetch.
//!
//! The commit is not transactional. Cascade steps are
//! best-effort: a failed link fetch or delete is logged, the remaining steps
//! still run, and the call reports an aggregate [`ServiceError::PartialSave`]
//! at the end. Nothing is rolled back.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::document::Editor;
use crate::models::{Extent, NodeUpdate, TextExtent};
use crate::services::ServiceError;
use crate::store::{AnchorStore, LinkStore, NodeStore, RefreshSignals};

/// What a save actually changed in the stores
///
/// A save with no intervening edit reports all zeros: no extent differs and
/// the orphan set is empty, so the second save issues no anchor or link
/// mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub extents_updated: usize,
    pub anchors_deleted: usize,
    pub links_deleted: usize,
}

/// Reconciles persisted anchors with the live document on save
pub struct AnchorSyncService {
    nodes: Arc<dyn NodeStore>,
    anchors: Arc<dyn AnchorStore>,
    links: Arc<dyn LinkStore>,
    signals: RefreshSignals,
}

impl AnchorSyncService {
    pub fn new(
        nodes: Arc<dyn NodeStore>,
        anchors: Arc<dyn AnchorStore>,
        links: Arc<dyn LinkStore>,
        signals: RefreshSignals,
    ) -> Self {
        Self {
            nodes,
            anchors,
            links,
            signals,
        }
    }

    /// Save the edited document for `node_id`: reconcile anchor extents,
    /// delete orphaned anchors and their links, persist the new content,
    /// and signal the refresh channels.
    ///
    /// # Errors
    ///
    /// Failures in the recomputation pass or the content update abort the
    /// save. Failures inside the cascade do not: they are logged, collected,
    /// and surfaced as [`ServiceError::PartialSave`] after the remaining
    /// steps ran. Partial effects stay persisted either way.
    pub async fn save_content<E: Editor>(
        &self,
        editor: &mut E,
        node_id: &str,
    ) -> Result<SaveReport, ServiceError> {
        let stored = self.anchors.get_anchors_by_node_id(node_id).await?;
        let stored_ids: Vec<String> = stored.iter().map(|a| a.anchor_id.clone()).collect();

        let (present_ids, extents_updated) = self.recompute_extents(editor).await?;

        let orphans: Vec<String> = stored_ids
            .into_iter()
            .filter(|id| !present_ids.contains(id))
            .collect();

        let cascade = self.expand_cascade(editor, orphans).await;
        let mut failures = cascade.failures;

        let mut links_deleted = 0;
        if !cascade.link_ids.is_empty() {
            match self.links.delete_links(&cascade.link_ids).await {
                Ok(count) => links_deleted = count,
                Err(err) => {
                    warn!("failed to delete links for orphaned anchors: {}", err);
                    failures.push(format!("deleting links: {}", err));
                }
            }
        }

        // Best-effort: attempted even if the link delete failed above
        let mut anchors_deleted = 0;
        if !cascade.orphan_ids.is_empty() {
            match self.anchors.delete_anchors(&cascade.orphan_ids).await {
                Ok(count) => anchors_deleted = count,
                Err(err) => {
                    warn!("failed to delete orphaned anchors: {}", err);
                    failures.push(format!("deleting anchors: {}", err));
                }
            }
        }

        self.nodes
            .update_node(node_id, NodeUpdate::new().with_content(editor.to_html()))
            .await?;

        self.signals.bump_anchor_list();
        self.signals.bump_link_list();
        self.signals.bump_content();

        let report = SaveReport {
            extents_updated,
            anchors_deleted,
            links_deleted,
        };
        debug!(
            "saved {}: {} extents updated, {} anchors deleted, {} links deleted",
            node_id, report.extents_updated, report.anchors_deleted, report.links_deleted
        );

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(ServiceError::partial_save(failures))
        }
    }

    /// Pass 1: walk the document and push every marked anchor's extent back
    /// in line with its run. Returns the set of anchor ids present in the
    /// editor and the number of extent updates issued.
    async fn recompute_extents<E: Editor>(
        &self,
        editor: &E,
    ) -> Result<(HashSet<String>, usize), ServiceError> {
        let runs: Vec<_> = editor.walk().collect();

        let mut present = HashSet::new();
        let mut updated = 0;
        for run in runs {
            let Some(mark) = run.link else { continue };
            if mark.target.is_empty() {
                continue;
            }
            present.insert(mark.target.clone());

            let anchor = match self.anchors.get_anchor(&mark.target).await {
                Ok(anchor) => anchor,
                Err(err) if err.is_not_found() => {
                    warn!("editor mark references unknown anchor {}", mark.target);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            // Whole-node (image) anchors carry no text extent to recompute
            let Some(old) = anchor.text_extent() else {
                continue;
            };

            let new = TextExtent::covering(run.text, run.position - 1);
            if *old != new {
                self.anchors
                    .update_extent(&anchor.anchor_id, Some(Extent::Text(new)))
                    .await?;
                updated += 1;
            }
        }
        Ok((present, updated))
    }

    /// Pass 3: widen the orphan set across same-node links and collect every
    /// link touching it. Clears the surviving endpoint's editor mark before
    /// its record is scheduled for deletion.
    async fn expand_cascade<E: Editor>(&self, editor: &mut E, orphans: Vec<String>) -> Cascade {
        let mut scheduled: HashSet<String> = orphans.iter().cloned().collect();
        let mut queue: VecDeque<String> = orphans.iter().cloned().collect();
        let mut cascade = Cascade {
            orphan_ids: orphans,
            ..Cascade::default()
        };
        let mut seen_links = HashSet::new();

        while let Some(orphan_id) = queue.pop_front() {
            let links = match self.links.get_links_by_anchor_id(&orphan_id).await {
                Ok(links) => links,
                Err(err) => {
                    warn!("failed to fetch links for anchor {}: {}", orphan_id, err);
                    cascade
                        .failures
                        .push(format!("fetching links for {}: {}", orphan_id, err));
                    continue;
                }
            };

            for link in links {
                if seen_links.insert(link.link_id.clone()) {
                    cascade.link_ids.push(link.link_id.clone());
                }
                if !link.is_self_link() {
                    continue;
                }

                let (other_id, _) = link.opposite_of(&orphan_id);
                if scheduled.contains(other_id) {
                    continue;
                }
                let other_id = other_id.to_string();

                // The paired side loses its mark before its record goes away,
                // otherwise the UI keeps a dangling clickable span
                match self.anchors.get_anchor(&other_id).await {
                    Ok(other) => {
                        if let Some(extent) = other.text_extent() {
                            editor.unset_link_mark(
                                extent.start_character + 1,
                                extent.end_character + 1,
                            );
                        }
                    }
                    Err(err) if err.is_not_found() => {
                        warn!("paired anchor {} already missing", other_id);
                    }
                    Err(err) => {
                        warn!("failed to fetch paired anchor {}: {}", other_id, err);
                        cascade
                            .failures
                            .push(format!("fetching paired anchor {}: {}", other_id, err));
                    }
                }

                scheduled.insert(other_id.clone());
                cascade.orphan_ids.push(other_id.clone());
                queue.push_back(other_id);
            }
        }
        cascade
    }
}

#[derive(Debug, Default)]
struct Cascade {
    orphan_ids: Vec<String>,
    link_ids: Vec<String>,
    failures: Vec<String>,
}
