//! Integration tests for extent reconciliation on save
//!
//! Tests cover:
//! - The concrete delete-and-retype scenario
//! - Extent recomputation after edits that shift offsets
//! - Orphan detection and the same-node link cascade
//! - Independence of cross-node link endpoints
//! - Idempotent saves and refresh signaling
//! - Best-effort cascade semantics under injected store failures
//! - The inherited concurrent-save race

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use myhypermedia_core::document::{Editor, EditorDoc, LinkMark};
use myhypermedia_core::models::{
    Anchor, Extent, Link, Node, NodePath, NodeVariant, TextExtent,
};
use myhypermedia_core::services::{AnchorSyncService, ServiceError};
use myhypermedia_core::store::{
    AnchorStore, LinkStore, MemoryStore, NodeStore, RefreshSignals, StoreError,
};

/// Test helper: a store, its refresh signals, and the sync service over them
fn create_test_env() -> (Arc<MemoryStore>, RefreshSignals, AnchorSyncService) {
    let store = Arc::new(MemoryStore::new());
    let signals = RefreshSignals::new();
    let service = AnchorSyncService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        signals.clone(),
    );
    (store, signals, service)
}

fn text_node(node_id: &str, title: &str, content: &str) -> Node {
    Node {
        node_id: node_id.to_string(),
        title: title.to_string(),
        file_path: NodePath::new(vec![node_id.to_string()], Vec::new()),
        date_created: None,
        collaborators: Vec::new(),
        variant: NodeVariant::Text {
            content: content.to_string(),
        },
    }
}

fn text_anchor(anchor_id: &str, node_id: &str, text: &str, start: usize) -> Anchor {
    Anchor {
        anchor_id: anchor_id.to_string(),
        node_id: node_id.to_string(),
        extent: Some(Extent::Text(TextExtent::covering(text, start))),
    }
}

fn link_with_id(link_id: &str, a1: &str, n1: &str, a2: &str, n2: &str) -> Link {
    let mut link = Link::new(a1, n1, a2, n2);
    link.link_id = link_id.to_string();
    link
}

/// Seed the cross-node fixture: node R "<p>Hello world</p>" with anchor a1
/// over "world", linked to anchor a2 on node S.
async fn seed_hello_world(store: &MemoryStore) -> Result<()> {
    store
        .create_node(text_node("text.r", "R", "<p>Hello world</p>"))
        .await?;
    store
        .create_node(text_node("text.s", "S", "<p>elsewhere</p>"))
        .await?;
    store
        .create_anchor(text_anchor("anchor.a1", "text.r", "world", 6))
        .await?;
    store
        .create_anchor(text_anchor("anchor.a2", "text.s", "elsewhere", 0))
        .await?;
    store
        .create_link(link_with_id(
            "link.l1", "anchor.a1", "text.r", "anchor.a2", "text.s",
        ))
        .await?;
    Ok(())
}

/// An editor over R's content with a1's mark painted in
fn editor_with_a1_mark() -> EditorDoc {
    let mut editor = EditorDoc::from_html("<p>Hello world</p>");
    editor.set_link_mark(7, 11, LinkMark::new("/text.s", "anchor.a1"));
    editor
}

#[tokio::test]
async fn test_delete_and_retype_scenario() -> Result<()> {
    let (store, _signals, service) = create_test_env();
    seed_hello_world(&store).await?;

    // The user deleted "world", typed "there", and saved: no mark covers the
    // new text unless they explicitly re-mark it
    let mut editor = EditorDoc::from_html("<p>Hello there</p>");
    let report = service.save_content(&mut editor, "text.r").await?;

    assert_eq!(report.anchors_deleted, 1);
    assert_eq!(report.links_deleted, 1);
    assert_eq!(report.extents_updated, 0);

    // a1 and l1 are gone, the content is persisted, a2 is untouched
    assert!(store.get_anchor("anchor.a1").await.unwrap_err().is_not_found());
    assert!(store.get_link("link.l1").await.unwrap_err().is_not_found());
    let node = store.get_node("text.r").await?;
    assert_eq!(node.content(), "<p>Hello there</p>");
    assert!(store.get_anchor("anchor.a2").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn test_projection_then_save_issues_no_updates() -> Result<()> {
    let (store, _signals, service) = create_test_env();
    seed_hello_world(&store).await?;

    // Round trip: a projected mark reconciled with no edit in between must
    // reproduce the stored extent exactly
    let mut editor = editor_with_a1_mark();
    let report = service.save_content(&mut editor, "text.r").await?;

    assert_eq!(report.extents_updated, 0);
    assert_eq!(report.anchors_deleted, 0);
    assert_eq!(report.links_deleted, 0);

    let anchor = store.get_anchor("anchor.a1").await?;
    let extent = anchor.text_extent().unwrap();
    assert_eq!(extent.text, "world");
    assert_eq!(extent.start_character, 6);
    assert_eq!(extent.end_character, 10);
    Ok(())
}

#[tokio::test]
async fn test_offset_invariant_after_edit_shifts_extent() -> Result<()> {
    let (store, _signals, service) = create_test_env();
    seed_hello_world(&store).await?;

    // The user typed "Hey! " at the start; the mark rode along in the editor
    let mut editor = EditorDoc::from_html("<p>Hey! Hello world</p>");
    editor.set_link_mark(12, 16, LinkMark::new("/text.s", "anchor.a1"));

    let report = service.save_content(&mut editor, "text.r").await?;
    assert_eq!(report.extents_updated, 1);

    let anchor = store.get_anchor("anchor.a1").await?;
    let extent = anchor.text_extent().unwrap();
    assert_eq!(extent.text, "world");
    assert_eq!(extent.start_character, 11);
    assert_eq!(extent.end_character, 15);
    // The invariant: bounds agree with the text, and the text is the live
    // substring at those positions
    assert_eq!(
        extent.end_character - extent.start_character + 1,
        extent.text.chars().count()
    );
    assert_eq!(
        editor.text_in_positions(extent.start_character + 1, extent.end_character + 1),
        extent.text
    );
    Ok(())
}

#[tokio::test]
async fn test_same_node_cascade_deletes_both_sides() -> Result<()> {
    let (store, _signals, service) = create_test_env();
    store
        .create_node(text_node("text.n", "N", "<p>one two</p>"))
        .await?;
    store
        .create_anchor(text_anchor("anchor.a1", "text.n", "one", 0))
        .await?;
    store
        .create_anchor(text_anchor("anchor.a2", "text.n", "two", 4))
        .await?;
    store
        .create_link(link_with_id(
            "link.l1", "anchor.a1", "text.n", "anchor.a2", "text.n",
        ))
        .await?;

    // a1's mark was removed in the editor; a2's mark is still there
    let mut editor = EditorDoc::from_html("<p>one two</p>");
    editor.set_link_mark(5, 7, LinkMark::new("/text.n", "anchor.a2"));

    let report = service.save_content(&mut editor, "text.n").await?;

    // Deleting one side of a same-node link severs the pair: both anchors
    // and the link are gone, and nothing dangling remains
    assert_eq!(report.anchors_deleted, 2);
    assert_eq!(report.links_deleted, 1);
    assert_eq!(store.anchor_count().await, 0);
    assert_eq!(store.link_count().await, 0);
    assert!(store
        .get_links_by_anchor_id("anchor.a1")
        .await?
        .is_empty());
    assert!(store
        .get_links_by_anchor_id("anchor.a2")
        .await?
        .is_empty());

    // The paired side's editor mark was cleared before its record went away
    assert!(editor.walk().all(|run| run.link.is_none()));
    Ok(())
}

#[tokio::test]
async fn test_cross_node_link_leaves_far_anchor_alone() -> Result<()> {
    let (store, _signals, service) = create_test_env();
    seed_hello_world(&store).await?;

    let mut editor = EditorDoc::from_html("<p>Hello</p>");
    let report = service.save_content(&mut editor, "text.r").await?;

    assert_eq!(report.anchors_deleted, 1);
    assert_eq!(report.links_deleted, 1);

    // a2 lives on another node and survives, now linkless
    let far = store.get_anchor("anchor.a2").await?;
    assert_eq!(far.node_id, "text.s");
    assert!(store.get_links_by_anchor_id("anchor.a2").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_idempotent_save() -> Result<()> {
    let (store, _signals, service) = create_test_env();
    seed_hello_world(&store).await?;

    let mut editor = editor_with_a1_mark();
    service.save_content(&mut editor, "text.r").await?;

    let anchors_before = store.anchor_count().await;
    let links_before = store.link_count().await;
    let content_before = store.get_node("text.r").await?.content().to_string();

    // No intervening edit: the second save mutates nothing
    let report = service.save_content(&mut editor, "text.r").await?;
    assert_eq!(report.extents_updated, 0);
    assert_eq!(report.anchors_deleted, 0);
    assert_eq!(report.links_deleted, 0);
    assert_eq!(store.anchor_count().await, anchors_before);
    assert_eq!(store.link_count().await, links_before);
    assert_eq!(store.get_node("text.r").await?.content(), content_before);
    Ok(())
}

#[tokio::test]
async fn test_refresh_counters_bump_after_commit() -> Result<()> {
    let (store, signals, service) = create_test_env();
    seed_hello_world(&store).await?;

    assert_eq!(signals.anchor_list_generation(), 0);

    let mut editor = editor_with_a1_mark();
    service.save_content(&mut editor, "text.r").await?;

    assert_eq!(signals.anchor_list_generation(), 1);
    assert_eq!(signals.link_list_generation(), 1);
    assert_eq!(signals.content_generation(), 1);
    Ok(())
}

#[tokio::test]
async fn test_image_anchor_extent_left_untouched() -> Result<()> {
    let (store, _signals, service) = create_test_env();
    store
        .create_node(text_node("text.n", "N", "<p>pic here</p>"))
        .await?;
    let whole = Anchor {
        anchor_id: "anchor.img".to_string(),
        node_id: "text.n".to_string(),
        extent: None,
    };
    store.create_anchor(whole).await?;

    // A mark referencing a whole-node anchor keeps it alive but never
    // rewrites its (absent) text extent
    let mut editor = EditorDoc::from_html("<p>pic here</p>");
    editor.set_link_mark(1, 3, LinkMark::new("/image.x", "anchor.img"));

    let report = service.save_content(&mut editor, "text.n").await?;
    assert_eq!(report.extents_updated, 0);
    assert_eq!(report.anchors_deleted, 0);
    assert!(store.get_anchor("anchor.img").await?.extent.is_none());
    Ok(())
}

/// Link store double whose batch delete always fails
struct FailingDeleteLinkStore {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl LinkStore for FailingDeleteLinkStore {
    async fn create_link(&self, link: Link) -> Result<Link, StoreError> {
        self.inner.create_link(link).await
    }

    async fn get_link(&self, link_id: &str) -> Result<Link, StoreError> {
        self.inner.get_link(link_id).await
    }

    async fn get_links_by_anchor_id(&self, anchor_id: &str) -> Result<Vec<Link>, StoreError> {
        self.inner.get_links_by_anchor_id(anchor_id).await
    }

    async fn get_links_by_anchor_ids(
        &self,
        anchor_ids: &[String],
    ) -> Result<Vec<Link>, StoreError> {
        self.inner.get_links_by_anchor_ids(anchor_ids).await
    }

    async fn delete_links(&self, _link_ids: &[String]) -> Result<usize, StoreError> {
        Err(StoreError::backend("injected link delete failure"))
    }
}

#[tokio::test]
async fn test_failed_link_delete_still_deletes_anchors() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let signals = RefreshSignals::new();
    let service = AnchorSyncService::new(
        store.clone(),
        store.clone(),
        Arc::new(FailingDeleteLinkStore {
            inner: store.clone(),
        }),
        signals.clone(),
    );
    seed_hello_world(&store).await?;

    let mut editor = EditorDoc::from_html("<p>Hello there</p>");
    let err = service
        .save_content(&mut editor, "text.r")
        .await
        .unwrap_err();

    // The cascade is best-effort: the link delete failed, the anchor delete
    // and content update still ran, and the failure surfaces as an aggregate
    // error without any rollback
    assert!(matches!(err, ServiceError::PartialSave { .. }));
    assert!(store.get_anchor("anchor.a1").await.unwrap_err().is_not_found());
    assert!(store.get_link("link.l1").await.is_ok());
    assert_eq!(
        store.get_node("text.r").await?.content(),
        "<p>Hello there</p>"
    );
    assert_eq!(signals.content_generation(), 1);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_saves_race_unguarded() -> Result<()> {
    // Two editors of the same node race with no locking, versioning, or
    // optimistic-concurrency check: last write wins silently. This is an
    // inherited limitation, documented here rather than fixed.
    let (store, _signals, service) = create_test_env();
    store
        .create_node(text_node("text.n", "N", "<p>base</p>"))
        .await?;

    let mut editor_one = EditorDoc::from_html("<p>first writer</p>");
    let mut editor_two = EditorDoc::from_html("<p>second writer</p>");

    service.save_content(&mut editor_one, "text.n").await?;
    service.save_content(&mut editor_two, "text.n").await?;

    assert_eq!(
        store.get_node("text.n").await?.content(),
        "<p>second writer</p>"
    );
    Ok(())
}
