//! Refresh Signals
//!
//! After a reconciliation commit the UI needs to re-fetch anchors, links,
//! and node content. [`RefreshSignals`] models the three refresh channels as
//! independent generation counters over `tokio::sync::watch`: writers bump,
//! readers observe the change and re-fetch. No ordering is guaranteed across
//! the three counters beyond "bumped after commit".

use std::sync::Arc;

use tokio::sync::watch;

/// Three independent generation counters: anchor list, link list, content
#[derive(Debug, Clone)]
pub struct RefreshSignals {
    anchor_list: Arc<watch::Sender<u64>>,
    link_list: Arc<watch::Sender<u64>>,
    content: Arc<watch::Sender<u64>>,
}

impl RefreshSignals {
    pub fn new() -> Self {
        let (anchor_list, _) = watch::channel(0);
        let (link_list, _) = watch::channel(0);
        let (content, _) = watch::channel(0);
        Self {
            anchor_list: Arc::new(anchor_list),
            link_list: Arc::new(link_list),
            content: Arc::new(content),
        }
    }

    pub fn bump_anchor_list(&self) {
        self.anchor_list.send_modify(|generation| *generation += 1);
    }

    pub fn bump_link_list(&self) {
        self.link_list.send_modify(|generation| *generation += 1);
    }

    pub fn bump_content(&self) {
        self.content.send_modify(|generation| *generation += 1);
    }

    pub fn subscribe_anchor_list(&self) -> watch::Receiver<u64> {
        self.anchor_list.subscribe()
    }

    pub fn subscribe_link_list(&self) -> watch::Receiver<u64> {
        self.link_list.subscribe()
    }

    pub fn subscribe_content(&self) -> watch::Receiver<u64> {
        self.content.subscribe()
    }

    /// Current anchor-list generation
    pub fn anchor_list_generation(&self) -> u64 {
        *self.anchor_list.borrow()
    }

    /// Current link-list generation
    pub fn link_list_generation(&self) -> u64 {
        *self.link_list.borrow()
    }

    /// Current content generation
    pub fn content_generation(&self) -> u64 {
        *self.content.borrow()
    }
}

impl Default for RefreshSignals {
    fn default() -> Self {
        Self::new()
    }
}
