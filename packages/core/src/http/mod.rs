//! HTTP Gateway
//!
//! JSON gateway over the node/anchor/link stores, one route per store
//! operation. Every endpoint answers HTTP 200 with the
//! [`ServiceResponse`] envelope; domain failures (not-found, validation,
//! conflicts) ride the failure branch of the envelope rather than an error
//! status, so clients branch on `success`.
//!
//! `GET /refresh/stream` exposes the three refresh generation counters as
//! server-sent events for views that re-fetch on change.

pub mod handlers;
pub mod response;

use std::convert::Infallible;
use std::sync::Arc;

use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post, put};
use axum::{extract::State, Router};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tower_http::trace::TraceLayer;

use crate::store::{AnchorStore, LinkStore, MemoryStore, NodeStore, RefreshSignals};

pub use response::ServiceResponse;

/// Store handles and refresh signals shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub nodes: Arc<dyn NodeStore>,
    pub anchors: Arc<dyn AnchorStore>,
    pub links: Arc<dyn LinkStore>,
    pub signals: RefreshSignals,
}

impl AppState {
    /// State backed by a single shared [`MemoryStore`]
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            nodes: store.clone(),
            anchors: store.clone(),
            links: store,
            signals: RefreshSignals::new(),
        }
    }
}

/// Build the gateway router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Nodes
        .route("/node/create", post(handlers::nodes::create_node))
        .route("/node/get/:nodeId", get(handlers::nodes::get_node))
        .route("/node/getNodesById", post(handlers::nodes::get_nodes_by_id))
        .route("/node/search", post(handlers::nodes::search_nodes))
        .route(
            "/node/:nodeId",
            put(handlers::nodes::update_node).delete(handlers::nodes::delete_node),
        )
        // Anchors
        .route("/anchor/create", post(handlers::anchors::create_anchor))
        .route("/anchor/get/:anchorId", get(handlers::anchors::get_anchor))
        .route(
            "/anchor/getByNode/:nodeId",
            get(handlers::anchors::get_anchors_by_node),
        )
        .route(
            "/anchor/updateExtent/:anchorId",
            put(handlers::anchors::update_extent),
        )
        .route("/anchor/delete", post(handlers::anchors::delete_anchors))
        // Links
        .route("/link/create", post(handlers::links::create_link))
        .route("/link/get/:linkId", get(handlers::links::get_link))
        .route(
            "/link/getByAnchorId",
            post(handlers::links::get_links_by_anchor_id),
        )
        .route(
            "/link/getByAnchorIds",
            post(handlers::links::get_links_by_anchor_ids),
        )
        .route("/link/delete", post(handlers::links::delete_links))
        // Refresh channels
        .route("/refresh/stream", get(refresh_stream))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Server-sent events over the three refresh generation counters
async fn refresh_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let anchors = WatchStream::new(state.signals.subscribe_anchor_list())
        .map(|generation| channel_event("anchorList", generation));
    let links = WatchStream::new(state.signals.subscribe_link_list())
        .map(|generation| channel_event("linkList", generation));
    let content = WatchStream::new(state.signals.subscribe_content())
        .map(|generation| channel_event("content", generation));

    Sse::new(anchors.merge(links).merge(content)).keep_alive(KeepAlive::default())
}

fn channel_event(channel: &str, generation: u64) -> Result<Event, Infallible> {
    Ok(Event::default()
        .event(channel)
        .data(generation.to_string()))
}
