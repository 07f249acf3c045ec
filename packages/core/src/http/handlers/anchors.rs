//! Anchor route handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::http::{AppState, ServiceResponse};
use crate::models::{Anchor, Extent};
use crate::store::AnchorStore;

#[derive(Debug, Deserialize)]
pub struct CreateAnchorRequest {
    pub anchor: Anchor,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExtentRequest {
    pub extent: Option<Extent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAnchorsRequest {
    pub anchor_ids: Vec<String>,
}

pub async fn create_anchor(
    State(state): State<AppState>,
    Json(req): Json<CreateAnchorRequest>,
) -> Json<ServiceResponse<Anchor>> {
    Json(ServiceResponse::from_result(
        state.anchors.create_anchor(req.anchor).await,
    ))
}

pub async fn get_anchor(
    State(state): State<AppState>,
    Path(anchor_id): Path<String>,
) -> Json<ServiceResponse<Anchor>> {
    Json(ServiceResponse::from_result(
        state.anchors.get_anchor(&anchor_id).await,
    ))
}

pub async fn get_anchors_by_node(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
) -> Json<ServiceResponse<Vec<Anchor>>> {
    Json(ServiceResponse::from_result(
        state.anchors.get_anchors_by_node_id(&node_id).await,
    ))
}

pub async fn update_extent(
    State(state): State<AppState>,
    Path(anchor_id): Path<String>,
    Json(req): Json<UpdateExtentRequest>,
) -> Json<ServiceResponse<Anchor>> {
    Json(ServiceResponse::from_result(
        state.anchors.update_extent(&anchor_id, req.extent).await,
    ))
}

pub async fn delete_anchors(
    State(state): State<AppState>,
    Json(req): Json<DeleteAnchorsRequest>,
) -> Json<ServiceResponse<usize>> {
    Json(ServiceResponse::from_result(
        state.anchors.delete_anchors(&req.anchor_ids).await,
    ))
}
