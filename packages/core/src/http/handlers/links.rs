//! Link route handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::http::{AppState, ServiceResponse};
use crate::models::Link;
use crate::store::LinkStore;

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub link: Link,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetByAnchorRequest {
    pub anchor_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetByAnchorsRequest {
    pub anchor_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLinksRequest {
    pub link_ids: Vec<String>,
}

pub async fn create_link(
    State(state): State<AppState>,
    Json(req): Json<CreateLinkRequest>,
) -> Json<ServiceResponse<Link>> {
    Json(ServiceResponse::from_result(
        state.links.create_link(req.link).await,
    ))
}

pub async fn get_link(
    State(state): State<AppState>,
    Path(link_id): Path<String>,
) -> Json<ServiceResponse<Link>> {
    Json(ServiceResponse::from_result(
        state.links.get_link(&link_id).await,
    ))
}

pub async fn get_links_by_anchor_id(
    State(state): State<AppState>,
    Json(req): Json<GetByAnchorRequest>,
) -> Json<ServiceResponse<Vec<Link>>> {
    Json(ServiceResponse::from_result(
        state.links.get_links_by_anchor_id(&req.anchor_id).await,
    ))
}

pub async fn get_links_by_anchor_ids(
    State(state): State<AppState>,
    Json(req): Json<GetByAnchorsRequest>,
) -> Json<ServiceResponse<Vec<Link>>> {
    Json(ServiceResponse::from_result(
        state.links.get_links_by_anchor_ids(&req.anchor_ids).await,
    ))
}

pub async fn delete_links(
    State(state): State<AppState>,
    Json(req): Json<DeleteLinksRequest>,
) -> Json<ServiceResponse<usize>> {
    Json(ServiceResponse::from_result(
        state.links.delete_links(&req.link_ids).await,
    ))
}
