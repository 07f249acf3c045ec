//! Node route handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::http::{AppState, ServiceResponse};
use crate::models::{Node, NodeUpdate};
use crate::store::{DeleteResult, NodeStore};

#[derive(Debug, Deserialize)]
pub struct CreateNodeRequest {
    pub node: Node,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNodesRequest {
    pub node_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

pub async fn create_node(
    State(state): State<AppState>,
    Json(req): Json<CreateNodeRequest>,
) -> Json<ServiceResponse<Node>> {
    Json(ServiceResponse::from_result(
        state.nodes.create_node(req.node).await,
    ))
}

pub async fn get_node(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
) -> Json<ServiceResponse<Node>> {
    Json(ServiceResponse::from_result(
        state.nodes.get_node(&node_id).await,
    ))
}

pub async fn get_nodes_by_id(
    State(state): State<AppState>,
    Json(req): Json<GetNodesRequest>,
) -> Json<ServiceResponse<Vec<Node>>> {
    Json(ServiceResponse::from_result(
        state.nodes.get_nodes(&req.node_ids).await,
    ))
}

pub async fn update_node(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
    Json(update): Json<NodeUpdate>,
) -> Json<ServiceResponse<Node>> {
    Json(ServiceResponse::from_result(
        state.nodes.update_node(&node_id, update).await,
    ))
}

pub async fn delete_node(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
) -> Json<ServiceResponse<DeleteResult>> {
    Json(ServiceResponse::from_result(
        state.nodes.delete_node(&node_id).await,
    ))
}

pub async fn search_nodes(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<ServiceResponse<Vec<Node>>> {
    Json(ServiceResponse::from_result(
        state.nodes.search_nodes(&req.query).await,
    ))
}
