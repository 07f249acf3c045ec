//! Node Data Structures
//!
//! This module defines the `Node` struct and related types for MyHypermedia's
//! document tree. Every document a user can open in the dashboard is a node:
//! text documents, images, folders, and recipes.
//!
//! # Architecture
//!
//! - **Closed variant type**: node-type-specific data lives in [`NodeVariant`],
//!   matched exhaustively. There is no downcasting and no stringly-typed
//!   `type` field switch.
//! - **Hierarchical paths**: each node carries a [`NodePath`] listing its
//!   ancestor ids ending in its own id, plus an explicit child id list.
//! - **Partial updates**: mutations go through [`NodeUpdate`], a patch struct
//!   where only the provided fields change.
//!
//! # Examples
//!
//! ```rust
//! use myhypermedia_core::models::{Node, NodeVariant};
//!
//! let node = Node::new(
//!     NodeVariant::Text {
//!         content: "<p>Hello world</p>".to_string(),
//!     },
//!     "My first note".to_string(),
//!     &[],
//! );
//! assert!(node.validate().is_ok());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for model types
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid node type: {0}")]
    InvalidNodeType(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("Invalid update: {0}")]
    InvalidUpdate(String),
}

/// The supported node types, as stored in the `type` field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Text,
    Image,
    Folder,
    Recipe,
}

impl NodeType {
    /// Wire name of this type, also used as the id prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Text => "text",
            NodeType::Image => "image",
            NodeType::Folder => "folder",
            NodeType::Recipe => "recipe",
        }
    }
}

/// How a folder's children are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderViewType {
    List,
    Grid,
}

/// The closed set of cuisines a recipe may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cuisine {
    American,
    Italian,
    Spanish,
    Chinese,
    Korean,
    Japanese,
    French,
    Mexican,
    Vietnamese,
    Thai,
    Greek,
    British,
}

/// Recipe metadata; the description/ingredients/steps bodies live in separate
/// child text nodes referenced here by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeFields {
    #[serde(rename = "descriptionID")]
    pub description_id: String,
    #[serde(rename = "ingredientsID")]
    pub ingredients_id: String,
    #[serde(rename = "stepsID")]
    pub steps_id: String,
    pub serving: u32,
    pub cuisine: Cuisine,
    #[serde(rename = "time")]
    pub time_minutes: u32,
}

impl RecipeFields {
    /// Ids of the constituent sub-nodes, in display order
    pub fn sub_node_ids(&self) -> [&str; 3] {
        [&self.description_id, &self.ingredients_id, &self.steps_id]
    }
}

/// Type-specific node payload
///
/// `content` means different things per variant: HTML for text nodes, an
/// image URL for image nodes, and is unused-but-present for folders and
/// recipes (the wire format always carries it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeVariant {
    Text {
        content: String,
    },
    Image {
        content: String,
    },
    #[serde(rename_all = "camelCase")]
    Folder {
        content: String,
        view_type: FolderViewType,
    },
    Recipe {
        content: String,
        #[serde(flatten)]
        recipe: RecipeFields,
    },
}

impl NodeVariant {
    /// The node type tag for this variant
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeVariant::Text { .. } => NodeType::Text,
            NodeVariant::Image { .. } => NodeType::Image,
            NodeVariant::Folder { .. } => NodeType::Folder,
            NodeVariant::Recipe { .. } => NodeType::Recipe,
        }
    }

    /// The raw content field, whatever it means for this variant
    pub fn content(&self) -> &str {
        match self {
            NodeVariant::Text { content }
            | NodeVariant::Image { content }
            | NodeVariant::Folder { content, .. }
            | NodeVariant::Recipe { content, .. } => content,
        }
    }

    fn content_mut(&mut self) -> &mut String {
        match self {
            NodeVariant::Text { content }
            | NodeVariant::Image { content }
            | NodeVariant::Folder { content, .. }
            | NodeVariant::Recipe { content, .. } => content,
        }
    }
}

/// A node's location in the folder tree
///
/// `path` is the ordered list of ancestor ids ending in the node's own id;
/// `children` is the explicit list of direct child ids.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodePath {
    pub path: Vec<String>,
    pub children: Vec<String>,
}

impl NodePath {
    pub fn new(path: Vec<String>, children: Vec<String>) -> Self {
        Self { path, children }
    }
}

/// A stored document: text, image, folder, or recipe.
///
/// # Invariants
///
/// - `file_path.path` is non-empty and its last element equals `node_id`
/// - `node_id` carries the node type as a dot-separated prefix when created
///   through [`Node::new`] (e.g. `text.4f1c…`)
///
/// Both structure checks are performed by [`Node::validate`], which store
/// implementations run before persisting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_id: String,
    pub title: String,
    pub file_path: NodePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collaborators: Vec<String>,
    #[serde(flatten)]
    pub variant: NodeVariant,
}

impl Node {
    /// Create a node with a freshly generated, type-prefixed id.
    ///
    /// `parent_path` is the `path` of the parent node (empty for a root);
    /// the new node's path is the parent path extended with its own id.
    pub fn new(variant: NodeVariant, title: String, parent_path: &[String]) -> Self {
        let node_id = make_node_id(variant.node_type());
        let mut path = parent_path.to_vec();
        path.push(node_id.clone());

        Self {
            node_id,
            title,
            file_path: NodePath::new(path, Vec::new()),
            date_created: Some(Utc::now()),
            collaborators: Vec::new(),
            variant,
        }
    }

    /// The node type tag
    pub fn node_type(&self) -> NodeType {
        self.variant.node_type()
    }

    /// The raw content field (HTML for text nodes, URL for image nodes)
    pub fn content(&self) -> &str {
        self.variant.content()
    }

    /// Replace the content field in place
    pub fn set_content(&mut self, content: String) {
        *self.variant.content_mut() = content;
    }

    /// Recipe metadata, if this node is a recipe
    pub fn as_recipe(&self) -> Option<&RecipeFields> {
        match &self.variant {
            NodeVariant::Recipe { recipe, .. } => Some(recipe),
            _ => None,
        }
    }

    /// Validate structure and the file-path invariant
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if:
    /// - `node_id` is empty
    /// - `file_path.path` is empty
    /// - the last path element is not `node_id`
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.node_id.is_empty() {
            return Err(ValidationError::MissingField("nodeId".to_string()));
        }

        if self.file_path.path.is_empty() {
            return Err(ValidationError::InvalidPath(
                "filePath.path must be non-empty".to_string(),
            ));
        }

        if let Some(last) = self.file_path.path.last() {
            if last != &self.node_id {
                return Err(ValidationError::InvalidPath(format!(
                    "filePath.path must end in the node's own id (got '{}', expected '{}')",
                    last, self.node_id
                )));
            }
        }

        Ok(())
    }
}

/// Partial node update for patch operations
///
/// Only the provided fields are applied. This replaces the original
/// field-name/value property lists with a typed patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<NodePath>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_type: Option<FolderViewType>,
}

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that only replaces the content field
    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    /// Patch that only replaces the title
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Check if the patch contains any changes
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.file_path.is_none()
            && self.collaborators.is_none()
            && self.view_type.is_none()
    }

    /// Apply the patch to a node in place.
    ///
    /// # Errors
    ///
    /// `view_type` on a non-folder node is rejected; a patched `file_path`
    /// must still satisfy the path invariant.
    pub fn apply(&self, node: &mut Node) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            node.title = title.clone();
        }
        if let Some(content) = &self.content {
            node.set_content(content.clone());
        }
        if let Some(collaborators) = &self.collaborators {
            node.collaborators = collaborators.clone();
        }
        if let Some(view_type) = self.view_type {
            match &mut node.variant {
                NodeVariant::Folder { view_type: vt, .. } => *vt = view_type,
                other => {
                    return Err(ValidationError::InvalidUpdate(format!(
                        "viewType only applies to folder nodes, not '{}'",
                        other.node_type().as_str()
                    )))
                }
            }
        }
        if let Some(file_path) = &self.file_path {
            node.file_path = file_path.clone();
        }
        node.validate()
    }
}

/// Generate a type-prefixed node id, e.g. `text.4f1c2f…`
pub fn make_node_id(node_type: NodeType) -> String {
    format!("{}.{}", node_type.as_str(), Uuid::new_v4())
}
