use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::{DocumentSearchRow, FolderSearchRow, GraphNode, NodeConnection};

pub mod error_response;

/// represents a basic json message
#[derive(Responder, Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct BasicMessage {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct NameResponse {
    pub name: String,
}

/// a node of the nested file tree.
///
/// folders carry `items`, documents carry `encoding`
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TreeNode {
    /// unique within a single built tree, the root is always 0
    pub key: u32,
    pub id: u32,
    pub name: String,
    pub is_folder: bool,
    pub presence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TreeNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    /// 1 for text documents, 0 for binary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<u8>,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct SearchResults {
    pub folders: Vec<FolderSearchRow>,
    pub documents: Vec<DocumentSearchRow>,
    pub metadata: SearchMetadata,
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct SearchMetadata {
    pub total: usize,
    #[serde(rename = "folderCount")]
    pub folder_count: usize,
    #[serde(rename = "docCount")]
    pub doc_count: usize,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct GraphResponse {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<NodeConnection>,
}

/// how many tag connections a cascade created or removed
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TagCascadeResponse {
    pub connections: usize,
}

/// the contents of a document, ready to be sent over the wire
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FileContentResponse {
    pub path: String,
    pub extension: String,
    pub binary: bool,
    pub encoding: Option<String>,
    /// plain text for text documents, base64 for binary ones
    pub content: String,
}

// ----------------------------------

impl BasicMessage {
    pub fn new(message: &str) -> Json<BasicMessage> {
        Json::from(BasicMessage {
            message: message.to_string(),
        })
    }
}

impl From<String> for BasicMessage {
    fn from(value: String) -> Self {
        Self { message: value }
    }
}

impl TreeNode {
    pub fn folder(key: u32, id: u32, name: String, presence: f64, items: Vec<TreeNode>) -> Self {
        Self {
            key,
            id,
            name,
            is_folder: true,
            presence,
            items: Some(items),
            file_extension: None,
            encoding: None,
        }
    }

    pub fn document(
        key: u32,
        id: u32,
        name: String,
        presence: f64,
        file_extension: String,
        encoding: u8,
    ) -> Self {
        Self {
            key,
            id,
            name,
            is_folder: false,
            presence,
            items: None,
            file_extension: Some(file_extension),
            encoding: Some(encoding),
        }
    }
}

impl SearchResults {
    pub fn new(folders: Vec<FolderSearchRow>, documents: Vec<DocumentSearchRow>) -> Self {
        let metadata = SearchMetadata {
            total: folders.len() + documents.len(),
            folder_count: folders.len(),
            doc_count: documents.len(),
        };
        Self {
            folders,
            documents,
            metadata,
        }
    }
}
