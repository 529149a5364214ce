use chrono::NaiveDateTime;
use rocket::serde::Serialize;
use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;

use crate::model::error::WorkspaceError;

/// the kind of payload a row in the Nodes table points at
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[serde(crate = "rocket::serde")]
pub enum NodeType {
    Folder,
    Document,
    Flashcard,
    Tag,
}

/// the kind of edge stored in Node_connections
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[serde(crate = "rocket::serde")]
pub enum ConnectionType {
    /// structural edge, parent folder -> child or document -> flashcard
    Contains,
    /// item -> tag
    Tagged,
}

/// a row in the Nodes table with its decoded payload
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Node {
    pub id: u32,
    pub presence: f64,
    pub kind: NodeKind,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde", tag = "type", content = "payload")]
pub enum NodeKind {
    Folder(Folder),
    Document(Document),
    Flashcard(Flashcard),
    Tag(Tag),
}

#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Folder {
    pub id: u32,
    /// the last segment of the path
    pub name: String,
    /// absolute path on disk, unique across all folders
    pub filepath: String,
    pub node_id: u32,
    /// `None` when the folder sits directly in the workspace root
    pub parent_folder_id: Option<u32>,
}

#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Document {
    pub id: u32,
    /// `None` when the document sits directly in the workspace root
    pub folder_id: Option<u32>,
    pub name: String,
    pub filepath: String,
    /// lowercase, without the leading `.`, empty if the file has none
    pub file_extension: String,
    pub node_id: u32,
}

#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Flashcard {
    pub id: u32,
    pub document_id: u32,
    pub node_id: u32,
    pub name: String,
    pub front: Option<String>,
    pub back: Option<String>,
    pub next_recall: Option<NaiveDateTime>,
    pub highlight_id: Option<u32>,
}

/// the part of a document a flashcard was made from.
///
/// binary documents mark a rectangle on a page, text documents a character range
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Highlight {
    pub id: u32,
    pub page: Option<u32>,
    pub x1: Option<f64>,
    pub y1: Option<f64>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub start: Option<u32>,
    pub end: Option<u32>,
}

/// tags share their id with the node they belong to
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct Tag {
    pub id: u32,
    pub name: String,
    pub presence: f64,
}

/// a tag as seen from a node it has been applied to
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct NodeTag {
    pub tag: Tag,
    /// true if the tag arrived through a cascade rather than being applied directly
    pub inherited: bool,
}

#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone)]
#[serde(crate = "rocket::serde")]
pub struct NodeConnection {
    pub id: u32,
    pub origin_id: u32,
    pub destiny_id: u32,
    pub connection_type: ConnectionType,
}

/// provenance for a Tagged connection created by a cascade
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone)]
#[serde(crate = "rocket::serde")]
pub struct InheritedTag {
    pub id: u32,
    pub connection_id: u32,
    pub tag_id: u32,
}

/// a node as the graph view draws it
#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct GraphNode {
    pub id: u32,
    pub presence: f64,
    /// the display name of whatever payload the node carries, empty if the payload is missing
    pub name: String,
    pub node_type: NodeType,
}

/// one row of the flat folder/document join the tree builder consumes.
///
/// folders without documents show up with every `document_*` field empty,
/// and root-level documents show up with every `folder_*` field empty
#[derive(Debug, PartialEq, Clone, Default)]
pub struct FileTreeRow {
    pub folder_id: Option<u32>,
    pub folder_name: Option<String>,
    pub parent_folder_id: Option<u32>,
    pub folder_presence: Option<f64>,
    pub document_id: Option<u32>,
    pub document_name: Option<String>,
    pub document_presence: Option<f64>,
    pub file_extension: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FolderSearchRow {
    pub id: u32,
    pub name: String,
    pub filepath: String,
    pub presence: f64,
    pub match_quality: u8,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct DocumentSearchRow {
    pub id: u32,
    pub name: String,
    pub filepath: String,
    pub file_extension: String,
    pub presence: f64,
    pub folder_name: Option<String>,
    pub match_quality: u8,
}

/// whatever sits at a path once a move or rename has finished
#[derive(Serialize, Debug, PartialEq, Eq, Clone)]
#[serde(crate = "rocket::serde", tag = "type", content = "entry")]
pub enum WorkspaceEntry {
    Folder(Folder),
    Document(Document),
}

// ----------------------------------

impl NodeType {
    /// the value stored in Node_types.name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::Document => "Document",
            Self::Flashcard => "Flashcard",
            Self::Tag => "Tag",
        }
    }
}

impl TryFrom<&str> for NodeType {
    type Error = WorkspaceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Folder" => Ok(Self::Folder),
            "Document" => Ok(Self::Document),
            "Flashcard" => Ok(Self::Flashcard),
            "Tag" => Ok(Self::Tag),
            other => Err(WorkspaceError::Store(format!(
                "Unrecognized node type {other}"
            ))),
        }
    }
}

impl ToSql for NodeType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.name().into())
    }
}

impl ConnectionType {
    /// the value stored in Connection_types.name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Contains => "Contains",
            Self::Tagged => "Tagged",
        }
    }
}

impl TryFrom<&str> for ConnectionType {
    type Error = WorkspaceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Contains" => Ok(Self::Contains),
            "Tagged" => Ok(Self::Tagged),
            other => Err(WorkspaceError::Store(format!(
                "Unrecognized connection type {other}"
            ))),
        }
    }
}

impl ToSql for ConnectionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.name().into())
    }
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Folder(_) => NodeType::Folder,
            Self::Document(_) => NodeType::Document,
            Self::Flashcard(_) => NodeType::Flashcard,
            Self::Tag(_) => NodeType::Tag,
        }
    }
}
