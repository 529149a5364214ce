use rocket::serde::Deserialize;

/// body for creating or overwriting a document.
///
/// `content` is plain text for text extensions and base64 for binary ones
#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FileContentRequest {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FolderRequest {
    pub path: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct MovePathRequest {
    pub source: String,
    pub destination: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct RenameRequest {
    pub path: String,
    /// the new last segment, not a full path
    pub name: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct ChangeExtensionRequest {
    pub path: String,
    pub extension: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct TagRequest {
    pub name: String,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct CreateFlashcardRequest {
    #[serde(rename = "documentId")]
    pub document_id: u32,
    pub name: String,
    pub front: Option<String>,
    pub back: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct UpdateFlashcardRequest {
    pub name: String,
    pub front: Option<String>,
    pub back: Option<String>,
}

/// where a flashcard was taken from. Binary documents use a page region, text documents a character range
#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde", tag = "kind", rename_all = "lowercase")]
pub enum HighlightRequest {
    Region {
        page: u32,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Text {
        start: u32,
        end: u32,
    },
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct PresenceRequest {
    pub presence: f64,
}
