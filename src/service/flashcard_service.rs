use rusqlite::Connection;

use crate::model::error::{WorkspaceError, WorkspaceResult};
use crate::model::file_types::file_encoding;
use crate::model::repository::{ConnectionType, Flashcard, Highlight, NodeType};
use crate::model::request::HighlightRequest;
use crate::repository::{
    document_repository, flashcard_repository, folder_repository, graph_repository, tag_repository,
};
use crate::service::workspace::Workspace;

/// creates a flashcard on the document, due for recall right away.
/// The document gets a Contains edge to the new flashcard
pub fn create_flashcard(
    workspace: &Workspace,
    document_id: u32,
    name: &str,
    front: Option<&str>,
    back: Option<&str>,
) -> WorkspaceResult<Flashcard> {
    let name = validate_name(name)?;
    workspace.write_transaction(|tx| {
        let document = document_repository::get_by_id(document_id, tx)?.ok_or_else(|| {
            WorkspaceError::not_found(format!("No document with id {document_id} exists"))
        })?;
        let node_id = graph_repository::create_node(NodeType::Flashcard, 0.0, tx)?;
        let next_recall = chrono::Local::now().naive_local();
        let flashcard = flashcard_repository::create_flashcard(
            document.id,
            node_id,
            name,
            front,
            back,
            next_recall,
            tx,
        )?;
        graph_repository::connect(document.node_id, node_id, ConnectionType::Contains, tx)?;
        log::info!("created flashcard {} on document {document_id}", flashcard.id);
        Ok(flashcard)
    })
}

pub fn get_flashcards_for_document(
    workspace: &Workspace,
    document_id: u32,
) -> WorkspaceResult<Vec<Flashcard>> {
    let con = workspace.open_connection()?;
    if document_repository::get_by_id(document_id, &con)?.is_none() {
        return Err(WorkspaceError::not_found(format!(
            "No document with id {document_id} exists"
        )));
    }
    Ok(flashcard_repository::get_for_document(document_id, &con)?)
}

/// flashcards of every document directly inside the folder
pub fn get_flashcards_for_folder(
    workspace: &Workspace,
    folder_id: u32,
) -> WorkspaceResult<Vec<Flashcard>> {
    let con = workspace.open_connection()?;
    if folder_repository::get_by_id(folder_id, &con)?.is_none() {
        return Err(WorkspaceError::not_found(format!(
            "No folder with id {folder_id} exists"
        )));
    }
    Ok(flashcard_repository::get_for_folder(folder_id, &con)?)
}

/// flashcards carrying the tag, directly or through a cascade
pub fn get_flashcards_for_tag(workspace: &Workspace, tag_id: u32) -> WorkspaceResult<Vec<Flashcard>> {
    let con = workspace.open_connection()?;
    if tag_repository::get_by_id(tag_id, &con)?.is_none() {
        return Err(WorkspaceError::not_found(format!("No tag with id {tag_id} exists")));
    }
    Ok(flashcard_repository::get_for_tag(tag_id, &con)?)
}

/// replaces the name and both sides of the flashcard. The recall date and highlight are kept
pub fn update_flashcard(
    workspace: &Workspace,
    id: u32,
    name: &str,
    front: Option<&str>,
    back: Option<&str>,
) -> WorkspaceResult<Flashcard> {
    let name = validate_name(name)?;
    workspace.write_transaction(|tx| {
        let flashcard = require_flashcard(id, tx)?;
        flashcard_repository::update_flashcard(id, name, front, back, tx)?;
        log::debug!("updated flashcard {id}");
        Ok(Flashcard {
            name: name.to_string(),
            front: front.map(str::to_string),
            back: back.map(str::to_string),
            ..flashcard
        })
    })
}

/// attaches a highlight to the flashcard, replacing any it already had.
///
/// binary documents only take page regions and text documents only take character ranges
pub fn set_highlight(
    workspace: &Workspace,
    flashcard_id: u32,
    request: &HighlightRequest,
) -> WorkspaceResult<Highlight> {
    let highlight = highlight_from_request(request)?;
    workspace.write_transaction(|tx| {
        let flashcard = require_flashcard(flashcard_id, tx)?;
        let document = document_repository::get_by_id(flashcard.document_id, tx)?.ok_or_else(|| {
            WorkspaceError::not_found(format!("No document with id {} exists", flashcard.document_id))
        })?;
        let binary = file_encoding(&document.file_extension).binary;
        match (request, binary) {
            (HighlightRequest::Text { .. }, true) => {
                return Err(WorkspaceError::validation(format!(
                    "{} is binary, highlight a page region instead",
                    document.name
                )));
            }
            (HighlightRequest::Region { .. }, false) => {
                return Err(WorkspaceError::validation(format!(
                    "{} is text, highlight a character range instead",
                    document.name
                )));
            }
            _ => {}
        }
        let created = flashcard_repository::create_highlight(&highlight, tx)?;
        flashcard_repository::set_highlight_id(flashcard.id, Some(created.id), tx)?;
        if let Some(previous) = flashcard.highlight_id {
            flashcard_repository::delete_highlight(previous, tx)?;
        }
        log::debug!("attached highlight {} to flashcard {flashcard_id}", created.id);
        Ok(created)
    })
}

pub fn get_highlight(workspace: &Workspace, flashcard_id: u32) -> WorkspaceResult<Highlight> {
    let con = workspace.open_connection()?;
    let flashcard = require_flashcard(flashcard_id, &con)?;
    let no_highlight =
        || WorkspaceError::not_found(format!("Flashcard {flashcard_id} has no highlight"));
    let highlight_id = flashcard.highlight_id.ok_or_else(no_highlight)?;
    flashcard_repository::get_highlight(highlight_id, &con)?.ok_or_else(no_highlight)
}

/// deletes the flashcard through its node, which takes its edges and tags with it
pub fn delete_flashcard(workspace: &Workspace, id: u32) -> WorkspaceResult<()> {
    workspace.write_transaction(|tx| {
        let flashcard = require_flashcard(id, tx)?;
        graph_repository::delete_node(flashcard.node_id, tx)?;
        if let Some(highlight_id) = flashcard.highlight_id {
            flashcard_repository::delete_highlight(highlight_id, tx)?;
        }
        Ok(())
    })
}

fn require_flashcard(id: u32, con: &Connection) -> WorkspaceResult<Flashcard> {
    flashcard_repository::get_by_id(id, con)?
        .ok_or_else(|| WorkspaceError::not_found(format!("No flashcard with id {id} exists")))
}

fn validate_name(name: &str) -> WorkspaceResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WorkspaceError::validation("Flashcards need a name"));
    }
    Ok(name)
}

fn highlight_from_request(request: &HighlightRequest) -> WorkspaceResult<Highlight> {
    match *request {
        HighlightRequest::Region { page, x1, y1, x2, y2 } => {
            if page == 0 {
                return Err(WorkspaceError::validation("Pages are numbered from 1"));
            }
            if [x1, y1, x2, y2].iter().any(|value| !value.is_finite()) {
                return Err(WorkspaceError::validation("Highlight coordinates must be numbers"));
            }
            Ok(Highlight {
                id: 0,
                page: Some(page),
                x1: Some(x1),
                y1: Some(y1),
                x2: Some(x2),
                y2: Some(y2),
                start: None,
                end: None,
            })
        }
        HighlightRequest::Text { start, end } => {
            if end <= start {
                return Err(WorkspaceError::validation(
                    "A text highlight must end after it starts",
                ));
            }
            Ok(Highlight {
                id: 0,
                page: None,
                x1: None,
                y1: None,
                x2: None,
                y2: None,
                start: Some(start),
                end: Some(end),
            })
        }
    }
}
