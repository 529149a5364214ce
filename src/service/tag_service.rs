use rusqlite::Connection;

use crate::model::error::{WorkspaceError, WorkspaceResult};
use crate::model::repository::{ConnectionType, Document, InheritedTag, NodeTag, NodeType, Tag};
use crate::repository::{
    document_repository, flashcard_repository, folder_repository, graph_repository, tag_repository,
};
use crate::service::workspace::Workspace;

/// will create a tag, or return the already-existing tag if one with the same name exists
pub fn create_tag(workspace: &Workspace, name: &str) -> WorkspaceResult<Tag> {
    let name = validate_tag_name(name)?;
    workspace.write_transaction(|tx| {
        if let Some(existing) = tag_repository::get_by_name(name, tx)? {
            return Ok(existing);
        }
        let node_id = graph_repository::create_node(NodeType::Tag, 0.0, tx)?;
        let tag = tag_repository::create_tag(node_id, name, tx)?;
        log::info!("created tag {name} with id {}", tag.id);
        Ok(tag)
    })
}

pub fn get_tag(workspace: &Workspace, id: u32) -> WorkspaceResult<Tag> {
    let con = workspace.open_connection()?;
    require_tag(id, &con)
}

pub fn list_tags(workspace: &Workspace) -> WorkspaceResult<Vec<Tag>> {
    let con = workspace.open_connection()?;
    Ok(tag_repository::list_tags(&con)?)
}

/// renames the tag with the passed id.
/// Will fail if a different tag already exists with that name
pub fn rename_tag(workspace: &Workspace, id: u32, name: &str) -> WorkspaceResult<Tag> {
    let name = validate_tag_name(name)?;
    workspace.write_transaction(|tx| {
        let tag = require_tag(id, tx)?;
        if let Some(existing) = tag_repository::get_by_name(name, tx)? {
            if existing.id != id {
                return Err(WorkspaceError::conflict(format!(
                    "A tag named {name} already exists"
                )));
            }
        }
        tag_repository::rename_tag(id, name, tx)?;
        Ok(Tag {
            name: name.to_string(),
            ..tag
        })
    })
}

/// deletes the tag, along with every connection to it
pub fn delete_tag(workspace: &Workspace, id: u32) -> WorkspaceResult<()> {
    workspace.write_transaction(|tx| {
        require_tag(id, tx)?;
        graph_repository::delete_node(id, tx)?;
        log::info!("deleted tag {id}");
        Ok(())
    })
}

/// tags a single node without touching anything it owns. Returns the connection id.
///
/// If the node is already tagged, the existing connection is returned and nothing is created
pub fn tag_node(workspace: &Workspace, tag_id: u32, target_node_id: u32) -> WorkspaceResult<u32> {
    workspace.write_transaction(|tx| {
        require_tag(tag_id, tx)?;
        if graph_repository::get_node(target_node_id, tx)?.is_none() {
            return Err(WorkspaceError::not_found(format!(
                "No node with id {target_node_id} exists"
            )));
        }
        if let Some(existing) =
            graph_repository::get_connections_between(target_node_id, tag_id, ConnectionType::Tagged, tx)?
                .first()
        {
            return Ok(existing.id);
        }
        Ok(graph_repository::connect(
            target_node_id,
            tag_id,
            ConnectionType::Tagged,
            tx,
        )?)
    })
}

/// removes the tag from a single node. Removing a tag that isn't there is not an error
pub fn untag_node(workspace: &Workspace, tag_id: u32, target_node_id: u32) -> WorkspaceResult<usize> {
    workspace.write_transaction(|tx| {
        Ok(graph_repository::disconnect(
            target_node_id,
            tag_id,
            ConnectionType::Tagged,
            tx,
        )?)
    })
}

pub fn tag_flashcard(workspace: &Workspace, flashcard_id: u32, tag_id: u32) -> WorkspaceResult<u32> {
    let node_id = flashcard_node_id(workspace, flashcard_id)?;
    tag_node(workspace, tag_id, node_id)
}

pub fn untag_flashcard(
    workspace: &Workspace,
    flashcard_id: u32,
    tag_id: u32,
) -> WorkspaceResult<usize> {
    let node_id = flashcard_node_id(workspace, flashcard_id)?;
    untag_node(workspace, tag_id, node_id)
}

/// tags the document and every one of its flashcards. Every connection made here is recorded as inherited.
///
/// Returns how many connections were created. Nodes that already carry the tag are skipped
pub fn tag_document_cascade(
    workspace: &Workspace,
    document_id: u32,
    tag_id: u32,
) -> WorkspaceResult<usize> {
    workspace.write_transaction(|tx| {
        require_tag(tag_id, tx)?;
        let document = require_document(document_id, tx)?;
        let created = cascade_document(&document, tag_id, tx)?;
        log::info!("tag {tag_id} cascaded to {created} nodes of document {document_id}");
        Ok(created)
    })
}

/// tags the folder, every document directly inside it, and their flashcards.
/// Sub folders are left alone
pub fn tag_folder_cascade(
    workspace: &Workspace,
    folder_id: u32,
    tag_id: u32,
) -> WorkspaceResult<usize> {
    workspace.write_transaction(|tx| {
        require_tag(tag_id, tx)?;
        let folder = folder_repository::get_by_id(folder_id, tx)?.ok_or_else(|| {
            WorkspaceError::not_found(format!("No folder with id {folder_id} exists"))
        })?;
        let mut created = usize::from(tag_inherited(folder.node_id, tag_id, tx)?);
        for document in document_repository::get_in_folder(folder.id, tx)? {
            created += cascade_document(&document, tag_id, tx)?;
        }
        log::info!("tag {tag_id} cascaded to {created} nodes of folder {folder_id}");
        Ok(created)
    })
}

/// removes the tag from the document and all its flashcards. Returns how many connections were removed,
/// which is 0 if none of them were tagged
pub fn untag_document_cascade(
    workspace: &Workspace,
    document_id: u32,
    tag_id: u32,
) -> WorkspaceResult<usize> {
    workspace.write_transaction(|tx| {
        let document = require_document(document_id, tx)?;
        let mut removed =
            graph_repository::disconnect(document.node_id, tag_id, ConnectionType::Tagged, tx)?;
        for flashcard in flashcard_repository::get_for_document(document.id, tx)? {
            removed +=
                graph_repository::disconnect(flashcard.node_id, tag_id, ConnectionType::Tagged, tx)?;
        }
        Ok(removed)
    })
}

/// every tag on the node, flagged with whether it arrived through a cascade
pub fn get_tags_for_node(workspace: &Workspace, node_id: u32) -> WorkspaceResult<Vec<NodeTag>> {
    let con = workspace.open_connection()?;
    if graph_repository::get_node(node_id, &con)?.is_none() {
        return Err(WorkspaceError::not_found(format!(
            "No node with id {node_id} exists"
        )));
    }
    Ok(tag_repository::get_tags_for_node(node_id, &con)?)
}

/// the connections a cascade created for this tag
pub fn get_inherited_tags(workspace: &Workspace, tag_id: u32) -> WorkspaceResult<Vec<InheritedTag>> {
    let con = workspace.open_connection()?;
    require_tag(tag_id, &con)?;
    Ok(graph_repository::get_inherited_tags(tag_id, &con)?)
}

fn cascade_document(document: &Document, tag_id: u32, con: &Connection) -> WorkspaceResult<usize> {
    let mut created = usize::from(tag_inherited(document.node_id, tag_id, con)?);
    for flashcard in flashcard_repository::get_for_document(document.id, con)? {
        created += usize::from(tag_inherited(flashcard.node_id, tag_id, con)?);
    }
    Ok(created)
}

/// connects `node_id` to the tag and records the connection as inherited. Returns false if the node was already tagged
fn tag_inherited(node_id: u32, tag_id: u32, con: &Connection) -> WorkspaceResult<bool> {
    if !graph_repository::get_connections_between(node_id, tag_id, ConnectionType::Tagged, con)?
        .is_empty()
    {
        return Ok(false);
    }
    let connection_id = graph_repository::connect(node_id, tag_id, ConnectionType::Tagged, con)?;
    graph_repository::record_inherited_tag(connection_id, tag_id, con)?;
    Ok(true)
}

fn require_tag(id: u32, con: &Connection) -> WorkspaceResult<Tag> {
    tag_repository::get_by_id(id, con)?
        .ok_or_else(|| WorkspaceError::not_found(format!("No tag with id {id} exists")))
}

fn require_document(id: u32, con: &Connection) -> WorkspaceResult<Document> {
    document_repository::get_by_id(id, con)?
        .ok_or_else(|| WorkspaceError::not_found(format!("No document with id {id} exists")))
}

fn flashcard_node_id(workspace: &Workspace, flashcard_id: u32) -> WorkspaceResult<u32> {
    let con = workspace.open_connection()?;
    flashcard_repository::get_by_id(flashcard_id, &con)?
        .map(|flashcard| flashcard.node_id)
        .ok_or_else(|| {
            WorkspaceError::not_found(format!("No flashcard with id {flashcard_id} exists"))
        })
}

fn validate_tag_name(name: &str) -> WorkspaceResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WorkspaceError::validation("Tag names cannot be empty"));
    }
    Ok(trimmed)
}
