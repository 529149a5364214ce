use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use rusqlite::Connection;

use crate::model::error::{WorkspaceError, WorkspaceResult};
use crate::model::file_types::{file_encoding, FileEncoding};
use crate::model::repository::{ConnectionType, Document, Folder, NodeType, WorkspaceEntry};
use crate::repository::{document_repository, folder_repository, graph_repository};
use crate::service::paths::{path_string, RelativePath};
use crate::service::workspace::Workspace;

/// the raw contents of a document along with how they should be interpreted
#[derive(Debug, PartialEq, Clone)]
pub struct FileContent {
    pub path: RelativePath,
    pub extension: String,
    pub encoding: FileEncoding,
    pub bytes: Vec<u8>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum EntryKind {
    Folder,
    Document,
}

/// creates a new document at `relative_path` with `content`, creating any missing ancestor folders along the way.
///
/// Fails with [`WorkspaceError::Conflict`] if anything already exists at that path. If any step fails,
/// no rows are left behind and every directory created by this call is removed
pub fn create_file(
    workspace: &Workspace,
    relative_path: &str,
    content: &[u8],
) -> WorkspaceResult<Document> {
    let path = RelativePath::parse(relative_path)?;
    let absolute = workspace.absolute(&path);
    let filepath = path_string(&absolute);
    workspace.write_transaction_creating_dirs(|tx, created_dirs| {
        if workspace.fs().exists(&absolute)
            || document_repository::get_by_path(&filepath, tx)?.is_some()
        {
            return Err(WorkspaceError::conflict(format!("{path} already exists")));
        }
        let parent = ensure_folder_chain(workspace, tx, &path.parent(), created_dirs)?;
        let document = insert_document(tx, parent.as_ref(), &path, &filepath)?;
        workspace.fs().write_file(&absolute, content)?;
        log::info!("created document {path} with node {}", document.node_id);
        Ok(document)
    })
}

/// creates the folder at `relative_path` and any missing ancestors.
/// A directory that already exists on disk but was never tracked is registered instead of rejected
pub fn create_folder(workspace: &Workspace, relative_path: &str) -> WorkspaceResult<Folder> {
    let path = RelativePath::parse(relative_path)?;
    let absolute = workspace.absolute(&path);
    let filepath = path_string(&absolute);
    workspace.write_transaction_creating_dirs(|tx, created_dirs| {
        if folder_repository::get_by_path(&filepath, tx)?.is_some()
            || document_repository::get_by_path(&filepath, tx)?.is_some()
        {
            return Err(WorkspaceError::conflict(format!("{path} already exists")));
        }
        ensure_folder_chain(workspace, tx, &path, created_dirs)?
            .ok_or_else(|| WorkspaceError::validation("Cannot create the workspace root"))
    })
}

/// reads the document at `relative_path` straight from disk
pub fn read_file(workspace: &Workspace, relative_path: &str) -> WorkspaceResult<FileContent> {
    let path = RelativePath::parse(relative_path)?;
    let absolute = workspace.absolute(&path);
    if !workspace.fs().exists(&absolute) {
        return Err(WorkspaceError::not_found(format!("{path} does not exist")));
    }
    if workspace.fs().is_dir(&absolute)? {
        return Err(WorkspaceError::validation(format!("{path} is a folder")));
    }
    let bytes = workspace.fs().read_file(&absolute)?;
    let extension = path.extension();
    Ok(FileContent {
        encoding: file_encoding(&extension),
        path,
        extension,
        bytes,
    })
}

/// where the document with `id` lives, relative to the workspace root
pub fn get_document_path(workspace: &Workspace, id: u32) -> WorkspaceResult<RelativePath> {
    let con = workspace.open_connection()?;
    let document = require_document_by_id(id, &con)?;
    relative_to_root(workspace, &document.filepath)
}

pub fn get_document_name(workspace: &Workspace, id: u32) -> WorkspaceResult<String> {
    let con = workspace.open_connection()?;
    Ok(require_document_by_id(id, &con)?.name)
}

/// where the folder with `id` lives, relative to the workspace root
pub fn get_folder_path(workspace: &Workspace, id: u32) -> WorkspaceResult<RelativePath> {
    let con = workspace.open_connection()?;
    let folder = require_folder_by_id(id, &con)?;
    relative_to_root(workspace, &folder.filepath)
}

pub fn get_folder_name(workspace: &Workspace, id: u32) -> WorkspaceResult<String> {
    let con = workspace.open_connection()?;
    Ok(require_folder_by_id(id, &con)?.name)
}

/// overwrites an existing document. Use [`create_file`] for new ones
pub fn write_file(workspace: &Workspace, relative_path: &str, content: &[u8]) -> WorkspaceResult<()> {
    let path = RelativePath::parse(relative_path)?;
    let absolute = workspace.absolute(&path);
    workspace.write_transaction(|tx| {
        if !workspace.fs().exists(&absolute) {
            return Err(WorkspaceError::not_found(format!("{path} does not exist")));
        }
        if workspace.fs().is_dir(&absolute)? {
            return Err(WorkspaceError::validation(format!("{path} is a folder")));
        }
        resolve_document(workspace, tx, &path)?;
        workspace.fs().write_file(&absolute, content)?;
        log::debug!("wrote {} bytes to {path}", content.len());
        Ok(())
    })
}

/// deletes the file or folder at `relative_path` from disk along with every node it owns.
///
/// for a folder, that is every sub folder, document, and flashcard under it. Edges and inherited tag
/// records touching those nodes go with them
pub fn delete_path(workspace: &Workspace, relative_path: &str) -> WorkspaceResult<()> {
    let path = RelativePath::parse(relative_path)?;
    let absolute = workspace.absolute(&path);
    let filepath = path_string(&absolute);
    workspace.write_transaction(|tx| {
        if !workspace.fs().exists(&absolute) {
            return Err(WorkspaceError::not_found(format!("{path} does not exist")));
        }
        let node_ids = if workspace.fs().is_dir(&absolute)? {
            match folder_repository::get_by_path(&filepath, tx)? {
                Some(folder) => folder_repository::get_subtree_node_ids(folder.id, tx)?,
                None => Vec::new(),
            }
        } else {
            match document_repository::get_by_path(&filepath, tx)? {
                Some(document) => document_repository::get_node_ids(document.id, tx)?,
                None => Vec::new(),
            }
        };
        for node_id in &node_ids {
            graph_repository::delete_node(*node_id, tx)?;
        }
        workspace.fs().remove(&absolute)?;
        log::info!("deleted {path} along with {} nodes", node_ids.len());
        Ok(())
    })
}

/// moves the file or folder at `source` to `destination`, creating any missing ancestors of the destination.
///
/// every folder and document underneath a moved folder has its path rewritten
pub fn move_path(
    workspace: &Workspace,
    source: &str,
    destination: &str,
) -> WorkspaceResult<WorkspaceEntry> {
    let source = RelativePath::parse(source)?;
    let destination = RelativePath::parse(destination)?;
    move_entry(workspace, &source, &destination, None)
}

/// renames the document at `relative_path` in place. `new_name` is the full new file name, extension included
pub fn rename_file(
    workspace: &Workspace,
    relative_path: &str,
    new_name: &str,
) -> WorkspaceResult<Document> {
    let source = RelativePath::parse(relative_path)?;
    let destination = source.with_file_name(new_name)?;
    match move_entry(workspace, &source, &destination, Some(EntryKind::Document))? {
        WorkspaceEntry::Document(document) => Ok(document),
        WorkspaceEntry::Folder(_) => Err(WorkspaceError::validation(format!(
            "{source} is a folder"
        ))),
    }
}

pub fn rename_folder(
    workspace: &Workspace,
    relative_path: &str,
    new_name: &str,
) -> WorkspaceResult<Folder> {
    let source = RelativePath::parse(relative_path)?;
    let destination = source.with_file_name(new_name)?;
    match move_entry(workspace, &source, &destination, Some(EntryKind::Folder))? {
        WorkspaceEntry::Folder(folder) => Ok(folder),
        WorkspaceEntry::Document(_) => Err(WorkspaceError::validation(format!(
            "{source} is not a folder"
        ))),
    }
}

/// swaps the extension of the document at `relative_path`, appending one if it had none.
/// The document stays in the same folder
pub fn change_file_extension(
    workspace: &Workspace,
    relative_path: &str,
    new_extension: &str,
) -> WorkspaceResult<Document> {
    let source = RelativePath::parse(relative_path)?;
    let extension = new_extension.trim().trim_start_matches('.');
    if extension.is_empty() || extension.contains(['/', '\\', ':']) {
        return Err(WorkspaceError::validation(format!(
            "'{new_extension}' is not a valid extension"
        )));
    }
    let name = source.file_name();
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    let destination = source.with_file_name(&format!("{stem}.{extension}"))?;
    match move_entry(workspace, &source, &destination, Some(EntryKind::Document))? {
        WorkspaceEntry::Document(document) => Ok(document),
        WorkspaceEntry::Folder(_) => Err(WorkspaceError::validation(format!(
            "{source} is a folder"
        ))),
    }
}

fn move_entry(
    workspace: &Workspace,
    source: &RelativePath,
    destination: &RelativePath,
    expected: Option<EntryKind>,
) -> WorkspaceResult<WorkspaceEntry> {
    let source_abs = workspace.absolute(source);
    let destination_abs = workspace.absolute(destination);
    let destination_path = path_string(&destination_abs);
    workspace.write_transaction_creating_dirs(|tx, created_dirs| {
        let fs = workspace.fs();
        if !fs.exists(&source_abs) {
            return Err(WorkspaceError::not_found(format!("{source} does not exist")));
        }
        let kind = if fs.is_dir(&source_abs)? {
            EntryKind::Folder
        } else {
            EntryKind::Document
        };
        match (expected, kind) {
            (Some(EntryKind::Document), EntryKind::Folder) => {
                return Err(WorkspaceError::validation(format!("{source} is a folder")));
            }
            (Some(EntryKind::Folder), EntryKind::Document) => {
                return Err(WorkspaceError::validation(format!(
                    "{source} is not a folder"
                )));
            }
            _ => {}
        }
        if fs.exists(&destination_abs)
            || folder_repository::get_by_path(&destination_path, tx)?.is_some()
            || document_repository::get_by_path(&destination_path, tx)?.is_some()
        {
            return Err(WorkspaceError::conflict(format!("{destination} already exists")));
        }
        if kind == EntryKind::Folder && destination.is_inside(source) {
            return Err(WorkspaceError::validation(format!(
                "Cannot move {source} into itself"
            )));
        }
        let new_parent = ensure_folder_chain(workspace, tx, &destination.parent(), created_dirs)?;
        let entry = match kind {
            EntryKind::Folder => WorkspaceEntry::Folder(move_folder_rows(
                workspace,
                tx,
                source,
                destination,
                new_parent.as_ref(),
            )?),
            EntryKind::Document => WorkspaceEntry::Document(move_document_rows(
                workspace,
                tx,
                source,
                destination,
                new_parent.as_ref(),
            )?),
        };
        fs.rename(&source_abs, &destination_abs)?;
        log::info!("moved {source} to {destination}");
        Ok(entry)
    })
}

fn move_folder_rows(
    workspace: &Workspace,
    con: &Connection,
    source: &RelativePath,
    destination: &RelativePath,
    new_parent: Option<&Folder>,
) -> WorkspaceResult<Folder> {
    let folder = resolve_folder(workspace, con, source)?;
    let destination_path = path_string(&workspace.absolute(destination));
    let moved = Folder {
        name: destination.file_name().to_string(),
        filepath: destination_path,
        parent_folder_id: new_parent.map(|parent| parent.id),
        ..folder.clone()
    };
    folder_repository::update_location(
        moved.id,
        &moved.name,
        &moved.filepath,
        moved.parent_folder_id,
        con,
    )?;
    relink_parent(con, folder.node_id, folder.parent_folder_id, new_parent)?;
    let old_prefix = format!("{}{MAIN_SEPARATOR}", folder.filepath);
    let new_prefix = format!("{}{MAIN_SEPARATOR}", moved.filepath);
    let folders = folder_repository::rewrite_path_prefix(&old_prefix, &new_prefix, con)?;
    let documents = document_repository::rewrite_path_prefix(&old_prefix, &new_prefix, con)?;
    log::debug!("rewrote paths of {folders} folders and {documents} documents under {source}");
    Ok(moved)
}

fn move_document_rows(
    workspace: &Workspace,
    con: &Connection,
    source: &RelativePath,
    destination: &RelativePath,
    new_parent: Option<&Folder>,
) -> WorkspaceResult<Document> {
    let document = resolve_document(workspace, con, source)?;
    let moved = Document {
        folder_id: new_parent.map(|parent| parent.id),
        name: destination.file_name().to_string(),
        filepath: path_string(&workspace.absolute(destination)),
        file_extension: destination.extension(),
        ..document.clone()
    };
    document_repository::update_location(&moved, con)?;
    relink_parent(con, document.node_id, document.folder_id, new_parent)?;
    Ok(moved)
}

/// swaps the Contains edge from the old parent folder to the new one. Root-level entries have no edge
fn relink_parent(
    con: &Connection,
    node_id: u32,
    old_parent_id: Option<u32>,
    new_parent: Option<&Folder>,
) -> WorkspaceResult<()> {
    if old_parent_id == new_parent.map(|parent| parent.id) {
        return Ok(());
    }
    if let Some(old_parent_id) = old_parent_id {
        if let Some(old_parent) = folder_repository::get_by_id(old_parent_id, con)? {
            graph_repository::disconnect(old_parent.node_id, node_id, ConnectionType::Contains, con)?;
        }
    }
    if let Some(new_parent) = new_parent {
        graph_repository::connect(new_parent.node_id, node_id, ConnectionType::Contains, con)?;
    }
    Ok(())
}

/// walks `directory` from the workspace root down, creating every directory and Folder row that is missing.
///
/// Newly created directories are pushed onto `created_dirs` in creation order. Returns the deepest folder,
/// or `None` if `directory` is the root
fn ensure_folder_chain(
    workspace: &Workspace,
    con: &Connection,
    directory: &RelativePath,
    created_dirs: &mut Vec<PathBuf>,
) -> WorkspaceResult<Option<Folder>> {
    let fs = workspace.fs();
    let mut parent: Option<Folder> = None;
    let mut current = workspace.root().to_path_buf();
    for segment in directory.segments() {
        current.push(segment);
        if !fs.exists(&current) {
            fs.mkdir(&current)?;
            created_dirs.push(current.clone());
        } else if !fs.is_dir(&current)? {
            return Err(WorkspaceError::conflict(format!(
                "{} is a file, not a folder",
                path_string(&current)
            )));
        }
        let folder = graph_repository::create_or_get_folder(
            segment,
            &path_string(&current),
            parent.as_ref().map(|folder| folder.id),
            con,
        )?;
        parent = Some(folder);
    }
    Ok(parent)
}

/// the folder row for an existing directory, registering it (and its ancestors) if it was never tracked
fn resolve_folder(
    workspace: &Workspace,
    con: &Connection,
    directory: &RelativePath,
) -> WorkspaceResult<Folder> {
    // the directory already exists, so nothing gets created on disk here
    let mut created_dirs = Vec::new();
    ensure_folder_chain(workspace, con, directory, &mut created_dirs)?
        .ok_or_else(|| WorkspaceError::validation("The workspace root is not a folder"))
}

/// the document row for an existing file, registering it if it was never tracked
fn resolve_document(
    workspace: &Workspace,
    con: &Connection,
    path: &RelativePath,
) -> WorkspaceResult<Document> {
    let filepath = path_string(&workspace.absolute(path));
    if let Some(document) = document_repository::get_by_path(&filepath, con)? {
        return Ok(document);
    }
    log::debug!("registering untracked file {path}");
    let parent = resolve_parent(workspace, con, path)?;
    insert_document(con, parent.as_ref(), path, &filepath)
}

fn resolve_parent(
    workspace: &Workspace,
    con: &Connection,
    path: &RelativePath,
) -> WorkspaceResult<Option<Folder>> {
    let parent = path.parent();
    if parent.is_root() {
        return Ok(None);
    }
    resolve_folder(workspace, con, &parent).map(Some)
}

fn require_document_by_id(id: u32, con: &Connection) -> WorkspaceResult<Document> {
    document_repository::get_by_id(id, con)?
        .ok_or_else(|| WorkspaceError::not_found(format!("No document with id {id} exists")))
}

fn require_folder_by_id(id: u32, con: &Connection) -> WorkspaceResult<Folder> {
    folder_repository::get_by_id(id, con)?
        .ok_or_else(|| WorkspaceError::not_found(format!("No folder with id {id} exists")))
}

/// the stored absolute path of a row, relative to the workspace root
fn relative_to_root(workspace: &Workspace, filepath: &str) -> WorkspaceResult<RelativePath> {
    let relative = Path::new(filepath)
        .strip_prefix(workspace.root())
        .map_err(|_| {
            WorkspaceError::Store(format!(
                "{filepath} is stored outside of the workspace {:?}",
                workspace.root()
            ))
        })?;
    RelativePath::parse(&path_string(relative))
}

fn insert_document(
    con: &Connection,
    parent: Option<&Folder>,
    path: &RelativePath,
    filepath: &str,
) -> WorkspaceResult<Document> {
    let node_id = graph_repository::create_node(NodeType::Document, 0.0, con)?;
    let document = document_repository::create_document(
        parent.map(|folder| folder.id),
        path.file_name(),
        filepath,
        &path.extension(),
        node_id,
        con,
    )?;
    if let Some(parent) = parent {
        graph_repository::connect(parent.node_id, node_id, ConnectionType::Contains, con)?;
    }
    Ok(document)
}
