use rusqlite::{Connection, OptionalExtension};

use crate::model::repository::Document;

pub fn get_by_path(filepath: &str, con: &Connection) -> Result<Option<Document>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/get_document_by_path.sql"
    ))?;
    pst.query_row(rusqlite::params![filepath], document_mapper)
        .optional()
}

pub fn get_by_id(id: u32, con: &Connection) -> Result<Option<Document>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/get_document_by_id.sql"
    ))?;
    pst.query_row(rusqlite::params![id], document_mapper)
        .optional()
}

pub fn get_by_node_id(node_id: u32, con: &Connection) -> Result<Option<Document>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/get_document_by_node_id.sql"
    ))?;
    pst.query_row(rusqlite::params![node_id], document_mapper)
        .optional()
}

/// documents that sit directly inside the folder, sub folders are not searched
pub fn get_in_folder(folder_id: u32, con: &Connection) -> Result<Vec<Document>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/get_documents_in_folder.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![folder_id], document_mapper)?;
    rows.collect()
}

pub fn create_document(
    folder_id: Option<u32>,
    name: &str,
    filepath: &str,
    file_extension: &str,
    node_id: u32,
    con: &Connection,
) -> Result<Document, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/create_document.sql"
    ))?;
    let id = pst.insert(rusqlite::params![
        folder_id,
        name,
        filepath,
        file_extension,
        node_id
    ])? as u32;
    Ok(Document {
        id,
        folder_id,
        name: name.to_string(),
        filepath: filepath.to_string(),
        file_extension: file_extension.to_string(),
        node_id,
    })
}

pub fn update_location(document: &Document, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/update_document_location.sql"
    ))?;
    pst.execute(rusqlite::params![
        document.name,
        document.filepath,
        document.folder_id,
        document.file_extension,
        document.id
    ])
}

/// same contract as [`crate::repository::folder_repository::rewrite_path_prefix`], for documents
pub fn rewrite_path_prefix(
    old_prefix: &str,
    new_prefix: &str,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/rewrite_path_prefix.sql"
    ))?;
    pst.execute(rusqlite::params![old_prefix, new_prefix])
}

/// the document's own node id along with the node ids of all its flashcards
pub fn get_node_ids(id: u32, con: &Connection) -> Result<Vec<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/document/get_document_node_ids.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![id], |row| row.get::<_, u32>(0))?;
    rows.collect()
}

fn document_mapper(row: &rusqlite::Row) -> Result<Document, rusqlite::Error> {
    Ok(Document {
        id: row.get(0)?,
        folder_id: row.get(1)?,
        name: row.get(2)?,
        filepath: row.get(3)?,
        file_extension: row.get(4)?,
        node_id: row.get(5)?,
    })
}
