use rusqlite::Connection;

use crate::model::repository::{DocumentSearchRow, FileTreeRow, FolderSearchRow};

/// the flat folder/document join the tree builder works off of.
///
/// rows are ordered so that every folder shows up after its parent
pub fn get_file_tree_rows(con: &Connection) -> Result<Vec<FileTreeRow>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/search/get_file_tree.sql"))?;
    let rows = pst.query_map([], |row| {
        Ok(FileTreeRow {
            folder_id: row.get(0)?,
            folder_name: row.get(1)?,
            parent_folder_id: row.get(2)?,
            folder_presence: row.get(3)?,
            document_id: row.get(4)?,
            document_name: row.get(5)?,
            document_presence: row.get(6)?,
            file_extension: row.get(7)?,
        })
    })?;
    rows.collect()
}

/// folders whose name contains `term`, best match first
pub fn search_folders(term: &str, con: &Connection) -> Result<Vec<FolderSearchRow>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/search/search_folders.sql"))?;
    let rows = pst.query_map(rusqlite::params![term], |row| {
        Ok(FolderSearchRow {
            id: row.get(0)?,
            name: row.get(1)?,
            filepath: row.get(2)?,
            presence: row.get(3)?,
            match_quality: row.get(4)?,
        })
    })?;
    rows.collect()
}

/// documents whose name contains `term`, best match first
pub fn search_documents(
    term: &str,
    con: &Connection,
) -> Result<Vec<DocumentSearchRow>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/search/search_documents.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![term], |row| {
        Ok(DocumentSearchRow {
            id: row.get(0)?,
            name: row.get(1)?,
            filepath: row.get(2)?,
            file_extension: row.get(3)?,
            presence: row.get(4)?,
            folder_name: row.get(5)?,
            match_quality: row.get(6)?,
        })
    })?;
    rows.collect()
}
