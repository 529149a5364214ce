use rusqlite::{Connection, OptionalExtension};

use crate::model::repository::Folder;

pub fn get_by_path(filepath: &str, con: &Connection) -> Result<Option<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folder_by_path.sql"
    ))?;
    pst.query_row(rusqlite::params![filepath], folder_mapper)
        .optional()
}

pub fn get_by_id(id: u32, con: &Connection) -> Result<Option<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/folder/get_folder_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], folder_mapper).optional()
}

pub fn get_by_node_id(node_id: u32, con: &Connection) -> Result<Option<Folder>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_folder_by_node_id.sql"
    ))?;
    pst.query_row(rusqlite::params![node_id], folder_mapper)
        .optional()
}

/// inserts the Folders row for an already-created node. The caller is responsible for
/// the structural connection to the parent
pub fn create_folder(
    name: &str,
    filepath: &str,
    node_id: u32,
    parent_folder_id: Option<u32>,
    con: &Connection,
) -> Result<Folder, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/folder/create_folder.sql"))?;
    let id = pst.insert(rusqlite::params![name, filepath, node_id, parent_folder_id])? as u32;
    Ok(Folder {
        id,
        name: name.to_string(),
        filepath: filepath.to_string(),
        node_id,
        parent_folder_id,
    })
}

/// points the folder at a new name, path, and parent. Descendants are not touched, see [`rewrite_path_prefix`]
pub fn update_location(
    id: u32,
    name: &str,
    filepath: &str,
    parent_folder_id: Option<u32>,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/update_folder_location.sql"
    ))?;
    pst.execute(rusqlite::params![name, filepath, parent_folder_id, id])
}

/// replaces `old_prefix` with `new_prefix` on every folder path that starts with `old_prefix`.
///
/// both prefixes must end with a path separator, otherwise `/a/b` would also match `/a/bc`
pub fn rewrite_path_prefix(
    old_prefix: &str,
    new_prefix: &str,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/rewrite_path_prefix.sql"
    ))?;
    pst.execute(rusqlite::params![old_prefix, new_prefix])
}

/// every node under the folder (flashcards, documents, and sub folders) as well as the folder's own node
pub fn get_subtree_node_ids(id: u32, con: &Connection) -> Result<Vec<u32>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/folder/get_subtree_node_ids.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![id], |row| row.get::<_, u32>(0))?;
    rows.collect()
}

fn folder_mapper(row: &rusqlite::Row) -> Result<Folder, rusqlite::Error> {
    Ok(Folder {
        id: row.get(0)?,
        name: row.get(1)?,
        filepath: row.get(2)?,
        node_id: row.get(3)?,
        parent_folder_id: row.get(4)?,
    })
}
