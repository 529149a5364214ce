use rusqlite::{Connection, OptionalExtension};

use crate::model::repository::{NodeTag, Tag};

/// inserts the Tags row for an already-created node. This does not check if the tag already exists,
/// so the caller must check that themselves
pub fn create_tag(node_id: u32, name: &str, con: &Connection) -> Result<Tag, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/create_tag.sql"))?;
    pst.execute(rusqlite::params![node_id, name])?;
    Ok(Tag {
        id: node_id,
        name: name.to_string(),
        presence: 0.0,
    })
}

/// searches for a tag that case-insensitively matches that passed name.
///
/// if `None` is returned, that means there was no match
pub fn get_by_name(name: &str, con: &Connection) -> Result<Option<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_name.sql"))?;
    pst.query_row(rusqlite::params![name], tag_mapper).optional()
}

pub fn get_by_id(id: u32, con: &Connection) -> Result<Option<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/get_by_id.sql"))?;
    pst.query_row(rusqlite::params![id], tag_mapper).optional()
}

pub fn list_tags(con: &Connection) -> Result<Vec<Tag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/list_tags.sql"))?;
    let rows = pst.query_map([], tag_mapper)?;
    rows.collect()
}

/// checking to make sure the tag exists needs to be done on the caller's end
pub fn rename_tag(id: u32, name: &str, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/tags/rename_tag.sql"))?;
    pst.execute(rusqlite::params![name, id])
}

/// every tag the node has an outgoing Tagged connection to
pub fn get_tags_for_node(node_id: u32, con: &Connection) -> Result<Vec<NodeTag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/tags/get_tags_for_node.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![node_id], |row| {
        Ok(NodeTag {
            tag: tag_mapper(row)?,
            inherited: row.get::<_, i64>(3)? != 0,
        })
    })?;
    rows.collect()
}

fn tag_mapper(row: &rusqlite::Row) -> Result<Tag, rusqlite::Error> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        presence: row.get(2)?,
    })
}
