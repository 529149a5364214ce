use rusqlite::{Connection, OptionalExtension};

use crate::model::error::{WorkspaceError, WorkspaceResult};
use crate::model::repository::{
    ConnectionType, Folder, GraphNode, InheritedTag, Node, NodeConnection, NodeKind, NodeType,
};
use crate::repository::{document_repository, flashcard_repository, folder_repository, tag_repository};

/// inserts a new row into Nodes and returns its id.
///
/// Fails if the node type is not seeded in Node_types
pub fn create_node(
    node_type: NodeType,
    presence: f64,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/graph/create_node.sql"))?;
    Ok(pst.insert(rusqlite::params![node_type, presence])? as u32)
}

/// inserts a directed edge and returns its id. Duplicate edges are allowed
pub fn connect(
    origin_id: u32,
    destiny_id: u32,
    connection_type: ConnectionType,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/graph/create_connection.sql"
    ))?;
    Ok(pst.insert(rusqlite::params![origin_id, destiny_id, connection_type])? as u32)
}

/// removes every edge of `connection_type` from `origin_id` to `destiny_id`, returning how many were removed
pub fn disconnect(
    origin_id: u32,
    destiny_id: u32,
    connection_type: ConnectionType,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/graph/delete_connections_between.sql"
    ))?;
    pst.execute(rusqlite::params![origin_id, destiny_id, connection_type])
}

pub fn get_connections_between(
    origin_id: u32,
    destiny_id: u32,
    connection_type: ConnectionType,
    con: &Connection,
) -> Result<Vec<NodeConnection>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/graph/get_connections_between.sql"
    ))?;
    let rows = pst.query_map(
        rusqlite::params![origin_id, destiny_id, connection_type],
        connection_mapper,
    )?;
    rows.collect()
}

/// outgoing edges of the node
pub fn get_connections_from(
    origin_id: u32,
    con: &Connection,
) -> Result<Vec<NodeConnection>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/graph/get_connections_for_node.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![origin_id], connection_mapper)?;
    rows.collect()
}

/// records that `connection_id` was created by cascading `tag_id`
pub fn record_inherited_tag(
    connection_id: u32,
    tag_id: u32,
    con: &Connection,
) -> Result<u32, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/graph/create_inherited_tag.sql"
    ))?;
    Ok(pst.insert(rusqlite::params![connection_id, tag_id])? as u32)
}

pub fn get_inherited_tags(
    tag_id: u32,
    con: &Connection,
) -> Result<Vec<InheritedTag>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/graph/get_inherited_tags_for_tag.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![tag_id], |row| {
        Ok(InheritedTag {
            id: row.get(0)?,
            connection_id: row.get(1)?,
            tag_id: row.get(2)?,
        })
    })?;
    rows.collect()
}

/// returns the folder stored at `filepath`, creating its node, its row, and the
/// Contains edge from its parent if it doesn't exist yet.
///
/// Calling this twice with the same path never creates a second row
pub fn create_or_get_folder(
    name: &str,
    filepath: &str,
    parent_folder_id: Option<u32>,
    con: &Connection,
) -> Result<Folder, rusqlite::Error> {
    if let Some(existing) = folder_repository::get_by_path(filepath, con)? {
        return Ok(existing);
    }
    let node_id = create_node(NodeType::Folder, 0.0, con)?;
    let folder = folder_repository::create_folder(name, filepath, node_id, parent_folder_id, con)?;
    if let Some(parent_id) = parent_folder_id {
        let parent = folder_repository::get_by_id(parent_id, con)?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        connect(parent.node_id, node_id, ConnectionType::Contains, con)?;
    }
    log::debug!("created folder {filepath} with node {node_id}");
    Ok(folder)
}

/// deletes the node. Payload rows, edges, and inherited tag records go with it through cascades
pub fn delete_node(id: u32, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/graph/delete_node.sql"))?;
    pst.execute(rusqlite::params![id])
}

pub fn update_presence(id: u32, presence: f64, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/graph/update_presence.sql"))?;
    pst.execute(rusqlite::params![presence, id])
}

/// retrieves the node and decodes its payload based on its type
pub fn get_node(id: u32, con: &Connection) -> WorkspaceResult<Option<Node>> {
    let mut pst = con.prepare(include_str!("../assets/queries/graph/get_node.sql"))?;
    let header = pst
        .query_row(rusqlite::params![id], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, f64>(2)?))
        })
        .optional()?;
    let Some((type_name, presence)) = header else {
        return Ok(None);
    };
    let missing_payload =
        || WorkspaceError::Store(format!("Node {id} of type {type_name} has no payload row"));
    let kind = match NodeType::try_from(type_name.as_str())? {
        NodeType::Folder => NodeKind::Folder(
            folder_repository::get_by_node_id(id, con)?.ok_or_else(missing_payload)?,
        ),
        NodeType::Document => NodeKind::Document(
            document_repository::get_by_node_id(id, con)?.ok_or_else(missing_payload)?,
        ),
        NodeType::Flashcard => NodeKind::Flashcard(
            flashcard_repository::get_by_node_id(id, con)?.ok_or_else(missing_payload)?,
        ),
        NodeType::Tag => {
            NodeKind::Tag(tag_repository::get_by_id(id, con)?.ok_or_else(missing_payload)?)
        }
    };
    Ok(Some(Node { id, presence, kind }))
}

pub fn get_graph_nodes(con: &Connection) -> WorkspaceResult<Vec<GraphNode>> {
    let mut pst = con.prepare(include_str!("../assets/queries/graph/get_graph_nodes.sql"))?;
    let rows = pst.query_map([], |row| {
        Ok((
            row.get::<_, u32>(0)?,
            row.get::<_, f64>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;
    let mut nodes = Vec::new();
    for row in rows {
        let (id, presence, name, type_name) = row?;
        nodes.push(GraphNode {
            id,
            presence,
            name: name.unwrap_or_default(),
            node_type: NodeType::try_from(type_name.as_str())?,
        });
    }
    Ok(nodes)
}

pub fn get_graph_links(con: &Connection) -> Result<Vec<NodeConnection>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!("../assets/queries/graph/get_graph_links.sql"))?;
    let rows = pst.query_map([], connection_mapper)?;
    rows.collect()
}

fn connection_mapper(row: &rusqlite::Row) -> Result<NodeConnection, rusqlite::Error> {
    let type_name: String = row.get(3)?;
    let connection_type = ConnectionType::try_from(type_name.as_str()).map_err(|_| {
        rusqlite::Error::InvalidColumnType(3, type_name.clone(), rusqlite::types::Type::Text)
    })?;
    Ok(NodeConnection {
        id: row.get(0)?,
        origin_id: row.get(1)?,
        destiny_id: row.get(2)?,
        connection_type,
    })
}
