use crate::model::error::{WorkspaceError, WorkspaceResult};
use crate::model::repository::{Node, NodeConnection};
use crate::model::response::GraphResponse;
use crate::repository::graph_repository;
use crate::service::workspace::Workspace;

pub fn get_node(workspace: &Workspace, id: u32) -> WorkspaceResult<Node> {
    let con = workspace.open_connection()?;
    graph_repository::get_node(id, &con)?
        .ok_or_else(|| WorkspaceError::not_found(format!("No node with id {id} exists")))
}

pub fn update_presence(workspace: &Workspace, id: u32, presence: f64) -> WorkspaceResult<()> {
    if !presence.is_finite() {
        return Err(WorkspaceError::validation(format!(
            "{presence} is not a valid presence"
        )));
    }
    workspace.write_transaction(|tx| {
        if graph_repository::update_presence(id, presence, tx)? == 0 {
            return Err(WorkspaceError::not_found(format!("No node with id {id} exists")));
        }
        Ok(())
    })
}

/// every node and every edge, for drawing the whole graph at once
pub fn get_graph(workspace: &Workspace) -> WorkspaceResult<GraphResponse> {
    let con = workspace.open_connection()?;
    Ok(GraphResponse {
        nodes: graph_repository::get_graph_nodes(&con)?,
        links: graph_repository::get_graph_links(&con)?,
    })
}

/// outgoing edges of the node
pub fn get_connections(workspace: &Workspace, id: u32) -> WorkspaceResult<Vec<NodeConnection>> {
    let con = workspace.open_connection()?;
    if graph_repository::get_node(id, &con)?.is_none() {
        return Err(WorkspaceError::not_found(format!("No node with id {id} exists")));
    }
    Ok(graph_repository::get_connections_from(id, &con)?)
}
