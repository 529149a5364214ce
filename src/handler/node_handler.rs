use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

use crate::model::repository::{Node, NodeConnection};
use crate::model::request::PresenceRequest;
use crate::model::response::error_response::ErrorResponse;
use crate::model::response::GraphResponse;
use crate::service::graph_service;
use crate::service::workspace::Workspace;

#[get("/graph")]
pub fn get_graph(workspace: &State<Workspace>) -> Result<Json<GraphResponse>, ErrorResponse> {
    Ok(Json(graph_service::get_graph(workspace)?))
}

#[get("/<id>")]
pub fn get_node(id: u32, workspace: &State<Workspace>) -> Result<Json<Node>, ErrorResponse> {
    Ok(Json(graph_service::get_node(workspace, id)?))
}

#[get("/<id>/connections")]
pub fn get_connections(
    id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<Vec<NodeConnection>>, ErrorResponse> {
    Ok(Json(graph_service::get_connections(workspace, id)?))
}

#[put("/<id>/presence", data = "<request>")]
pub fn update_presence(
    id: u32,
    request: Json<PresenceRequest>,
    workspace: &State<Workspace>,
) -> Result<Status, ErrorResponse> {
    graph_service::update_presence(workspace, id, request.presence)?;
    Ok(Status::NoContent)
}
