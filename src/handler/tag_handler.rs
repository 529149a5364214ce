use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;

use crate::model::repository::{InheritedTag, NodeTag, Tag};
use crate::model::request::TagRequest;
use crate::model::response::error_response::ErrorResponse;
use crate::model::response::TagCascadeResponse;
use crate::service::tag_service;
use crate::service::workspace::Workspace;

#[get("/")]
pub fn list_tags(workspace: &State<Workspace>) -> Result<Json<Vec<Tag>>, ErrorResponse> {
    Ok(Json(tag_service::list_tags(workspace)?))
}

#[get("/<id>")]
pub fn get_tag(id: u32, workspace: &State<Workspace>) -> Result<Json<Tag>, ErrorResponse> {
    Ok(Json(tag_service::get_tag(workspace, id)?))
}

#[post("/", data = "<request>")]
pub fn create_tag(
    request: Json<TagRequest>,
    workspace: &State<Workspace>,
) -> Result<Custom<Json<Tag>>, ErrorResponse> {
    let tag = tag_service::create_tag(workspace, &request.name)?;
    Ok(Custom(Status::Created, Json(tag)))
}

#[put("/<id>", data = "<request>")]
pub fn rename_tag(
    id: u32,
    request: Json<TagRequest>,
    workspace: &State<Workspace>,
) -> Result<Json<Tag>, ErrorResponse> {
    Ok(Json(tag_service::rename_tag(workspace, id, &request.name)?))
}

#[delete("/<id>")]
pub fn delete_tag(id: u32, workspace: &State<Workspace>) -> Result<Status, ErrorResponse> {
    tag_service::delete_tag(workspace, id)?;
    Ok(Status::NoContent)
}

#[get("/<id>/inherited", rank = 2)]
pub fn get_inherited_tags(
    id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<Vec<InheritedTag>>, ErrorResponse> {
    Ok(Json(tag_service::get_inherited_tags(workspace, id)?))
}

#[get("/node/<node_id>")]
pub fn get_tags_for_node(
    node_id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<Vec<NodeTag>>, ErrorResponse> {
    Ok(Json(tag_service::get_tags_for_node(workspace, node_id)?))
}

#[post("/node/<node_id>/tag/<tag_id>")]
pub fn tag_node(
    node_id: u32,
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Status, ErrorResponse> {
    tag_service::tag_node(workspace, tag_id, node_id)?;
    Ok(Status::NoContent)
}

#[delete("/node/<node_id>/tag/<tag_id>")]
pub fn untag_node(
    node_id: u32,
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Status, ErrorResponse> {
    tag_service::untag_node(workspace, tag_id, node_id)?;
    Ok(Status::NoContent)
}

#[post("/document/<document_id>/tag/<tag_id>")]
pub fn tag_document(
    document_id: u32,
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<TagCascadeResponse>, ErrorResponse> {
    let connections = tag_service::tag_document_cascade(workspace, document_id, tag_id)?;
    Ok(Json(TagCascadeResponse { connections }))
}

#[delete("/document/<document_id>/tag/<tag_id>")]
pub fn untag_document(
    document_id: u32,
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<TagCascadeResponse>, ErrorResponse> {
    let connections = tag_service::untag_document_cascade(workspace, document_id, tag_id)?;
    Ok(Json(TagCascadeResponse { connections }))
}

#[post("/folder/<folder_id>/tag/<tag_id>")]
pub fn tag_folder(
    folder_id: u32,
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<TagCascadeResponse>, ErrorResponse> {
    let connections = tag_service::tag_folder_cascade(workspace, folder_id, tag_id)?;
    Ok(Json(TagCascadeResponse { connections }))
}

#[post("/flashcard/<flashcard_id>/tag/<tag_id>")]
pub fn tag_flashcard(
    flashcard_id: u32,
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Status, ErrorResponse> {
    tag_service::tag_flashcard(workspace, flashcard_id, tag_id)?;
    Ok(Status::NoContent)
}

#[delete("/flashcard/<flashcard_id>/tag/<tag_id>")]
pub fn untag_flashcard(
    flashcard_id: u32,
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Status, ErrorResponse> {
    tag_service::untag_flashcard(workspace, flashcard_id, tag_id)?;
    Ok(Status::NoContent)
}
