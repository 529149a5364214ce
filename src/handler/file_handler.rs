use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;

use crate::model::file_types::file_encoding;
use crate::model::repository::{Document, Folder, WorkspaceEntry};
use crate::model::request::{
    ChangeExtensionRequest, FileContentRequest, FolderRequest, MovePathRequest, RenameRequest,
};
use crate::model::response::error_response::ErrorResponse;
use crate::model::response::{BasicMessage, FileContentResponse, NameResponse, SearchResults, TreeNode};
use crate::service::paths::RelativePath;
use crate::service::workspace::Workspace;
use crate::service::{search_service, sync_service, tree_service};

#[get("/tree")]
pub fn get_tree(workspace: &State<Workspace>) -> Result<Json<TreeNode>, ErrorResponse> {
    Ok(Json(tree_service::get_database_file_tree(workspace)?))
}

#[get("/search?<term>")]
pub fn search(term: &str, workspace: &State<Workspace>) -> Result<Json<SearchResults>, ErrorResponse> {
    Ok(Json(search_service::search_database(workspace, term)?))
}

#[get("/content?<path>")]
pub fn read_file(
    path: &str,
    workspace: &State<Workspace>,
) -> Result<Json<FileContentResponse>, ErrorResponse> {
    let file = sync_service::read_file(workspace, path)?;
    let content = if file.encoding.binary {
        STANDARD.encode(&file.bytes)
    } else {
        String::from_utf8_lossy(&file.bytes).to_string()
    };
    Ok(Json(FileContentResponse {
        path: file.path.to_string(),
        extension: file.extension,
        binary: file.encoding.binary,
        encoding: file.encoding.encoding.map(str::to_string),
        content,
    }))
}

#[get("/<id>/path")]
pub fn get_document_path(
    id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<BasicMessage>, ErrorResponse> {
    let path = sync_service::get_document_path(workspace, id)?;
    Ok(Json(path.to_string().into()))
}

#[get("/<id>/name")]
pub fn get_document_name(
    id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<NameResponse>, ErrorResponse> {
    let name = sync_service::get_document_name(workspace, id)?;
    Ok(Json(NameResponse { name }))
}

#[get("/folder/<id>/path")]
pub fn get_folder_path(
    id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<BasicMessage>, ErrorResponse> {
    let path = sync_service::get_folder_path(workspace, id)?;
    Ok(Json(path.to_string().into()))
}

#[get("/folder/<id>/name")]
pub fn get_folder_name(
    id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<NameResponse>, ErrorResponse> {
    let name = sync_service::get_folder_name(workspace, id)?;
    Ok(Json(NameResponse { name }))
}

#[post("/", data = "<request>")]
pub fn create_file(
    request: Json<FileContentRequest>,
    workspace: &State<Workspace>,
) -> Result<Custom<Json<Document>>, ErrorResponse> {
    let content = decode_content(&request.path, &request.content)?;
    let document = sync_service::create_file(workspace, &request.path, &content)?;
    Ok(Custom(Status::Created, Json(document)))
}

#[put("/content", data = "<request>")]
pub fn write_file(
    request: Json<FileContentRequest>,
    workspace: &State<Workspace>,
) -> Result<Status, ErrorResponse> {
    let content = decode_content(&request.path, &request.content)?;
    sync_service::write_file(workspace, &request.path, &content)?;
    Ok(Status::NoContent)
}

#[post("/folder", data = "<request>")]
pub fn create_folder(
    request: Json<FolderRequest>,
    workspace: &State<Workspace>,
) -> Result<Custom<Json<Folder>>, ErrorResponse> {
    let folder = sync_service::create_folder(workspace, &request.path)?;
    Ok(Custom(Status::Created, Json(folder)))
}

#[delete("/?<path>")]
pub fn delete_path(path: &str, workspace: &State<Workspace>) -> Result<Status, ErrorResponse> {
    sync_service::delete_path(workspace, path)?;
    Ok(Status::NoContent)
}

#[put("/move", data = "<request>")]
pub fn move_path(
    request: Json<MovePathRequest>,
    workspace: &State<Workspace>,
) -> Result<Json<WorkspaceEntry>, ErrorResponse> {
    Ok(Json(sync_service::move_path(
        workspace,
        &request.source,
        &request.destination,
    )?))
}

#[put("/rename", data = "<request>")]
pub fn rename_file(
    request: Json<RenameRequest>,
    workspace: &State<Workspace>,
) -> Result<Json<Document>, ErrorResponse> {
    Ok(Json(sync_service::rename_file(
        workspace,
        &request.path,
        &request.name,
    )?))
}

#[put("/folder/rename", data = "<request>")]
pub fn rename_folder(
    request: Json<RenameRequest>,
    workspace: &State<Workspace>,
) -> Result<Json<Folder>, ErrorResponse> {
    Ok(Json(sync_service::rename_folder(
        workspace,
        &request.path,
        &request.name,
    )?))
}

#[put("/extension", data = "<request>")]
pub fn change_file_extension(
    request: Json<ChangeExtensionRequest>,
    workspace: &State<Workspace>,
) -> Result<Json<Document>, ErrorResponse> {
    Ok(Json(sync_service::change_file_extension(
        workspace,
        &request.path,
        &request.extension,
    )?))
}

/// binary documents travel as base64, text documents as is
fn decode_content(path: &str, content: &str) -> Result<Vec<u8>, ErrorResponse> {
    let extension = RelativePath::parse(path)?.extension();
    if !file_encoding(&extension).binary {
        return Ok(content.as_bytes().to_vec());
    }
    STANDARD.decode(content).map_err(|e| {
        ErrorResponse::BadRequest(Json(
            format!("Content for binary files must be base64: {e}").into(),
        ))
    })
}
