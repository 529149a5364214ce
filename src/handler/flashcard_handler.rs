use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::State;

use crate::model::repository::{Flashcard, Highlight};
use crate::model::request::{CreateFlashcardRequest, HighlightRequest, UpdateFlashcardRequest};
use crate::model::response::error_response::ErrorResponse;
use crate::service::flashcard_service;
use crate::service::workspace::Workspace;

#[post("/", data = "<request>")]
pub fn create_flashcard(
    request: Json<CreateFlashcardRequest>,
    workspace: &State<Workspace>,
) -> Result<Custom<Json<Flashcard>>, ErrorResponse> {
    let flashcard = flashcard_service::create_flashcard(
        workspace,
        request.document_id,
        &request.name,
        request.front.as_deref(),
        request.back.as_deref(),
    )?;
    Ok(Custom(Status::Created, Json(flashcard)))
}

#[get("/document/<document_id>")]
pub fn get_for_document(
    document_id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<Vec<Flashcard>>, ErrorResponse> {
    Ok(Json(flashcard_service::get_flashcards_for_document(
        workspace,
        document_id,
    )?))
}

#[get("/folder/<folder_id>")]
pub fn get_for_folder(
    folder_id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<Vec<Flashcard>>, ErrorResponse> {
    Ok(Json(flashcard_service::get_flashcards_for_folder(
        workspace, folder_id,
    )?))
}

#[get("/tag/<tag_id>")]
pub fn get_for_tag(
    tag_id: u32,
    workspace: &State<Workspace>,
) -> Result<Json<Vec<Flashcard>>, ErrorResponse> {
    Ok(Json(flashcard_service::get_flashcards_for_tag(workspace, tag_id)?))
}

#[put("/<id>", data = "<request>")]
pub fn update_flashcard(
    id: u32,
    request: Json<UpdateFlashcardRequest>,
    workspace: &State<Workspace>,
) -> Result<Json<Flashcard>, ErrorResponse> {
    Ok(Json(flashcard_service::update_flashcard(
        workspace,
        id,
        &request.name,
        request.front.as_deref(),
        request.back.as_deref(),
    )?))
}

#[post("/<id>/highlight", data = "<request>")]
pub fn set_highlight(
    id: u32,
    request: Json<HighlightRequest>,
    workspace: &State<Workspace>,
) -> Result<Custom<Json<Highlight>>, ErrorResponse> {
    let highlight = flashcard_service::set_highlight(workspace, id, &request)?;
    Ok(Custom(Status::Created, Json(highlight)))
}

#[get("/<id>/highlight", rank = 2)]
pub fn get_highlight(id: u32, workspace: &State<Workspace>) -> Result<Json<Highlight>, ErrorResponse> {
    Ok(Json(flashcard_service::get_highlight(workspace, id)?))
}

#[delete("/<id>")]
pub fn delete_flashcard(id: u32, workspace: &State<Workspace>) -> Result<Status, ErrorResponse> {
    flashcard_service::delete_flashcard(workspace, id)?;
    Ok(Status::NoContent)
}
