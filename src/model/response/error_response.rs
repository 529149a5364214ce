use rocket::serde::json::Json;

use crate::model::error::WorkspaceError;
use crate::model::response::BasicMessage;

/// the failure half of every handler's return type
#[derive(Responder)]
pub enum ErrorResponse {
    #[response(status = 404, content_type = "json")]
    NotFound(Json<BasicMessage>),
    #[response(status = 409, content_type = "json")]
    Conflict(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    ServerError(Json<BasicMessage>),
}

impl From<WorkspaceError> for ErrorResponse {
    fn from(value: WorkspaceError) -> Self {
        match value {
            WorkspaceError::NotFound(message) => Self::NotFound(Json(message.into())),
            WorkspaceError::Conflict(message) => Self::Conflict(Json(message.into())),
            WorkspaceError::Validation(message) => Self::BadRequest(Json(message.into())),
            WorkspaceError::Io(_) => Self::ServerError(BasicMessage::new(
                "Failed to access the workspace on disk. Check server logs for details",
            )),
            WorkspaceError::Store(_) => Self::ServerError(BasicMessage::new(
                "Failed to access the database. Check server logs for details",
            )),
        }
    }
}
