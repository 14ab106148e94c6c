//! Message endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use warbler_shared::dto::NewMessageRequest;

use super::message_response;
use crate::middleware::error::AppResult;
use crate::middleware::session::CurrentUser;
use crate::state::AppState;

/// POST /messages/new
pub async fn new_message(
    state: web::Data<AppState>,
    current: CurrentUser,
    body: web::Json<NewMessageRequest>,
) -> AppResult<HttpResponse> {
    let message = state.messages.create(current.user.id, &body.text).await?;

    Ok(HttpResponse::Created().json(message_response(&message)))
}

/// GET /messages/{id}
pub async fn show_message(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let message = state.messages.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(message_response(&message)))
}

/// POST /messages/{id}/delete - only the author may delete.
pub async fn delete_message(
    state: web::Data<AppState>,
    current: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let message_id = path.into_inner();
    state.messages.delete(current.user.id, message_id).await?;
    tracing::debug!(user_id = %current.user.id, message_id = %message_id, "Message deleted");

    Ok(HttpResponse::NoContent().finish())
}
