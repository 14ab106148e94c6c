//! Home page timeline.

use actix_web::{HttpResponse, web};

use warbler_core::services::TIMELINE_LIMIT;
use warbler_shared::dto::TimelineResponse;

use super::{message_response, user_response};
use crate::middleware::error::AppResult;
use crate::middleware::session::MaybeUser;
use crate::state::AppState;

/// GET / - own and followed users' messages, newest first. Anonymous
/// visitors get an empty timeline.
pub async fn home(state: web::Data<AppState>, current: MaybeUser) -> AppResult<HttpResponse> {
    let Some(current) = current.0 else {
        return Ok(HttpResponse::Ok().json(TimelineResponse {
            user: None,
            messages: Vec::new(),
        }));
    };

    let messages = state
        .messages
        .timeline(current.user.id, TIMELINE_LIMIT)
        .await?;

    Ok(HttpResponse::Ok().json(TimelineResponse {
        user: Some(user_response(&current.user)),
        messages: messages.iter().map(message_response).collect(),
    }))
}
