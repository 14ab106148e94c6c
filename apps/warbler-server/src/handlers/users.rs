//! User pages: search, profiles, follows and account management.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use warbler_core::DomainError;
use warbler_core::domain::UpdateProfile;
use warbler_shared::dto::{ProfileResponse, UpdateProfileRequest, UserSearchQuery};

use super::{message_response, user_list, user_response};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{CurrentUser, removal_cookie};
use crate::state::AppState;

/// GET /users?q=
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<UserSearchQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner().q.unwrap_or_default();
    let users = state.users.search(&q).await?;

    Ok(HttpResponse::Ok().json(user_list(&users)))
}

/// GET /users/{id}
pub async fn show_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let profile = state.users.profile(user_id).await?;
    let messages = state.users.messages(user_id).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: user_response(&profile.user),
        message_count: profile.message_count,
        follower_count: profile.follower_count,
        following_count: profile.following_count,
        messages: messages.iter().map(message_response).collect(),
    }))
}

/// GET /users/{id}/following
pub async fn show_following(
    state: web::Data<AppState>,
    _current: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    state.users.get(user_id).await?;
    let following = state.users.following(user_id).await?;

    Ok(HttpResponse::Ok().json(user_list(&following)))
}

/// GET /users/{id}/followers
pub async fn show_followers(
    state: web::Data<AppState>,
    _current: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    state.users.get(user_id).await?;
    let followers = state.users.followers(user_id).await?;

    Ok(HttpResponse::Ok().json(user_list(&followers)))
}

/// POST /users/follow/{id} - records `{id}` as a follower of the current user.
///
/// Responds with the current user's followers list.
pub async fn add_follow(
    state: web::Data<AppState>,
    current: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let follower_id = path.into_inner();
    state.users.follow(follower_id, current.user.id).await?;
    tracing::debug!(follower = %follower_id, followed = %current.user.id, "Follow added");

    let followers = state.users.followers(current.user.id).await?;
    Ok(HttpResponse::Ok().json(user_list(&followers)))
}

/// POST /users/stop-following/{id} - removes the edge `add_follow` records.
pub async fn stop_following(
    state: web::Data<AppState>,
    current: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let follower_id = path.into_inner();
    if state.users.unfollow(follower_id, current.user.id).await? {
        tracing::debug!(follower = %follower_id, followed = %current.user.id, "Follow removed");
    }

    let followers = state.users.followers(current.user.id).await?;
    Ok(HttpResponse::Ok().json(user_list(&followers)))
}

/// POST /users/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    current: CurrentUser,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = UpdateProfile {
        username: req.username,
        email: req.email,
        image_url: req.image_url,
        header_image_url: req.header_image_url,
        bio: req.bio,
        location: req.location,
    };

    let user = state
        .users
        .update_profile(current.user.id, &req.password, changes)
        .await
        .map_err(|e| match e {
            DomainError::Unauthorized => AppError::InvalidCredentials,
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}

/// POST /users/delete - delete the current account and log out.
pub async fn delete_user(
    state: web::Data<AppState>,
    current: CurrentUser,
) -> AppResult<HttpResponse> {
    state.users.delete_account(current.user.id).await?;
    state.sessions.destroy(&current.session_id).await?;
    tracing::info!(user_id = %current.user.id, "Account deleted");

    Ok(HttpResponse::NoContent().cookie(removal_cookie()).finish())
}
