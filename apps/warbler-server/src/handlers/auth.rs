//! Signup, login and logout.

use actix_web::{HttpResponse, web};

use warbler_core::domain::NewUser;
use warbler_infra::database::mask_email;
use warbler_shared::dto::{LoginRequest, SignupRequest};

use super::user_response;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{CurrentUser, removal_cookie, session_cookie};
use crate::state::AppState;

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(vec![format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )]));
    }

    let user = state
        .users
        .signup(NewUser {
            username: req.username,
            email: req.email,
            password: req.password,
            image_url: req.image_url,
        })
        .await?;

    tracing::info!(
        user_id = %user.id,
        email = %mask_email(&user.email),
        "User signed up"
    );

    let session_id = state.sessions.create(user.id).await?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(&session_id, &state.session_config))
        .json(user_response(&user)))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let Some(user) = state.users.authenticate(&req.username, &req.password).await? else {
        tracing::warn!(username = %req.username, "Failed login");
        return Err(AppError::InvalidCredentials);
    };

    let session_id = state.sessions.create(user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&session_id, &state.session_config))
        .json(user_response(&user)))
}

/// POST /logout
pub async fn logout(state: web::Data<AppState>, current: CurrentUser) -> AppResult<HttpResponse> {
    state.sessions.destroy(&current.session_id).await?;
    tracing::info!(user_id = %current.user.id, "User logged out");

    Ok(HttpResponse::NoContent().cookie(removal_cookie()).finish())
}
