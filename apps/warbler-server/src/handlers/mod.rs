//! HTTP handlers and route configuration.

mod auth;
mod health;
mod messages;
mod timeline;
mod users;


use std::sync::Arc;

use actix_web::web;

use warbler_core::domain::{Message, User};
use warbler_core::ports::RateLimiter;
use warbler_shared::dto::{MessageResponse, UserResponse};

use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes.
///
/// `auth_limiter` throttles signup and login per client IP.
pub fn configure_routes(cfg: &mut web::ServiceConfig, auth_limiter: Arc<dyn RateLimiter>) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/", web::get().to(timeline::home))
        // Auth routes
        .service(
            web::resource("/signup")
                .wrap(RateLimitMiddleware::new(auth_limiter.clone()))
                .route(web::post().to(auth::signup)),
        )
        .service(
            web::resource("/login")
                .wrap(RateLimitMiddleware::new(auth_limiter))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::post().to(auth::logout))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users))
                .route("/profile", web::post().to(users::update_profile))
                .route("/delete", web::post().to(users::delete_user))
                .route("/follow/{id}", web::post().to(users::add_follow))
                .route("/stop-following/{id}", web::post().to(users::stop_following))
                .route("/{id}", web::get().to(users::show_user))
                .route("/{id}/following", web::get().to(users::show_following))
                .route("/{id}/followers", web::get().to(users::show_followers)),
        )
        .service(
            web::scope("/messages")
                .route("/new", web::post().to(messages::new_message))
                .route("/{id}", web::get().to(messages::show_message))
                .route("/{id}/delete", web::post().to(messages::delete_message)),
        );
}

pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        image_url: user.image_url.clone(),
        header_image_url: user.header_image_url.clone(),
        bio: user.bio.clone(),
        location: user.location.clone(),
        created_at: user.created_at,
    }
}

pub(crate) fn user_list(users: &[User]) -> Vec<UserResponse> {
    users.iter().map(user_response).collect()
}

pub(crate) fn message_response(message: &Message) -> MessageResponse {
    MessageResponse {
        id: message.id,
        user_id: message.user_id,
        text: message.text.clone(),
        timestamp: message.timestamp,
    }
}
