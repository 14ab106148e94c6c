//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to sign up a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request to edit the current user's profile. The current password is
/// always required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub header_image_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub password: String,
}

/// Request to post a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageRequest {
    pub text: String,
}

/// Query string of the user search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// A user's public information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A user's profile page: details, counts and their messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub message_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
    pub messages: Vec<MessageResponse>,
}

/// The home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    /// The logged-in user, or `None` for anonymous visitors.
    pub user: Option<UserResponse>,
    pub messages: Vec<MessageResponse>,
}
