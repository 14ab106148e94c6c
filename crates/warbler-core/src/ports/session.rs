//! Session port - server-side login state keyed by an opaque session id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Data stored for a logged-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// The logged-in user.
    pub curr_user: Uuid,
}

/// Session store trait - abstraction over where session data lives.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Start a session for `user_id` and return its id.
    async fn create(&self, user_id: Uuid) -> Result<String, SessionError>;

    /// Load the session, if it exists and has not expired.
    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, SessionError>;

    /// End a session. Unknown ids are not an error.
    async fn destroy(&self, session_id: &str) -> Result<(), SessionError>;
}

/// Session backend errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session backend error: {0}")]
    Backend(String),

    #[error("Session data corrupted: {0}")]
    Serialization(String),
}
