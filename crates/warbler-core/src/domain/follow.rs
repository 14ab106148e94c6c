use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed "follows" edge. `follower_id` follows `followed_id`.
///
/// The ordered pair is the whole identity; the reverse edge is a separate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
}

impl Follow {
    pub fn new(follower_id: Uuid, followed_id: Uuid) -> Self {
        Self {
            follower_id,
            followed_id,
        }
    }

    /// Whether `user_id` is on either end of the edge.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.follower_id == user_id || self.followed_id == user_id
    }
}
