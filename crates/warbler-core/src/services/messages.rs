//! Message operations: posting, reading, deleting and the home timeline.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Message;
use crate::error::DomainError;
use crate::ports::{FollowRepository, MessageRepository};

/// How many messages the home timeline shows by default.
pub const TIMELINE_LIMIT: u64 = 100;

#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { messages, follows }
    }

    pub async fn create(&self, author_id: Uuid, text: &str) -> Result<Message, DomainError> {
        let message = Message::new(author_id, text)?;
        Ok(self.messages.insert(message).await?)
    }

    pub async fn get(&self, message_id: Uuid) -> Result<Message, DomainError> {
        self.messages
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Message",
                id: message_id,
            })
    }

    /// Delete a message. Only its owner may do so.
    pub async fn delete(&self, actor_id: Uuid, message_id: Uuid) -> Result<(), DomainError> {
        let message = self.get(message_id).await?;
        if message.user_id != actor_id {
            return Err(DomainError::Forbidden);
        }
        self.messages.delete(message_id).await?;
        Ok(())
    }

    /// Newest messages from `user_id` and everyone they follow.
    pub async fn timeline(&self, user_id: Uuid, limit: u64) -> Result<Vec<Message>, DomainError> {
        let mut authors = self.follows.following_ids(user_id).await?;
        authors.push(user_id);
        Ok(self.messages.find_by_authors(&authors, limit).await?)
    }
}
