use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest message a user may post, in characters.
pub const MAX_MESSAGE_LEN: usize = 140;

/// Message entity - a short post owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message, rejecting empty or over-long text.
    pub fn new(user_id: Uuid, text: &str) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation("Message text is required".to_string()));
        }
        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(DomainError::Validation(format!(
                "Message text must be at most {MAX_MESSAGE_LEN} characters"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            text: text.to_string(),
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_trims_text() {
        let msg = Message::new(Uuid::new_v4(), "  hello warbler  ").unwrap();
        assert_eq!(msg.text, "hello warbler");
    }

    #[test]
    fn test_blank_message_rejected() {
        assert!(matches!(
            Message::new(Uuid::new_v4(), "   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let exactly = "é".repeat(MAX_MESSAGE_LEN);
        assert!(Message::new(Uuid::new_v4(), &exactly).is_ok());

        let too_long = "a".repeat(MAX_MESSAGE_LEN + 1);
        assert!(matches!(
            Message::new(Uuid::new_v4(), &too_long),
            Err(DomainError::Validation(_))
        ));
    }
}
