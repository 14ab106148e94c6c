//! User account operations: signup, authentication, profiles and follows.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Follow, Message, NewUser, UpdateProfile, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{FollowRepository, MessageRepository, PasswordService, UserRepository};

/// A user together with the counts shown on their profile.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub message_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
}

/// User service - the validated paths for creating and changing accounts.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    messages: Arc<dyn MessageRepository>,
    follows: Arc<dyn FollowRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        messages: Arc<dyn MessageRepository>,
        follows: Arc<dyn FollowRepository>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            messages,
            follows,
            passwords,
        }
    }

    /// Sign up a new user.
    ///
    /// Fails with `Validation` for an empty username, a malformed email or an
    /// empty password, and with `Duplicate` when the username or email is
    /// already taken. On failure nothing is persisted.
    pub async fn signup(&self, new_user: NewUser) -> Result<User, DomainError> {
        let new_user = new_user.validate()?;

        if self.users.find_by_username(&new_user.username).await?.is_some() {
            return Err(DomainError::Duplicate("Username already taken".to_string()));
        }
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = self.passwords.hash(&new_user.password)?;
        let user = User::new(
            new_user.username,
            new_user.email,
            password_hash,
            new_user.image_url,
        );

        // A concurrent signup can still win the race; the unique constraint
        // turns that into Duplicate as well.
        Ok(self.users.insert(user).await?)
    }

    /// Look up `username` and check `password` against its hash.
    ///
    /// Unknown users and wrong passwords are both `Ok(None)`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };

        if self.passwords.verify(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "User",
                id: user_id,
            })
    }

    /// Like [`get`](Self::get), but an absent user is `None` instead of an error.
    pub async fn find(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.find_by_id(user_id).await?)
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile, DomainError> {
        let user = self.get(user_id).await?;
        let message_count = self.messages.count_by_user_id(user_id).await?;
        let follower_count = self.follows.follower_ids(user_id).await?.len() as u64;
        let following_count = self.follows.following_ids(user_id).await?.len() as u64;

        Ok(UserProfile {
            user,
            message_count,
            follower_count,
            following_count,
        })
    }

    /// Users whose username contains `query`; an empty query lists everyone.
    pub async fn search(&self, query: &str) -> Result<Vec<User>, DomainError> {
        Ok(self.users.search(query.trim()).await?)
    }

    /// The user's messages, newest first.
    pub async fn messages(&self, user_id: Uuid) -> Result<Vec<Message>, DomainError> {
        Ok(self.messages.find_by_user_id(user_id).await?)
    }

    /// Users following `user_id`.
    pub async fn followers(&self, user_id: Uuid) -> Result<Vec<User>, DomainError> {
        let ids = self.follows.follower_ids(user_id).await?;
        Ok(self.users.find_many(&ids).await?)
    }

    /// Users `user_id` follows.
    pub async fn following(&self, user_id: Uuid) -> Result<Vec<User>, DomainError> {
        let ids = self.follows.following_ids(user_id).await?;
        Ok(self.users.find_many(&ids).await?)
    }

    /// Does `user_id` follow `other_id`?
    pub async fn is_following(&self, user_id: Uuid, other_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.follows.exists(Follow::new(user_id, other_id)).await?)
    }

    /// Is `user_id` followed by `other_id`?
    pub async fn is_followed_by(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> Result<bool, DomainError> {
        Ok(self.follows.exists(Follow::new(other_id, user_id)).await?)
    }

    /// Make `follower_id` follow `followed_id`. Following twice is a no-op.
    ///
    /// Both users must exist; following yourself is a `Validation` error.
    pub async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<(), DomainError> {
        if follower_id == followed_id {
            return Err(DomainError::Validation(
                "You cannot follow yourself".to_string(),
            ));
        }
        self.get(follower_id).await?;
        self.get(followed_id).await?;

        match self.follows.add(Follow::new(follower_id, followed_id)).await {
            // One side vanished between the lookups and the insert.
            Err(RepoError::Constraint(_)) => {
                let id = if self.find(follower_id).await?.is_none() {
                    follower_id
                } else {
                    followed_id
                };
                Err(DomainError::NotFound {
                    entity_type: "User",
                    id,
                })
            }
            other => Ok(other?),
        }
    }

    /// Remove the `follower_id` -> `followed_id` edge. Returns whether one
    /// was removed.
    pub async fn unfollow(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<bool, DomainError> {
        self.get(follower_id).await?;
        self.get(followed_id).await?;
        Ok(self
            .follows
            .remove(Follow::new(follower_id, followed_id))
            .await?)
    }

    /// Change profile fields after re-checking the current password.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        password: &str,
        changes: UpdateProfile,
    ) -> Result<User, DomainError> {
        let user = self.get(user_id).await?;
        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(DomainError::Unauthorized);
        }

        if let Some(username) = changes.username.as_deref().map(str::trim) {
            if username != user.username && self.users.find_by_username(username).await?.is_some()
            {
                return Err(DomainError::Duplicate("Username already taken".to_string()));
            }
        }
        if let Some(email) = changes.email.as_deref().map(str::trim) {
            if email != user.email && self.users.find_by_email(email).await?.is_some() {
                return Err(DomainError::Duplicate("Email already registered".to_string()));
            }
        }

        let updated = changes.apply_to(user)?;
        Ok(self.users.update(updated).await?)
    }

    /// Delete the account along with its messages and follow edges.
    ///
    /// The user row goes first. Where the schema cascades, that one statement
    /// removes the messages and edges too and the sweeps below find nothing.
    pub async fn delete_account(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.get(user_id).await?;
        self.users.delete(user_id).await?;
        self.messages.delete_by_user_id(user_id).await?;
        self.follows.remove_all_for(user_id).await?;
        Ok(())
    }
}
