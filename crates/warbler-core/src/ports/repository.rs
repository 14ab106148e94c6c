use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Follow, Message, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique violations are `RepoError::Constraint`
    /// and leave nothing behind.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Users whose username contains `query`, case-insensitively.
    async fn search(&self, query: &str) -> Result<Vec<User>, RepoError>;

    /// Fetch several users at once; missing ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Message repository.
#[async_trait]
pub trait MessageRepository: BaseRepository<Message, Uuid> {
    /// Messages by `user_id`, newest first.
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Message>, RepoError>;

    /// Newest `limit` messages written by any of `user_ids`.
    async fn find_by_authors(
        &self,
        user_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Message>, RepoError>;

    async fn count_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError>;

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError>;
}

/// Follows repository - the directed follower -> followed edges.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Record an edge. Adding an existing edge is a no-op.
    async fn add(&self, follow: Follow) -> Result<(), RepoError>;

    /// Remove an edge. Returns whether it existed.
    async fn remove(&self, follow: Follow) -> Result<bool, RepoError>;

    async fn exists(&self, follow: Follow) -> Result<bool, RepoError>;

    /// Ids of users following `user_id`.
    async fn follower_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Ids of users `user_id` follows.
    async fn following_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Drop every edge touching `user_id`, in either direction.
    async fn remove_all_for(&self, user_id: Uuid) -> Result<u64, RepoError>;
}
