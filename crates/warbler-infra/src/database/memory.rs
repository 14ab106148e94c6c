//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Uniqueness checks and writes happen under one write lock, so a rejected
//! insert never leaves a partial row behind.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use warbler_core::domain::{Follow, Message, User};
use warbler_core::error::RepoError;
use warbler_core::ports::{BaseRepository, FollowRepository, MessageRepository, UserRepository};

/// In-memory user store with unique usernames and emails.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(users: &HashMap<Uuid, User>, candidate: &User) -> Result<(), RepoError> {
        for existing in users.values().filter(|u| u.id != candidate.id) {
            if existing.username == candidate.username {
                return Err(RepoError::Constraint(format!(
                    "username '{}' already exists",
                    candidate.username
                )));
            }
            if existing.email == candidate.email {
                return Err(RepoError::Constraint("email already exists".to_string()));
            }
        }
        Ok(())
    }
}

fn sorted_by_username(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| a.username.cmp(&b.username));
    users
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RepoError::Constraint("user id already exists".to_string()));
        }
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        Self::check_unique(&users, &user)?;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<User>, RepoError> {
        let needle = query.to_lowercase();
        let users = self.users.read().await;
        let found = users
            .values()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(sorted_by_username(found))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let users = self.users.read().await;
        let found = ids.iter().filter_map(|id| users.get(id).cloned()).collect();
        Ok(sorted_by_username(found))
    }
}

/// In-memory message store.
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<HashMap<Uuid, Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut messages: Vec<Message>) -> Vec<Message> {
    messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
    messages
}

#[async_trait]
impl BaseRepository<Message, Uuid> for InMemoryMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, RepoError> {
        Ok(self.messages.read().await.get(&id).cloned())
    }

    async fn insert(&self, message: Message) -> Result<Message, RepoError> {
        let mut messages = self.messages.write().await;
        if messages.contains_key(&message.id) {
            return Err(RepoError::Constraint("message id already exists".to_string()));
        }
        messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn update(&self, message: Message) -> Result<Message, RepoError> {
        let mut messages = self.messages.write().await;
        match messages.get_mut(&message.id) {
            Some(slot) => {
                *slot = message.clone();
                Ok(message)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.messages
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Message>, RepoError> {
        let messages = self.messages.read().await;
        let found = messages
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(found))
    }

    async fn find_by_authors(
        &self,
        user_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Message>, RepoError> {
        let messages = self.messages.read().await;
        let found = messages
            .values()
            .filter(|m| user_ids.contains(&m.user_id))
            .cloned()
            .collect();
        let mut found = newest_first(found);
        found.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(found)
    }

    async fn count_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let messages = self.messages.read().await;
        Ok(messages.values().filter(|m| m.user_id == user_id).count() as u64)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|_, m| m.user_id != user_id);
        Ok((before - messages.len()) as u64)
    }
}

/// In-memory follows store.
#[derive(Default)]
pub struct InMemoryFollowRepository {
    edges: RwLock<HashSet<Follow>>,
}

impl InMemoryFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn add(&self, follow: Follow) -> Result<(), RepoError> {
        self.edges.write().await.insert(follow);
        Ok(())
    }

    async fn remove(&self, follow: Follow) -> Result<bool, RepoError> {
        Ok(self.edges.write().await.remove(&follow))
    }

    async fn exists(&self, follow: Follow) -> Result<bool, RepoError> {
        Ok(self.edges.read().await.contains(&follow))
    }

    async fn follower_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let edges = self.edges.read().await;
        Ok(edges
            .iter()
            .filter(|f| f.followed_id == user_id)
            .map(|f| f.follower_id)
            .collect())
    }

    async fn following_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let edges = self.edges.read().await;
        Ok(edges
            .iter()
            .filter(|f| f.follower_id == user_id)
            .map(|f| f.followed_id)
            .collect())
    }

    async fn remove_all_for(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let mut edges = self.edges.write().await;
        let before = edges.len();
        edges.retain(|f| !f.involves(user_id));
        Ok((before - edges.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User::new(username.into(), email.into(), "hash".into(), None)
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("u1", "u1@test.com")).await.unwrap();

        let result = repo.insert(user("u1", "u2@test.com")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(repo.search("").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("u1", "same@test.com")).await.unwrap();

        let result = repo.insert(user("u2", "same@test.com")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(repo.find_by_username("u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_may_keep_own_username() {
        let repo = InMemoryUserRepository::new();
        let mut saved = repo.insert(user("u1", "u1@test.com")).await.unwrap();
        saved.bio = Some("hi".into());

        let updated = repo.update(saved).await.unwrap();

        assert_eq!(updated.bio.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("Alice", "a@test.com")).await.unwrap();
        repo.insert(user("bob", "b@test.com")).await.unwrap();

        let found = repo.search("ALI").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "Alice");
    }

    #[tokio::test]
    async fn test_follow_edges_are_directional() {
        let repo = InMemoryFollowRepository::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        repo.add(Follow::new(a, b)).await.unwrap();
        repo.add(Follow::new(a, b)).await.unwrap();

        assert!(repo.exists(Follow::new(a, b)).await.unwrap());
        assert!(!repo.exists(Follow::new(b, a)).await.unwrap());
        assert_eq!(repo.follower_ids(b).await.unwrap(), vec![a]);
        assert!(repo.follower_ids(a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_all_for_drops_both_directions() {
        let repo = InMemoryFollowRepository::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        repo.add(Follow::new(a, b)).await.unwrap();
        repo.add(Follow::new(c, a)).await.unwrap();
        repo.add(Follow::new(b, c)).await.unwrap();

        assert_eq!(repo.remove_all_for(a).await.unwrap(), 2);
        assert!(repo.exists(Follow::new(b, c)).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_authors_respects_limit() {
        let repo = InMemoryMessageRepository::new();
        let author = Uuid::new_v4();
        for i in 0..5 {
            repo.insert(Message::new(author, &format!("msg {i}")).unwrap())
                .await
                .unwrap();
        }

        let found = repo.find_by_authors(&[author], 3).await.unwrap();

        assert_eq!(found.len(), 3);
        assert!(found.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
