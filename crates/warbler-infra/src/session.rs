//! Cache-backed session store.
//!
//! Each session is one cache entry, `session:<id>` -> `{"curr_user": "<uuid>"}`,
//! expiring after the configured TTL. Works with any [`Cache`] backend, so
//! sessions survive restarts and are shared across instances when Redis is
//! used.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use warbler_core::ports::{Cache, SessionData, SessionError, SessionStore};

const KEY_PREFIX: &str = "session:";

/// Default session lifetime: one week.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub struct CacheSessionStore {
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl CacheSessionStore {
    pub fn new(cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    fn key(session_id: &str) -> String {
        format!("{KEY_PREFIX}{session_id}")
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn create(&self, user_id: Uuid) -> Result<String, SessionError> {
        let session_id = Uuid::new_v4().simple().to_string();
        let data = serde_json::to_string(&SessionData { curr_user: user_id })
            .map_err(|e| SessionError::Serialization(e.to_string()))?;

        self.cache
            .set(&Self::key(&session_id), &data, Some(self.ttl))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;

        tracing::debug!(user_id = %user_id, "Session created");
        Ok(session_id)
    }

    async fn load(&self, session_id: &str) -> Result<Option<SessionData>, SessionError> {
        let raw = self
            .cache
            .get(&Self::key(session_id))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))?;

        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|e| SessionError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn destroy(&self, session_id: &str) -> Result<(), SessionError> {
        self.cache
            .delete(&Self::key(session_id))
            .await
            .map_err(|e| SessionError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;

    fn store(ttl: Duration) -> (Arc<InMemoryCache>, CacheSessionStore) {
        let cache = Arc::new(InMemoryCache::new());
        let store = CacheSessionStore::new(cache.clone(), ttl);
        (cache, store)
    }

    #[tokio::test]
    async fn test_create_and_load() {
        let (_, store) = store(DEFAULT_SESSION_TTL);
        let user_id = Uuid::new_v4();

        let session_id = store.create(user_id).await.unwrap();
        let data = store.load(&session_id).await.unwrap();

        assert_eq!(data, Some(SessionData { curr_user: user_id }));
    }

    #[tokio::test]
    async fn test_sessions_are_distinct() {
        let (_, store) = store(DEFAULT_SESSION_TTL);
        let user_id = Uuid::new_v4();

        let first = store.create(user_id).await.unwrap();
        let second = store.create(user_id).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_destroy_logs_out() {
        let (_, store) = store(DEFAULT_SESSION_TTL);
        let session_id = store.create(Uuid::new_v4()).await.unwrap();

        store.destroy(&session_id).await.unwrap();

        assert_eq!(store.load(&session_id).await.unwrap(), None);
        // Destroying twice is fine.
        store.destroy(&session_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_session_is_none() {
        let (_, store) = store(DEFAULT_SESSION_TTL);
        assert_eq!(store.load("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_expires() {
        let (_, store) = store(Duration::from_millis(10));
        let session_id = store.create(Uuid::new_v4()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(store.load(&session_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupted_session_is_an_error() {
        let (cache, store) = store(DEFAULT_SESSION_TTL);
        cache.set("session:bad", "{not json", None).await.unwrap();

        let result = store.load("bad").await;

        assert!(matches!(result, Err(SessionError::Serialization(_))));
    }
}
