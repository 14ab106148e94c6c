//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use warbler_core::ports::{
    Cache, FollowRepository, MessageRepository, PasswordService, SessionStore, UserRepository,
};
use warbler_core::{MessageService, UserService};
use warbler_infra::{
    Argon2PasswordService, CacheSessionStore, InMemoryCache, InMemoryFollowRepository,
    InMemoryMessageRepository, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use warbler_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use warbler_infra::database::{
    PostgresFollowRepository, PostgresMessageRepository, PostgresUserRepository,
};
#[cfg(feature = "redis")]
use warbler_infra::RedisCache;

use crate::config::{AppConfig, SessionConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub messages: MessageService,
    pub sessions: Arc<dyn SessionStore>,
    pub session_config: SessionConfig,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without `DATABASE_URL` the repositories live in memory. When it is set
    /// but the database cannot be reached, startup fails.
    pub async fn new(config: &AppConfig) -> io::Result<Self> {
        let passwords: Arc<dyn PasswordService> = Arc::new(
            Argon2PasswordService::with_config(&config.password).map_err(io::Error::other)?,
        );
        let sessions: Arc<dyn SessionStore> = Arc::new(CacheSessionStore::new(
            build_cache(config).await?,
            config.session.ttl,
        ));

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            let conn = DatabaseConnections::init(db_config).await.map_err(|e| {
                tracing::error!(error = %e, "Failed to connect to database");
                io::Error::other(e)
            })?;

            let mut state = Self::assemble(
                Arc::new(PostgresUserRepository::new(Arc::clone(&conn.main))),
                Arc::new(PostgresMessageRepository::new(Arc::clone(&conn.main))),
                Arc::new(PostgresFollowRepository::new(Arc::clone(&conn.main))),
                passwords,
                sessions,
                config.session.clone(),
            );
            state.db = Some(Arc::new(conn));

            tracing::info!("Application state initialized (postgres)");
            return Ok(state);
        }

        tracing::warn!("DATABASE_URL not set. Running with in-memory repositories.");
        Ok(Self::in_memory(passwords, sessions, config.session.clone()))
    }

    /// State backed entirely by in-memory repositories.
    pub fn in_memory(
        passwords: Arc<dyn PasswordService>,
        sessions: Arc<dyn SessionStore>,
        session_config: SessionConfig,
    ) -> Self {
        Self::assemble(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(InMemoryFollowRepository::new()),
            passwords,
            sessions,
            session_config,
        )
    }

    fn assemble(
        users: Arc<dyn UserRepository>,
        messages: Arc<dyn MessageRepository>,
        follows: Arc<dyn FollowRepository>,
        passwords: Arc<dyn PasswordService>,
        sessions: Arc<dyn SessionStore>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            users: UserService::new(users, messages.clone(), follows.clone(), passwords),
            messages: MessageService::new(messages, follows),
            sessions,
            session_config,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

/// Session cache: Redis when `REDIS_URL` is set, otherwise in-memory.
#[cfg_attr(not(feature = "redis"), allow(unused_variables))]
async fn build_cache(config: &AppConfig) -> io::Result<Arc<dyn Cache>> {
    #[cfg(feature = "redis")]
    if let Some(redis_config) = &config.redis {
        match RedisCache::new(redis_config).await {
            Ok(cache) => return Ok(Arc::new(cache)),
            Err(e) if redis_config.fallback_to_memory => {
                tracing::warn!(error = %e, "Redis unavailable, keeping sessions in memory");
            }
            Err(e) => return Err(io::Error::other(e)),
        }
    }

    Ok(Arc::new(InMemoryCache::new()))
}
