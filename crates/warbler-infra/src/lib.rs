//! # Warbler Infrastructure
//!
//! Concrete implementations of the ports defined in `warbler-core`.
//! This crate contains persistence, password hashing, session storage and
//! rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - Argon2 password hashing
//! - `rate-limit` - Rate limiting via governor
//! - `redis` - Redis-backed cache for sessions

pub mod cache;
pub mod database;
pub mod session;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::{InMemoryFollowRepository, InMemoryMessageRepository, InMemoryUserRepository};
pub use session::CacheSessionStore;

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, PasswordConfig};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};
