//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod rate_limit;
mod repository;
mod session;

pub use auth::{AuthError, PasswordService};
pub use cache::{Cache, CacheError};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, FollowRepository, MessageRepository, UserRepository};
pub use session::{SessionData, SessionError, SessionStore};
