//! Services - business operations composed from the ports.

mod messages;
mod users;

pub use messages::{MessageService, TIMELINE_LIMIT};
pub use users::{UserProfile, UserService};
