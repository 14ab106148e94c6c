//! # Warbler Core
//!
//! The domain layer of Warbler.
//! Users, messages and the follows relation, plus the services that enforce
//! their rules. This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{MessageService, UserService};
