//! SeaORM entities for the Warbler schema.

pub mod follows;
pub mod message;
pub mod user;
