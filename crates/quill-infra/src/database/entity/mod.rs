//! SeaORM entities for the persisted schema.

pub mod group;
pub mod post;
pub mod user;
