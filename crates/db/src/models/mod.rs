//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the entity has them

pub mod achievement;
pub mod action;
pub mod question;
pub mod user;
pub mod vote;
