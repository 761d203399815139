//! Token generation and password hashing.

pub mod jwt;
pub mod password;
