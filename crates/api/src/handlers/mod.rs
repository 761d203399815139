//! HTTP request handlers, one module per resource.

pub mod achievements;
pub mod actions;
pub mod auth;
pub mod calculator;
pub mod votes;
