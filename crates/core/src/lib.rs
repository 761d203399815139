//! Domain logic for the Verda engagement platform.
//!
//! This crate has zero internal dependencies so the rule catalogs, the vote
//! state machine, suggestion selection, and achievement evaluation can be
//! used (and unit-tested) without a database or HTTP stack.

pub mod achievement;
pub mod catalog;
pub mod error;
pub mod suggestion;
pub mod types;
pub mod vote;
