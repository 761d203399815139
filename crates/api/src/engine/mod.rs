//! Engagement engine: the services that sit between the HTTP handlers and
//! the repositories.
//!
//! `suggestions` owns the idempotent daily assignment and the merged daily
//! list; `achievements` owns catalog reconciliation and text-criterion
//! checks. The vote state machine needs no service of its own: its pure half
//! lives in `verda_core::vote` and its persistence half in
//! `verda_db::repositories::VoteRepo`.

pub mod achievements;
pub mod suggestions;
