//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod achievement_repo;
pub mod action_repo;
pub mod question_repo;
pub mod user_repo;
pub mod vote_repo;

pub use achievement_repo::AchievementRepo;
pub use action_repo::ActionRepo;
pub use question_repo::QuestionRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
