//! Repositories over the database tables.

pub mod user_repo;

pub use user_repo::{RegisterOutcome, UserRepo, UserStore};
