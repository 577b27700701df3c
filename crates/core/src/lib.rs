//! Domain types shared by the database and API crates.

pub mod credentials;
pub mod error;
pub mod types;
