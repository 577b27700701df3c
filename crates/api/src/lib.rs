//! Task manager web server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! session guard) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
