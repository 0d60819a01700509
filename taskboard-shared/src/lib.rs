//! # Taskboard Shared Library
//!
//! This crate contains the types, persistence and authentication primitives
//! used by the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, JWT tokens and identity resolution
//! - `db`: Connection pool and migration runner
//! - `models`: Database models and their SQL
//! - `store`: Storage traits with PostgreSQL and in-memory implementations

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
