/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and token issuance
/// - `todos`: The caller's own todos
/// - `admin`: Todos across all owners (administrators only)
/// - `users`: The caller's profile

pub mod admin;
pub mod auth;
pub mod health;
pub mod todos;
pub mod users;
