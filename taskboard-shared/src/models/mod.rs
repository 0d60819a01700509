/// Database models for Taskboard
///
/// # Models
///
/// - `todo`: To-do items and their ownership-scoped queries
/// - `user`: User accounts (owners of todos)
///
/// Model functions take a `&mut PgConnection` so the caller decides how the
/// connection is scoped; the stores in [`crate::store`] check one out per call.

pub mod todo;
pub mod user;
