/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool (the per-request session factory)
/// - `migrations`: Embedded, reversible schema migrations
///
/// Models and their SQL live in the `models` module at crate root level.

pub mod migrations;
pub mod pool;
