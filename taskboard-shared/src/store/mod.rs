/// Storage traits for todos and users
///
/// Route handlers talk to storage only through [`TodoStore`] and
/// [`UserStore`]. Two implementations are provided:
///
/// - [`postgres`]: the production stores, one pooled connection per call
/// - [`memory`]: in-process stores for tests and local experiments
///
/// # Example
///
/// ```
/// use taskboard_shared::models::todo::{TodoFields, TodoScope};
/// use taskboard_shared::store::{memory::InMemoryTodoStore, TodoStore};
///
/// # async fn example() -> Result<(), taskboard_shared::store::StoreError> {
/// let store = InMemoryTodoStore::new();
/// let todo = store.create(1, TodoFields {
///     title: "Buy milk".to_string(),
///     description: "2%".to_string(),
///     priority: 2,
///     complete: false,
/// }).await?;
///
/// assert!(store.find(TodoScope::Owner(2), todo.id).await?.is_none());
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::todo::{Todo, TodoFields, TodoScope};
use crate::models::user::{CreateUser, User};

/// Storage error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated (e.g. duplicate username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if let Some(constraint) = db_err.constraint() {
                if db_err.is_unique_violation() {
                    return StoreError::Conflict(constraint.to_string());
                }
            }
        }
        StoreError::Database(err)
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence of todos
///
/// Every read and mutation is filtered by a [`TodoScope`]; a todo outside the
/// scope behaves exactly as if it did not exist.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Lists todos visible under `scope`
    async fn list(&self, scope: TodoScope) -> StoreResult<Vec<Todo>>;

    /// Finds a todo visible under `scope`
    async fn find(&self, scope: TodoScope, id: i64) -> StoreResult<Option<Todo>>;

    /// Creates a todo owned by `owner_id`
    async fn create(&self, owner_id: i64, fields: TodoFields) -> StoreResult<Todo>;

    /// Replaces the editable fields of a todo; `None` if not visible
    async fn update(&self, scope: TodoScope, id: i64, fields: TodoFields)
        -> StoreResult<Option<Todo>>;

    /// Deletes a todo; false if not visible
    async fn delete(&self, scope: TodoScope, id: i64) -> StoreResult<bool>;

    /// Checks the backing storage is reachable
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Persistence of user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user; `StoreError::Conflict` on duplicate email/username
    async fn create(&self, data: CreateUser) -> StoreResult<User>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Replaces the password hash; false if the user does not exist
    async fn update_password(&self, id: i64, hashed_password: &str) -> StoreResult<bool>;

    /// Sets or clears the phone number; false if the user does not exist
    async fn update_phone_number(&self, id: i64, phone_number: Option<&str>)
        -> StoreResult<bool>;
}
