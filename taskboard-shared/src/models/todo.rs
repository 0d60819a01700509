/// Todo model and database operations
///
/// Every query takes a [`TodoScope`]. For a regular caller the scope is the
/// caller's own id and is folded into the `WHERE` clause, so a task owned by
/// somebody else is indistinguishable from a task that does not exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description VARCHAR(100) NOT NULL,
///     priority INTEGER NOT NULL CHECK (priority > 0 AND priority < 6),
///     complete BOOLEAN NOT NULL DEFAULT FALSE,
///     owner_id BIGINT NOT NULL REFERENCES users(id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::todo::{Todo, TodoFields, TodoScope};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let mut conn = pool.acquire().await?;
///
/// let todo = Todo::create(&mut conn, 1, TodoFields {
///     title: "Buy milk".to_string(),
///     description: "2%".to_string(),
///     priority: 2,
///     complete: false,
/// }).await?;
///
/// // Invisible to anybody but user 1
/// assert!(Todo::find(&mut conn, TodoScope::Owner(2), todo.id).await?.is_none());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::auth::identity::Identity;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Unique, system-assigned ID
    pub id: i64,

    /// Short title (at least 3 characters)
    pub title: String,

    /// Description (1 to 100 characters)
    pub description: String,

    /// Priority from 1 to 5
    pub priority: i32,

    /// Completion flag
    pub complete: bool,

    /// User who created the task
    pub owner_id: i64,
}

/// Caller-editable fields of a todo
///
/// Used both for creation and for full-replacement updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
}

/// Ownership filter applied to a todo query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoScope {
    /// Only tasks owned by this user id
    Owner(i64),

    /// Every task (admin access)
    All,
}

impl TodoScope {
    /// Scope restricted to the caller's own tasks, whatever their role
    pub fn owned_by(identity: &Identity) -> Self {
        TodoScope::Owner(identity.id())
    }

    /// Owner filter to bind into SQL (`None` disables the filter)
    pub fn owner_id(&self) -> Option<i64> {
        match self {
            TodoScope::Owner(id) => Some(*id),
            TodoScope::All => None,
        }
    }

    /// Whether `todo` is visible under this scope
    pub fn permits(&self, todo: &Todo) -> bool {
        match self {
            TodoScope::Owner(id) => todo.owner_id == *id,
            TodoScope::All => true,
        }
    }
}

impl Todo {
    /// Inserts a new todo owned by `owner_id`
    pub async fn create(
        conn: &mut PgConnection,
        owner_id: i64,
        fields: TodoFields,
    ) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, priority, complete, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, priority, complete, owner_id
            "#,
        )
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.priority)
        .bind(fields.complete)
        .bind(owner_id)
        .fetch_one(conn)
        .await?;

        Ok(todo)
    }

    /// Lists todos visible under `scope`, in id order
    pub async fn list(conn: &mut PgConnection, scope: TodoScope) -> Result<Vec<Self>, sqlx::Error> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, priority, complete, owner_id
            FROM todos
            WHERE ($1::BIGINT IS NULL OR owner_id = $1)
            ORDER BY id
            "#,
        )
        .bind(scope.owner_id())
        .fetch_all(conn)
        .await?;

        Ok(todos)
    }

    /// Finds a todo by ID within `scope`
    pub async fn find(
        conn: &mut PgConnection,
        scope: TodoScope,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, priority, complete, owner_id
            FROM todos
            WHERE id = $1 AND ($2::BIGINT IS NULL OR owner_id = $2)
            "#,
        )
        .bind(id)
        .bind(scope.owner_id())
        .fetch_optional(conn)
        .await?;

        Ok(todo)
    }

    /// Overwrites every editable field of a todo within `scope`
    ///
    /// Returns `None` when no todo with that ID is visible under `scope`.
    pub async fn update(
        conn: &mut PgConnection,
        scope: TodoScope,
        id: i64,
        fields: TodoFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = $3,
                description = $4,
                priority = $5,
                complete = $6
            WHERE id = $1 AND ($2::BIGINT IS NULL OR owner_id = $2)
            RETURNING id, title, description, priority, complete, owner_id
            "#,
        )
        .bind(id)
        .bind(scope.owner_id())
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.priority)
        .bind(fields.complete)
        .fetch_optional(conn)
        .await?;

        Ok(todo)
    }

    /// Deletes a todo within `scope`
    ///
    /// Returns true if a row was removed.
    pub async fn delete(
        conn: &mut PgConnection,
        scope: TodoScope,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM todos WHERE id = $1 AND ($2::BIGINT IS NULL OR owner_id = $2)",
        )
        .bind(id)
        .bind(scope.owner_id())
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(owner_id: i64) -> Todo {
        Todo {
            id: 1,
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            priority: 2,
            complete: false,
            owner_id,
        }
    }

    #[test]
    fn test_scope_owner_id() {
        assert_eq!(TodoScope::Owner(4).owner_id(), Some(4));
        assert_eq!(TodoScope::All.owner_id(), None);
    }

    #[test]
    fn test_scope_permits() {
        assert!(TodoScope::Owner(1).permits(&todo(1)));
        assert!(!TodoScope::Owner(2).permits(&todo(1)));
        assert!(TodoScope::All.permits(&todo(1)));
    }

    #[test]
    fn test_owned_by_ignores_admin_role() {
        assert_eq!(
            TodoScope::owned_by(&Identity::Admin { id: 9 }),
            TodoScope::Owner(9)
        );
    }

    #[test]
    fn test_todo_serializes_owner() {
        let json = serde_json::to_value(todo(1)).unwrap();
        assert_eq!(json["owner_id"], 1);
        assert_eq!(json["title"], "Buy milk");
        assert_eq!(json["complete"], false);
    }
}
