/// PostgreSQL-backed stores
///
/// Each call checks a single connection out of the pool and runs one
/// statement on it. The `PoolConnection` guard returns the connection when it
/// drops, on success and on every error path alike. Statements run in
/// autocommit mode, so a mutation is committed before the call returns.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{StoreResult, TodoStore, UserStore};
use crate::db::pool::health_check;
use crate::models::todo::{Todo, TodoFields, TodoScope};
use crate::models::user::{CreateUser, User};

/// Todo store over a PostgreSQL pool
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list(&self, scope: TodoScope) -> StoreResult<Vec<Todo>> {
        let mut conn = self.pool.acquire().await?;
        let todos = Todo::list(&mut conn, scope).await?;
        debug!(?scope, count = todos.len(), "Listed todos");
        Ok(todos)
    }

    async fn find(&self, scope: TodoScope, id: i64) -> StoreResult<Option<Todo>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Todo::find(&mut conn, scope, id).await?)
    }

    async fn create(&self, owner_id: i64, fields: TodoFields) -> StoreResult<Todo> {
        let mut conn = self.pool.acquire().await?;
        let todo = Todo::create(&mut conn, owner_id, fields).await?;
        debug!(todo_id = todo.id, owner_id, "Created todo");
        Ok(todo)
    }

    async fn update(
        &self,
        scope: TodoScope,
        id: i64,
        fields: TodoFields,
    ) -> StoreResult<Option<Todo>> {
        let mut conn = self.pool.acquire().await?;
        Ok(Todo::update(&mut conn, scope, id, fields).await?)
    }

    async fn delete(&self, scope: TodoScope, id: i64) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(Todo::delete(&mut conn, scope, id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

/// User store over a PostgreSQL pool
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, data: CreateUser) -> StoreResult<User> {
        let mut conn = self.pool.acquire().await?;
        let user = User::create(&mut conn, data).await?;
        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        Ok(User::find_by_id(&mut conn, id).await?)
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        Ok(User::find_by_username(&mut conn, username).await?)
    }

    async fn update_password(&self, id: i64, hashed_password: &str) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(User::update_password(&mut conn, id, hashed_password).await?)
    }

    async fn update_phone_number(
        &self,
        id: i64,
        phone_number: Option<&str>,
    ) -> StoreResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(User::update_phone_number(&mut conn, id, phone_number).await?)
    }
}
