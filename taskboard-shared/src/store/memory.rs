/// In-memory stores
///
/// Behave like the PostgreSQL stores (sequential ids starting at 1, id
/// ordering, scope filtering, unique usernames and emails) without a
/// database. Used by the API integration tests.
///
/// **Not for production**: data lives only as long as the process.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{StoreError, StoreResult, TodoStore, UserStore};
use crate::models::todo::{Todo, TodoFields, TodoScope};
use crate::models::user::{CreateUser, User};

#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Todo store backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    table: Arc<Mutex<Table<Todo>>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored todos across all owners
    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn list(&self, scope: TodoScope) -> StoreResult<Vec<Todo>> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .values()
            .filter(|todo| scope.permits(todo))
            .cloned()
            .collect())
    }

    async fn find(&self, scope: TodoScope, id: i64) -> StoreResult<Option<Todo>> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).filter(|todo| scope.permits(todo)).cloned())
    }

    async fn create(&self, owner_id: i64, fields: TodoFields) -> StoreResult<Todo> {
        let mut table = self.table.lock().await;
        let todo = Todo {
            id: table.allocate_id(),
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            complete: fields.complete,
            owner_id,
        };
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(
        &self,
        scope: TodoScope,
        id: i64,
        fields: TodoFields,
    ) -> StoreResult<Option<Todo>> {
        let mut table = self.table.lock().await;
        let Some(todo) = table.rows.get_mut(&id).filter(|todo| scope.permits(todo)) else {
            return Ok(None);
        };

        todo.title = fields.title;
        todo.description = fields.description;
        todo.priority = fields.priority;
        todo.complete = fields.complete;
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, scope: TodoScope, id: i64) -> StoreResult<bool> {
        let mut table = self.table.lock().await;
        let visible = table.rows.get(&id).is_some_and(|todo| scope.permits(todo));
        if visible {
            table.rows.remove(&id);
        }
        Ok(visible)
    }
}

/// User store backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    table: Arc<Mutex<Table<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, data: CreateUser) -> StoreResult<User> {
        let mut table = self.table.lock().await;

        for existing in table.rows.values() {
            if existing.username == data.username {
                return Err(StoreError::Conflict("users_username_key".to_string()));
            }
            if existing.email == data.email {
                return Err(StoreError::Conflict("users_email_key".to_string()));
            }
        }

        let user = User {
            id: table.allocate_id(),
            email: data.email,
            username: data.username,
            first_name: data.first_name,
            last_name: data.last_name,
            hashed_password: data.hashed_password,
            is_active: true,
            role: data.role,
            phone_number: data.phone_number,
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let table = self.table.lock().await;
        Ok(table.rows.values().find(|u| u.username == username).cloned())
    }

    async fn update_password(&self, id: i64, hashed_password: &str) -> StoreResult<bool> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&id) {
            Some(user) => {
                user.hashed_password = hashed_password.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_phone_number(
        &self,
        id: i64,
        phone_number: Option<&str>,
    ) -> StoreResult<bool> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&id) {
            Some(user) => {
                user.phone_number = phone_number.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
