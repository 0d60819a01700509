#![allow(dead_code)]

/// Common test utilities for integration tests
///
/// Builds the real router over in-memory stores, so these tests need no
/// database:
/// - Test user creation and token minting
/// - Request helpers driving the router with `oneshot`

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::auth::identity::Role;
use taskboard_shared::auth::jwt::{create_token, Claims};
use taskboard_shared::models::user::{CreateUser, User};
use taskboard_shared::store::memory::{InMemoryTodoStore, InMemoryUserStore};
use taskboard_shared::store::UserStore;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    pub config: Config,
    pub todos: InMemoryTodoStore,
    pub users: InMemoryUserStore,
}

/// Response status plus parsed JSON body (`Value::Null` when empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    /// Creates a new context with empty stores
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Creates a context whose config also sees the given variables
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgresql://unused/taskboard_test".to_string()),
            "JWT_SECRET" => Some(JWT_SECRET.to_string()),
            _ => vars
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string()),
        })
        .expect("test config should parse");

        let todos = InMemoryTodoStore::new();
        let users = InMemoryUserStore::new();

        let state = AppState::with_stores(
            Arc::new(todos.clone()),
            Arc::new(users.clone()),
            config.clone(),
        );

        TestContext {
            app: build_router(state),
            config,
            todos,
            users,
        }
    }

    /// Inserts a user directly into the store (no password hashing)
    pub async fn create_user(&self, username: &str, role: Role) -> User {
        self.users
            .create(CreateUser {
                email: format!("{}@example.com", username),
                username: username.to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                hashed_password: "not-a-real-hash".to_string(),
                role,
                phone_number: None,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Signs an access token for `user`
    pub fn token_for(&self, user: &User) -> String {
        self.token(user.id, &user.username, user.role)
    }

    /// Signs an access token for arbitrary claims
    pub fn token(&self, id: i64, username: &str, role: Role) -> String {
        let claims = Claims::new(id, username, role, self.config.jwt.expiration());
        create_token(&claims, JWT_SECRET).expect("Failed to create token")
    }

    /// Sends a request with an optional bearer token and JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.dispatch(request).await
    }

    /// Sends a form-encoded POST
    pub async fn send_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();

        self.dispatch(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("Expected JSON body, got {}", String::from_utf8_lossy(&bytes))
            })
        };

        TestResponse { status, body }
    }
}

/// A valid todo body
pub fn todo_body(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": "integration test",
        "priority": 3,
        "complete": false
    })
}
