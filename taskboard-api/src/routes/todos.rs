/// Todo endpoints for the authenticated caller
///
/// Every handler works on the caller's own todos only. A todo owned by
/// someone else answers 404, exactly like an id that was never issued.
///
/// # Endpoints
///
/// - `GET /todos` - List the caller's todos
/// - `GET /todo/:id` - Read one todo
/// - `POST /todo` - Create a todo (201, empty body)
/// - `PUT /todo/:id` - Replace a todo's fields (204)
/// - `DELETE /todo/:id` - Delete a todo (204)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::identity::Identity,
    models::todo::{Todo, TodoFields, TodoScope},
};
use validator::Validate;

/// Create/replace request body
///
/// `completed` is accepted as an alias of `complete`.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoRequest {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "Description must be 1 to 100 characters"))]
    pub description: String,

    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: i32,

    #[serde(alias = "completed")]
    pub complete: bool,
}

impl From<TodoRequest> for TodoFields {
    fn from(req: TodoRequest) -> Self {
        TodoFields {
            title: req.title,
            description: req.description,
            priority: req.priority,
            complete: req.complete,
        }
    }
}

/// Parses and validates a todo id path segment
pub(crate) fn todo_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    let Path(id) = path?;
    if id <= 0 {
        return Err(ApiError::invalid("id", "Id must be greater than 0"));
    }
    Ok(id)
}

/// Validates a JSON todo body into storable fields
fn todo_fields(body: Result<Json<TodoRequest>, JsonRejection>) -> ApiResult<TodoFields> {
    let Json(req) = body?;
    req.validate()?;
    Ok(req.into())
}

pub(crate) fn todo_not_found() -> ApiError {
    ApiError::NotFound("Todo not found".to_string())
}

/// List the caller's todos
///
/// Scoped to the caller even for administrators; `/admin/todo` lists
/// everything.
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.todos.list(TodoScope::owned_by(&identity)).await?;
    Ok(Json(todos))
}

/// Read one of the caller's todos
///
/// # Errors
///
/// - `404 Not Found`: No todo with that id owned by the caller
/// - `422 Unprocessable Entity`: Id is not a positive integer
pub async fn get_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Todo>> {
    let id = todo_id(path)?;

    state
        .todos
        .find(TodoScope::owned_by(&identity), id)
        .await?
        .map(Json)
        .ok_or_else(todo_not_found)
}

/// Create a todo owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /todo
/// Content-Type: application/json
///
/// {
///   "title": "Buy milk",
///   "description": "2% from the corner shop",
///   "priority": 2,
///   "complete": false
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Body failed validation; nothing is stored
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let fields = todo_fields(body)?;

    let todo = state.todos.create(identity.id(), fields).await?;
    tracing::info!(todo_id = todo.id, owner_id = todo.owner_id, "Todo created");

    Ok(StatusCode::CREATED)
}

/// Replace the fields of one of the caller's todos
///
/// # Errors
///
/// - `404 Not Found`: No todo with that id owned by the caller
/// - `422 Unprocessable Entity`: Bad id or body
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TodoRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = todo_id(path)?;
    let fields = todo_fields(body)?;

    state
        .todos
        .update(TodoScope::owned_by(&identity), id, fields)
        .await?
        .ok_or_else(todo_not_found)?;

    tracing::info!(todo_id = id, owner_id = identity.id(), "Todo updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete one of the caller's todos
///
/// # Errors
///
/// - `404 Not Found`: No todo with that id owned by the caller
/// - `422 Unprocessable Entity`: Id is not a positive integer
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = todo_id(path)?;

    if !state.todos.delete(TodoScope::owned_by(&identity), id).await? {
        return Err(todo_not_found());
    }

    tracing::info!(todo_id = id, owner_id = identity.id(), "Todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
