/// Administrator endpoints
///
/// Both handlers take an [`AdminUser`], so any non-admin caller is turned
/// away with 401 before the store is touched.
///
/// # Endpoints
///
/// - `GET /admin/todo` - List every todo regardless of owner
/// - `DELETE /admin/todo/:id` - Delete any todo (204)

use crate::{
    app::AppState,
    error::ApiResult,
    extract::AdminUser,
    routes::todos::{todo_id, todo_not_found},
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use taskboard_shared::models::todo::{Todo, TodoScope};

/// List every todo
pub async fn list_all_todos(
    admin: AdminUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.todos.list(TodoScope::All).await?;
    tracing::debug!(admin_id = admin.id, count = todos.len(), "Admin listed todos");
    Ok(Json(todos))
}

/// Delete any todo
///
/// # Errors
///
/// - `401 Unauthorized`: Caller is not an administrator
/// - `404 Not Found`: No todo with that id
/// - `422 Unprocessable Entity`: Id is not a positive integer
pub async fn delete_any_todo(
    admin: AdminUser,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = todo_id(path)?;

    if !state.todos.delete(TodoScope::All, id).await? {
        return Err(todo_not_found());
    }

    tracing::info!(todo_id = id, admin_id = admin.id, "Admin deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
