/// Profile endpoints for the authenticated caller
///
/// # Endpoints
///
/// - `GET /user` - The caller's profile
/// - `PUT /user/password` - Change password (204)
/// - `PUT /user/phonenumber/:phone_number` - Set phone number (204)

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
    auth::{identity::Identity, password},
    models::user::{User, PHONE_NUMBER_MAX_LEN},
};
use validator::Validate;

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password
    pub password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

/// The caller's profile (without the password hash)
pub async fn get_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<User>> {
    state
        .users
        .find_by_id(identity.id())
        .await?
        .map(Json)
        .ok_or_else(user_not_found)
}

/// Change the caller's password
///
/// # Errors
///
/// - `401 Unauthorized`: Current password is wrong
/// - `422 Unprocessable Entity`: New password too short
pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = body?;
    req.validate()?;

    let user = state
        .users
        .find_by_id(identity.id())
        .await?
        .ok_or_else(ApiError::not_authenticated)?;

    if !password::verify_password(&req.password, &user.hashed_password)? {
        return Err(ApiError::Unauthorized("Error on password change".to_string()));
    }

    let hashed_password = password::hash_password(&req.new_password)?;
    if !state.users.update_password(user.id, &hashed_password).await? {
        return Err(user_not_found());
    }

    tracing::info!(user_id = user.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// Set the caller's phone number
///
/// # Errors
///
/// - `404 Not Found`: The caller's account no longer exists
/// - `422 Unprocessable Entity`: Longer than 12 characters
pub async fn update_phone_number(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(phone_number) = path?;
    validate_phone_number(&phone_number)?;

    if !state
        .users
        .update_phone_number(identity.id(), Some(phone_number.as_str()))
        .await?
    {
        return Err(user_not_found());
    }

    tracing::info!(user_id = identity.id(), "Phone number updated");
    Ok(StatusCode::NO_CONTENT)
}

fn validate_phone_number(phone_number: &str) -> ApiResult<()> {
    let len = phone_number.chars().count();
    if len == 0 || len > PHONE_NUMBER_MAX_LEN {
        return Err(ApiError::invalid(
            "phone_number",
            format!("Phone number must be 1 to {} characters", PHONE_NUMBER_MAX_LEN),
        ));
    }
    Ok(())
}
