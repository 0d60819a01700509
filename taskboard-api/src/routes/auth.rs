/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login (token issuance)
///
/// # Endpoints
///
/// - `POST /auth` - Register new user
/// - `POST /auth/token` - Exchange username/password for an access token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{identity::Role, jwt, password},
    models::user::CreateUser,
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    /// Login name
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 255, message = "First name must be 1 to 255 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name must be 1 to 255 characters"))]
    pub last_name: String,

    /// Password (plaintext, hashed before storage)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Requested role, `user` when omitted
    ///
    /// `admin` is only honored while `ALLOW_ADMIN_REGISTRATION` is on.
    #[serde(default)]
    pub role: Role,

    /// Optional phone number
    #[validate(length(min = 1, max = 12, message = "Phone number must be 1 to 12 characters"))]
    pub phone_number: Option<String>,
}

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "username": "alice",
///   "first_name": "Alice",
///   "last_name": "Liddell",
///   "password": "correct horse",
///   "role": "user",
///   "phone_number": "555-123-4567"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username or email already exists
/// - `422 Unprocessable Entity`: Validation failed, or `role` is `admin`
///   while admin self-registration is disabled
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = body?;
    req.validate()?;

    if req.role == Role::Admin && !state.config.api.allow_admin_registration {
        tracing::warn!(username = %req.username, "Rejected admin self-registration");
        return Err(ApiError::invalid("role", "Admin registration is disabled"));
    }

    let hashed_password = password::hash_password(&req.password)?;

    let user = state
        .users
        .create(CreateUser {
            email: req.email,
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            hashed_password,
            role: req.role,
            phone_number: req.phone_number,
        })
        .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok(StatusCode::CREATED)
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /auth/token
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=correct+horse
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "token_type": "bearer"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown user, inactive account or wrong password
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Form(form) = form.map_err(|_| invalid_credentials())?;

    let user = state
        .users
        .find_by_username(&form.username)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(invalid_credentials)?;

    if !password::verify_password(&form.password, &user.hashed_password)? {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    let claims = jwt::Claims::new(
        user.id,
        user.username.as_str(),
        user.role,
        state.config.jwt.expiration(),
    );
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = user.id, "Access token issued");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Could not validate user".to_string())
}
