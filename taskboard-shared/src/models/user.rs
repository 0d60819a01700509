/// User model and database operations
///
/// Users own todos. The password is only ever stored as an Argon2id hash and
/// is never serialized.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     first_name VARCHAR(255) NOT NULL,
///     last_name VARCHAR(255) NOT NULL,
///     hashed_password VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     role VARCHAR(32) NOT NULL DEFAULT 'user',
///     phone_number VARCHAR(12)            -- added by 20240712004105
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::auth::identity::Role;
/// use taskboard_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let mut conn = pool.acquire().await?;
///
/// let user = User::create(&mut conn, CreateUser {
///     email: "alice@example.com".to_string(),
///     username: "alice".to_string(),
///     first_name: "Alice".to_string(),
///     last_name: "Liddell".to_string(),
///     hashed_password: "$argon2id$...".to_string(),
///     role: Role::User,
///     phone_number: None,
/// }).await?;
///
/// let found = User::find_by_username(&mut conn, "alice").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::auth::identity::Role;

/// Maximum stored length of `phone_number`
pub const PHONE_NUMBER_MAX_LEN: usize = 12;

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Email address (unique)
    pub email: String,

    /// Login name (unique)
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    /// Argon2id password hash, never sent to clients
    #[serde(skip_serializing, default)]
    pub hashed_password: String,

    /// Whether the account may log in
    pub is_active: bool,

    /// Account role
    #[sqlx(try_from = "String")]
    pub role: Role,

    /// Optional phone number (max 12 characters)
    pub phone_number: Option<String>,
}

/// Input for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub hashed_password: String,

    pub role: Role,
    pub phone_number: Option<String>,
}

const USER_COLUMNS: &str =
    "id, email, username, first_name, last_name, hashed_password, is_active, role, phone_number";

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Fails with a database error carrying the violated constraint when the
    /// email or username is already taken
    pub async fn create(conn: &mut PgConnection, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (email, username, first_name, last_name, hashed_password, role, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(data.email)
            .bind(data.username)
            .bind(data.first_name)
            .bind(data.last_name)
            .bind(data.hashed_password)
            .bind(data.role.as_str())
            .bind(data.phone_number)
            .fetch_one(conn)
            .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Finds a user by username
    pub async fn find_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(conn)
            .await
    }

    /// Replaces the stored password hash
    ///
    /// Returns true if the user exists.
    pub async fn update_password(
        conn: &mut PgConnection,
        id: i64,
        hashed_password: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET hashed_password = $2 WHERE id = $1")
            .bind(id)
            .bind(hashed_password)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets or clears the phone number
    ///
    /// Returns true if the user exists.
    pub async fn update_phone_number(
        conn: &mut PgConnection,
        id: i64,
        phone_number: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET phone_number = $2 WHERE id = $1")
            .bind(id)
            .bind(phone_number)
            .execute(conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 3,
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            hashed_password: "$argon2id$secret".to_string(),
            is_active: true,
            role: Role::Admin,
            phone_number: Some("5551234567".to_string()),
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(user()).unwrap();

        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["phone_number"], "5551234567");
    }
}
