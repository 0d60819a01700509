/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT access token generation and validation
/// - [`identity`]: The resolved caller of a request (`User` or `Admin`)
/// - [`resolver`]: Bearer header parsing and credential → identity resolution
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::identity::{Identity, Role};
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let claims = Claims::new(7, "alice", Role::Admin, chrono::Duration::minutes(20));
/// let token = create_token(&claims, secret)?;
///
/// let identity = Identity::from_claims(&validate_token(&token, secret)?);
/// assert_eq!(identity, Identity::Admin { id: 7 });
/// # Ok(())
/// # }
/// ```

pub mod identity;
pub mod jwt;
pub mod resolver;
pub mod password;
