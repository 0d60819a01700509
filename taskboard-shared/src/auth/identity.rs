/// Resolved caller identity
///
/// Every authenticated request is resolved into an [`Identity`]. The role is
/// carried by the variant itself, so admin-only code paths can demand an
/// `Identity::Admin` instead of comparing role strings.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::identity::{Identity, Role};
///
/// let caller = Identity::new(3, Role::User);
/// assert_eq!(caller.id(), 3);
/// assert_eq!(caller.role(), Role::User);
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role stored in `users.role` and carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May list and delete any task through the admin routes
    Admin,

    /// Regular account, restricted to its own tasks
    #[default]
    User,
}

impl Role {
    /// Converts role to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored role string is not a known role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The authenticated caller of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    /// Regular user
    User { id: i64 },

    /// Administrator
    Admin { id: i64 },
}

impl Identity {
    /// Builds the identity variant matching `role`
    pub fn new(id: i64, role: Role) -> Self {
        match role {
            Role::Admin => Identity::Admin { id },
            Role::User => Identity::User { id },
        }
    }

    /// Builds an identity from validated token claims
    pub fn from_claims(claims: &super::jwt::Claims) -> Self {
        Self::new(claims.id, claims.role)
    }

    /// The caller's user id
    pub fn id(&self) -> i64 {
        match self {
            Identity::User { id } | Identity::Admin { id } => *id,
        }
    }

    /// The caller's role
    pub fn role(&self) -> Role {
        match self {
            Identity::User { .. } => Role::User,
            Identity::Admin { .. } => Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!(
            "root".parse::<Role>(),
            Err(UnknownRole("root".to_string()))
        );
        assert_eq!(Role::try_from("admin".to_string()), Ok(Role::Admin));
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_identity_variants() {
        let admin = Identity::new(1, Role::Admin);
        assert_eq!(admin, Identity::Admin { id: 1 });
        assert_eq!(admin.role(), Role::Admin);

        let user = Identity::new(2, Role::User);
        assert_eq!(user, Identity::User { id: 2 });
        assert_eq!(user.id(), 2);
    }
}
