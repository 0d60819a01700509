/// Request extractors
///
/// [`AdminUser`] gates the admin routes at the type level: a handler that
/// takes one only runs for an `Identity::Admin`. Everything else, including
/// a request that never passed through the identity layer, is rejected with
/// 401 before the handler body executes.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use taskboard_shared::auth::identity::Identity;

use crate::error::ApiError;

/// An authenticated administrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUser {
    /// The administrator's user ID
    pub id: i64,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Admin { id }) => Ok(AdminUser { id: *id }),
            Some(Identity::User { id }) => {
                tracing::debug!(user_id = id, "Non-admin caller on admin route");
                Err(ApiError::not_authenticated())
            }
            None => Err(ApiError::not_authenticated()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(identity: Option<Identity>) -> Result<AdminUser, ApiError> {
        let mut request = Request::builder().uri("/admin/todo").body(()).unwrap();
        if let Some(identity) = identity {
            request.extensions_mut().insert(identity);
        }
        let (mut parts, _) = request.into_parts();
        AdminUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_admin_identity_is_accepted() {
        let admin = extract(Some(Identity::Admin { id: 7 })).await.unwrap();
        assert_eq!(admin, AdminUser { id: 7 });
    }

    #[tokio::test]
    async fn test_user_identity_is_rejected() {
        let err = extract(Some(Identity::User { id: 7 })).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_missing_identity_is_rejected() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
