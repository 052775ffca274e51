use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use error_stack::Report;
use uuid::Uuid;

use kernel::KernelError;

static USER_ID_HEADER: &str = "x-user-id";
static ADMIN_HEADER: &str = "x-user-admin";

/// Caller as resolved by the session layer in front of this service.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Identity {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Identity {
    pub fn require_admin(&self) -> error_stack::Result<(), KernelError> {
        if self.is_admin {
            return Ok(());
        }
        Err(Report::new(KernelError::Forbidden)
            .attach_printable(format!("user {} is not an admin", self.user_id)))
    }

    /// Users see their own account and rentals. Admins see everyone's.
    pub fn require_self_or_admin(&self, user_id: &Uuid) -> error_stack::Result<(), KernelError> {
        if self.is_admin || self.user_id == *user_id {
            return Ok(());
        }
        Err(Report::new(KernelError::Forbidden).attach_printable(format!(
            "user {} may not access user {}",
            self.user_id, user_id
        )))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let is_admin = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Ok(Identity { user_id, is_admin })
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use crate::identity::Identity;

    fn app() -> Router {
        Router::new().route(
            "/whoami",
            get(|identity: Identity| async move {
                Json((identity.user_id, identity.is_admin))
            }),
        )
    }

    #[tokio::test]
    async fn missing_or_malformed_user_is_unauthorized() {
        let request = Request::get("/whoami").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::get("/whoami")
            .header("x-user-id", "not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn identity_is_read_from_headers() {
        let user_id = Uuid::new_v4();
        let request = Request::get("/whoami")
            .header("x-user-id", user_id.to_string())
            .header("x-user-admin", "true")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn access_checks() {
        let own = Uuid::new_v4();
        let viewer = Identity {
            user_id: own,
            is_admin: false,
        };
        assert!(viewer.require_admin().is_err());
        assert!(viewer.require_self_or_admin(&own).is_ok());
        assert!(viewer.require_self_or_admin(&Uuid::new_v4()).is_err());

        let admin = Identity {
            user_id: Uuid::new_v4(),
            is_admin: true,
        };
        assert!(admin.require_admin().is_ok());
        assert!(admin.require_self_or_admin(&own).is_ok());
    }
}
