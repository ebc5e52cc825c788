//! Authentication extractor for admin route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;

/// Extractor that requires an authenticated admin session.
///
/// If the operator is not logged in, returns a redirect to the login page
/// for HTML requests, or 401 Unauthorized for API requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_: RequireAdminAuth) -> impl IntoResponse {
///     "only after login"
/// }
/// ```
pub struct RequireAdminAuth;

/// Error returned when authentication is required but the session lacks it.
pub enum AdminAuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::Unauthorized)?;

        let authenticated: bool = session
            .get(session_keys::ADMIN_AUTHENTICATED)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        if authenticated {
            Ok(Self)
        } else if parts.uri.path().starts_with("/api/") {
            Err(AdminAuthRejection::Unauthorized)
        } else {
            Err(AdminAuthRejection::RedirectToLogin)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn request_parts(path: &str, session: &Session) -> Parts {
        let (mut parts, ()) = Request::builder().uri(path).body(()).unwrap().into_parts();
        parts.extensions.insert(session.clone());
        parts
    }

    async fn rejection_status(mut parts: Parts) -> StatusCode {
        match RequireAdminAuth::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("expected the extractor to reject"),
            Err(rejection) => rejection.into_response().status(),
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_html_request_redirects_to_login() {
        let parts = request_parts("/orders", &session());
        assert_eq!(rejection_status(parts).await, StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_unauthenticated_api_request_gets_401() {
        let parts = request_parts("/api/orders", &session());
        assert_eq!(rejection_status(parts).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authenticated_session_passes() {
        let session = session();
        session
            .insert(session_keys::ADMIN_AUTHENTICATED, true)
            .await
            .unwrap();

        let mut parts = request_parts("/orders", &session);
        assert!(
            RequireAdminAuth::from_request_parts(&mut parts, &())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_missing_session_extension_gets_401() {
        let (parts, ()) = Request::builder().uri("/orders").body(()).unwrap().into_parts();
        assert_eq!(rejection_status(parts).await, StatusCode::UNAUTHORIZED);
    }
}
