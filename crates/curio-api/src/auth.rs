//! # Identity Extractors
//!
//! The authentication collaborator fronts this service and forwards an
//! `x-user-id` header naming the already-authenticated user. The extractors
//! here resolve that header against the user table; they never see
//! credentials.
//!
//! - Missing or unknown identity -> 401 with a JSON error body.
//! - Known identity without the admin role on an admin route -> 403 with a
//!   plain access-denied body (deliberately not a redirect, so it cannot be
//!   mistaken for an empty-state page).

use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use curio_core::User;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Any authenticated user
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let user = state.store.user(user_id).ok_or_else(unauthorized)?;
        Ok(AuthUser(user))
    }
}

/// An authenticated user holding the admin role
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(
                (StatusCode::FORBIDDEN, "Access denied: admins only").into_response()
            );
        }

        Ok(AdminUser(user))
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required",
            "code": 401
        })),
    )
        .into_response()
}
