/// Session authentication middleware
///
/// Resolves the `Authorization: Bearer <token>` header against the session
/// store and injects an [`AuthContext`] into request extensions.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use askboard_api::middleware::auth::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.user.username)
/// }
/// ```

use crate::{app::AppState, error::ApiError};
use askboard_shared::models::user::User;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

/// Authentication context added to request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Logged-in user, as stored at the time of the request
    pub user: User,

    /// Session token the request carried
    pub token: String,
}

impl AuthContext {
    /// The acting user, in the shape the data store expects
    pub fn actor(&self) -> Option<&User> {
        Some(&self.user)
    }
}

/// Extracts the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))
}

/// Session authentication middleware layer
///
/// Lock order: store, then sessions.
pub async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let user = {
        let store = state.store.read().await;
        let sessions = state.sessions.read().await;
        sessions.current_user(&**store, &token)
    }
    .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".to_string()))?;

    tracing::debug!(user_id = %user.id, "request authenticated");
    req.extensions_mut().insert(AuthContext { user, token });

    Ok(next.run(req).await)
}
