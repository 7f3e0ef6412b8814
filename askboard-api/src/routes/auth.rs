/// Authentication endpoints
///
/// Login is by username only; there are no passwords. A successful
/// register or login returns a bearer token for later requests.
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Create an account and log in
/// - `POST /v1/auth/login` - Log in as an existing user
/// - `POST /v1/auth/logout` - End the current session
/// - `GET /v1/auth/me` - The logged-in user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthContext,
};
use askboard_shared::{
    auth::session::Session,
    models::user::{CreateUser, User, UserRole},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(
        length(min = 3, max = 32, message = "Username must be 3-32 characters"),
        custom(function = "askboard_shared::validation::username_chars")
    )]
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "askboard_shared::validation::not_blank"))]
    pub username: String,
}

/// Response for register and login
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token
    pub token: String,

    /// The logged-in user
    pub user: User,
}

impl SessionResponse {
    fn new(session: Session, user: User) -> Self {
        Self {
            token: session.token,
            user,
        }
    }
}

/// Register a new user
///
/// New accounts always get the `user` role.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Invalid username
/// - `409 Conflict`: Username already taken
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    req.validate()?;

    let mut store = state.store.write().await;
    let mut sessions = state.sessions.write().await;

    let session = sessions.register(
        &mut **store,
        CreateUser {
            username: req.username,
            role: UserRole::User,
        },
    )?;
    let user = store
        .find_user(session.user_id)
        .ok_or_else(|| ApiError::InternalError("registered user vanished".to_string()))?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok((StatusCode::CREATED, Json(SessionResponse::new(session, user))))
}

/// Log in by username
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown username
/// - `403 Forbidden`: Account is banned
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    req.validate()?;

    let store = state.store.read().await;
    let mut sessions = state.sessions.write().await;

    let session = sessions.login(&**store, req.username.trim())?;
    let user = store
        .find_user(session.user_id)
        .ok_or_else(|| ApiError::InternalError("logged-in user vanished".to_string()))?;

    Ok(Json(SessionResponse::new(session, user)))
}

/// End the current session
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<StatusCode> {
    state.sessions.write().await.logout(&auth.token);
    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in user
pub async fn me(Extension(auth): Extension<AuthContext>) -> ApiResult<Json<User>> {
    Ok(Json(auth.user))
}
