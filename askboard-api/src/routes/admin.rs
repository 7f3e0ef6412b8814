/// Admin panel endpoints
///
/// Every endpoint requires the `admin` role; other users get `403`.
///
/// # Endpoints
///
/// - `GET /v1/admin/stats` - Forum counters
/// - `POST /v1/admin/bans` - Ban a user and end their sessions
/// - `POST /v1/admin/announcements` - Notify every other user
/// - `DELETE /v1/admin/questions/:id` - Remove a question
/// - `GET /v1/admin/export/:kind` - Dump `questions` or `users` as JSON

use crate::{app::AppState, error::ApiResult, middleware::auth::AuthContext};
use askboard_shared::{
    admin::{self, AdminStats, Announcement, BanRequest, DataExport, ExportKind},
    auth::authorization::require_role,
    models::{
        question::Question,
        user::{Ban, UserRole},
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct AnnouncementResponse {
    /// Number of users notified
    pub recipients: usize,
}

/// Forum counters for the dashboard
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<AdminStats>> {
    require_role(&auth.user, UserRole::Admin)?;
    let store = state.store.read().await;
    Ok(Json(AdminStats::collect(&**store)))
}

/// Ban a user
///
/// # Errors
///
/// - `400 Bad Request`: Banning yourself or an already banned user
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: No such user
/// - `422 Unprocessable Entity`: Blank reason
pub async fn ban_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<BanRequest>,
) -> ApiResult<(StatusCode, Json<Ban>)> {
    let mut store = state.store.write().await;
    let mut sessions = state.sessions.write().await;
    let ban = admin::ban_user(&mut **store, &mut sessions, auth.actor(), req)?;
    Ok((StatusCode::CREATED, Json(ban)))
}

/// Send an announcement
pub async fn send_announcement(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<Announcement>,
) -> ApiResult<Json<AnnouncementResponse>> {
    let mut store = state.store.write().await;
    let recipients = admin::send_announcement(&mut **store, auth.actor(), req)?;
    Ok(Json(AnnouncementResponse { recipients }))
}

/// Remove a question with its answers, votes and comments
pub async fn delete_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Question>> {
    let mut store = state.store.write().await;
    let question = admin::delete_question(&mut **store, auth.actor(), id)?;
    Ok(Json(question))
}

/// Export the questions or users collection
///
/// # Errors
///
/// - `400 Bad Request`: `kind` is not `questions` or `users`
/// - `403 Forbidden`: Caller is not an admin
pub async fn export_data(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(kind): Path<ExportKind>,
) -> ApiResult<Json<DataExport>> {
    let store = state.store.read().await;
    let export = admin::export(&**store, auth.actor(), kind)?;
    Ok(Json(export))
}
