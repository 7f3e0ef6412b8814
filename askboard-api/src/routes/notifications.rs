/// Notification endpoints
///
/// - `GET /v1/notifications` - The caller's notifications, newest first
/// - `GET /v1/notifications/unread` - Unread count
/// - `POST /v1/notifications/read` - Mark everything read

use crate::{app::AppState, error::ApiResult, middleware::auth::AuthContext};
use askboard_shared::models::notification::Notification;
use axum::{extract::State, Extension, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UnreadResponse {
    pub unread: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    /// How many notifications changed from unread to read
    pub marked: usize,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Notification>>> {
    let notifications = state.store.read().await.notifications(auth.user.id);
    Ok(Json(notifications))
}

pub async fn unread_count(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UnreadResponse>> {
    let unread = state
        .store
        .read()
        .await
        .unread_notification_count(auth.user.id);
    Ok(Json(UnreadResponse { unread }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MarkReadResponse>> {
    let marked = state
        .store
        .write()
        .await
        .mark_notifications_read(auth.user.id);
    Ok(Json(MarkReadResponse { marked }))
}
