/// Comment endpoints
///
/// Comments hang off a question or an answer. A comment may carry replies,
/// but replies cannot be replied to.
///
/// # Endpoints
///
/// - `GET /v1/questions/:id/comments`, `GET /v1/answers/:id/comments` - Threads, oldest first
/// - `POST /v1/questions/:id/comments`, `POST /v1/answers/:id/comments` - Comment or reply
/// - `POST /v1/comments/:id/like` - Like a comment

use crate::{app::AppState, error::ApiResult, middleware::auth::AuthContext};
use askboard_shared::models::{
    comment::{Comment, CreateComment},
    vote::Target,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

async fn threads(state: AppState, target: Target) -> ApiResult<Json<Vec<Comment>>> {
    let comments = state.store.read().await.comments(target)?;
    Ok(Json(comments))
}

async fn post(
    state: AppState,
    auth: AuthContext,
    target: Target,
    req: CreateComment,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    let comment = state
        .store
        .write()
        .await
        .add_comment(auth.actor(), target, req)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_question_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Comment>>> {
    threads(state, Target::question(id)).await
}

pub async fn list_answer_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Comment>>> {
    threads(state, Target::answer(id)).await
}

/// Comment on a question
///
/// Set `parent_id` to reply to a top-level comment on the same question.
///
/// # Errors
///
/// - `400 Bad Request`: `parent_id` is itself a reply
/// - `404 Not Found`: No such question or parent comment
/// - `422 Unprocessable Entity`: Blank content
pub async fn comment_on_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateComment>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    post(state, auth, Target::question(id), req).await
}

/// Comment on an answer
pub async fn comment_on_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateComment>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    post(state, auth, Target::answer(id), req).await
}

/// Like a comment or reply
///
/// Each call adds one like.
pub async fn like_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Comment>> {
    let comment = state.store.write().await.like_comment(auth.actor(), id)?;
    Ok(Json(comment))
}
