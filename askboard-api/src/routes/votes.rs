/// Voting endpoints
///
/// A user holds at most one vote per question or answer. Casting the same
/// direction again withdraws the vote; the opposite direction replaces it.
///
/// # Endpoints
///
/// - `POST /v1/questions/:id/vote` - Vote on a question
/// - `GET /v1/questions/:id/vote` - The caller's vote on a question
/// - `POST /v1/answers/:id/vote` - Vote on an answer
/// - `GET /v1/answers/:id/vote` - The caller's vote on an answer

use crate::{app::AppState, error::ApiResult, middleware::auth::AuthContext};
use askboard_shared::models::vote::{Target, VoteOutcome, VoteValue};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vote request; `value` is `1` or `-1`
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub value: VoteValue,
}

/// The caller's current vote
#[derive(Debug, Serialize)]
pub struct MyVoteResponse {
    pub target: Target,

    /// `1`, `-1`, or null when the caller has not voted
    pub value: Option<VoteValue>,
}

async fn cast(
    state: AppState,
    auth: AuthContext,
    target: Target,
    value: VoteValue,
) -> ApiResult<Json<VoteOutcome>> {
    let outcome = state.store.write().await.vote(auth.actor(), target, value)?;
    Ok(Json(outcome))
}

async fn current(state: AppState, auth: AuthContext, target: Target) -> ApiResult<Json<MyVoteResponse>> {
    let value = state.store.read().await.get_user_vote(auth.user.id, target);
    Ok(Json(MyVoteResponse { target, value }))
}

/// Vote on a question
///
/// # Errors
///
/// - `404 Not Found`: No such question
/// - `422 Unprocessable Entity`: `value` is not 1 or -1
pub async fn vote_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Json<VoteOutcome>> {
    cast(state, auth, Target::question(id), req.value).await
}

/// Vote on an answer
pub async fn vote_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Json<VoteOutcome>> {
    cast(state, auth, Target::answer(id), req.value).await
}

pub async fn my_question_vote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MyVoteResponse>> {
    current(state, auth, Target::question(id)).await
}

pub async fn my_answer_vote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MyVoteResponse>> {
    current(state, auth, Target::answer(id)).await
}
