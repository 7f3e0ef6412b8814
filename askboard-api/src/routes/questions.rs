/// Question endpoints
///
/// # Endpoints
///
/// - `GET /v1/questions` - List questions (sort, filter, search, tags)
/// - `POST /v1/questions` - Ask a question
/// - `GET /v1/questions/:id` - Question detail with its answers
/// - `POST /v1/questions/:id/answers` - Answer a question
/// - `POST /v1/questions/:id/accept` - Accept an answer (question author only)

use crate::{
    app::AppState,
    error::ApiResult,
    middleware::auth::AuthContext,
};
use askboard_shared::models::{
    answer::{Answer, CreateAnswer},
    question::{CreateQuestion, Question, QuestionFilter, QuestionQuery, QuestionSort},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

/// Query string for the question list
///
/// `tags` is comma-separated; every listed tag must be present.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuestionsParams {
    pub sort: Option<QuestionSort>,
    pub filter: Option<QuestionFilter>,
    pub search: Option<String>,
    pub tags: Option<String>,
}

impl From<ListQuestionsParams> for QuestionQuery {
    fn from(params: ListQuestionsParams) -> Self {
        Self {
            sort: params.sort.unwrap_or_default(),
            filter: params.filter.unwrap_or_default(),
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            tags: params
                .tags
                .map(|raw| {
                    raw.split(',')
                        .map(|t| t.trim().to_lowercase())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Accept request
#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub answer_id: Uuid,
}

/// List questions
///
/// # Example
///
/// ```text
/// GET /v1/questions?sort=votes&filter=unanswered&search=react&tags=javascript,hooks
/// ```
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListQuestionsParams>,
) -> ApiResult<Json<Vec<Question>>> {
    let query = QuestionQuery::from(params);
    let questions = state.store.read().await.list_questions(&query);
    Ok(Json(questions))
}

/// Question detail
///
/// Each fetch counts as a view.
///
/// # Errors
///
/// - `404 Not Found`: No such question
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Question>> {
    let question = state.store.write().await.record_view(id)?;
    Ok(Json(question))
}

/// Ask a question
///
/// # Endpoint
///
/// ```text
/// POST /v1/questions
/// Authorization: Bearer ask_...
///
/// {
///   "title": "How do I use React hooks effectively?",
///   "description": "...",
///   "tags": ["react", "javascript"]
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Not logged in
/// - `422 Unprocessable Entity`: Blank title or description, too many tags
pub async fn create_question(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateQuestion>,
) -> ApiResult<(StatusCode, Json<Question>)> {
    let question = state.store.write().await.add_question(auth.actor(), req)?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// Answer a question
///
/// # Errors
///
/// - `404 Not Found`: No such question
/// - `422 Unprocessable Entity`: Blank content
pub async fn create_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateAnswer>,
) -> ApiResult<(StatusCode, Json<Answer>)> {
    let answer = state
        .store
        .write()
        .await
        .add_answer(auth.actor(), id, req)?;
    Ok((StatusCode::CREATED, Json(answer)))
}

/// Accept an answer
///
/// # Errors
///
/// - `403 Forbidden`: Caller did not ask the question
/// - `404 Not Found`: No such question, or the answer belongs elsewhere
/// - `409 Conflict`: An answer is already accepted
pub async fn accept_answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<AcceptRequest>,
) -> ApiResult<Json<Answer>> {
    let answer = state
        .store
        .write()
        .await
        .accept_answer(auth.actor(), id, req.answer_id)?;
    Ok(Json(answer))
}
