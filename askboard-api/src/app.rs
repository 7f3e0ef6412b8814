/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use askboard_api::{app::AppState, config::Config};
/// use askboard_shared::store::InMemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(InMemoryStore::new(), config);
/// let app = askboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::auth::session_auth_layer};
use askboard_shared::{auth::session::SessionStore, store::DataStore};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared handle to the data store
pub type SharedStore = Arc<RwLock<Box<dyn DataStore>>>;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
///
/// When a handler needs both locks it takes `store` first, then `sessions`.
#[derive(Clone)]
pub struct AppState {
    /// Forum data
    pub store: SharedStore,

    /// Logged-in sessions
    pub sessions: Arc<RwLock<SessionStore>>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state around a data store
    pub fn new<S>(store: S, config: Config) -> Self
    where
        S: DataStore + 'static,
    {
        Self {
            store: Arc::new(RwLock::new(Box::new(store))),
            sessions: Arc::new(RwLock::new(SessionStore::new())),
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// └── /v1/
///     ├── /auth/                       # register, login (public); logout, me
///     ├── /questions                   # list (public), ask
///     │   └── /:id                     # detail (public)
///     │       ├── /answers             # answer
///     │       ├── /accept              # accept an answer
///     │       ├── /vote                # vote, my vote
///     │       └── /comments            # list (public), comment
///     ├── /answers/:id/{vote,comments}
///     ├── /comments/:id/like
///     ├── /notifications               # list, unread count, mark read
///     └── /admin/                      # stats, bans, announcements, deletions, export
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Reads and login (public)
    let public_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/questions", get(routes::questions::list_questions))
        .route("/questions/:id", get(routes::questions::get_question))
        .route(
            "/questions/:id/comments",
            get(routes::comments::list_question_comments),
        )
        .route(
            "/answers/:id/comments",
            get(routes::comments::list_answer_comments),
        );

    // Everything that acts as a user
    let session_routes = Router::new()
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/me", get(routes::auth::me))
        .route("/questions", post(routes::questions::create_question))
        .route("/questions/:id/answers", post(routes::questions::create_answer))
        .route("/questions/:id/accept", post(routes::questions::accept_answer))
        .route(
            "/questions/:id/vote",
            post(routes::votes::vote_question).get(routes::votes::my_question_vote),
        )
        .route(
            "/answers/:id/vote",
            post(routes::votes::vote_answer).get(routes::votes::my_answer_vote),
        )
        .route(
            "/questions/:id/comments",
            post(routes::comments::comment_on_question),
        )
        .route(
            "/answers/:id/comments",
            post(routes::comments::comment_on_answer),
        )
        .route("/comments/:id/like", post(routes::comments::like_comment))
        .route("/notifications", get(routes::notifications::list_notifications))
        .route(
            "/notifications/unread",
            get(routes::notifications::unread_count),
        )
        .route("/notifications/read", post(routes::notifications::mark_read))
        .route("/admin/stats", get(routes::admin::stats))
        .route("/admin/bans", post(routes::admin::ban_user))
        .route("/admin/announcements", post(routes::admin::send_announcement))
        .route("/admin/questions/:id", delete(routes::admin::delete_question))
        .route("/admin/export/:kind", get(routes::admin::export_data))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let v1_routes = public_routes.merge(session_routes);

    // Configure CORS based on environment
    let cors = if state.config.cors_permissive() {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
