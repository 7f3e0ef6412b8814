//! # Askboard API Server
//!
//! Serves the Askboard Q&A forum over HTTP: questions, answers, votes,
//! comment threads, notifications and the admin panel.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p askboard-api
//! ```

use askboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use askboard_shared::{seed::seed_store, store::InMemoryStore};
use std::future::Future;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let json_logs = config.json_logs();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askboard_api=debug,askboard_shared=info,tower_http=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!(
        "Askboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let mut store = InMemoryStore::new();
    if config.forum.seed_mock_data {
        let summary = seed_store(&mut store)?;
        tracing::info!(
            users = summary.users,
            questions = summary.questions,
            answers = summary.answers,
            comments = summary.comments,
            "mock data loaded"
        );
    }

    let address = config.bind_address();
    let production = config.api.production;
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(production, "Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves once `signal` fires
///
/// A signal listener that fails to install never resolves, so the server
/// keeps running instead of shutting down at startup.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Shutdown signal received, exiting..."),
        Err(e) => {
            tracing::error!("failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
