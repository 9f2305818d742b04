pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wordquiz_core::{Oracle, QuizEngine, SynonymLookup, Vocabulary};

use crate::config::Config;
use crate::services::access::AccessGate;
use crate::services::sessions::SessionStore;
use crate::services::synonyms::HttpSynonyms;

/// Quiz engine with whichever synonym source was configured
pub type Engine = QuizEngine<Box<dyn SynonymLookup>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub sessions: Arc<SessionStore>,
    pub access: Arc<AccessGate>,
}

impl AppState {
    pub fn new(engine: Engine, access: AccessGate) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Arc::new(SessionStore::new()),
            access: Arc::new(access),
        }
    }
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/modes", get(routes::session::modes))
        .route("/api/session", get(routes::session::status))
        .route("/api/session/mode", post(routes::session::select_mode))
        .route("/api/session/answer", post(routes::session::submit_answer))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(routes::auth::login))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading vocabulary from {}...", config.vocabulary_path.display());
    let vocabulary = Vocabulary::load(&config.vocabulary_path, config.line_policy)
        .context("cannot start without a vocabulary")?;

    let synonyms = HttpSynonyms::new(&config.synonym_base_url, config.synonym_timeout)
        .context("failed to build synonym HTTP client")?;
    if !config.oracle.online_synonyms {
        tracing::info!("Online synonym lookup disabled");
    }
    let oracle = Oracle::new(Box::new(synonyms) as Box<dyn SynonymLookup>, config.oracle);

    let state = AppState::new(
        QuizEngine::new(Arc::new(vocabulary), oracle),
        AccessGate::new(config.access_password.clone()),
    );

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
