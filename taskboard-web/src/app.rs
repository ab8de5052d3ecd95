/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_web::{app::{build_router, AppState}, config::Config};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, session};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the pool
/// and config are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the secret used to sign session cookies
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET      /               # Landing page
/// ├── GET      /health         # Liveness + database check
/// ├── GET|POST /register       # Create account
/// ├── GET|POST /login          # Authenticate, establish session
/// ├── GET      /logout         # Clear session
/// └── (session-gated)
///     ├── GET      /index            # Task list
///     ├── POST     /add              # Create task
///     ├── GET|POST /update/:task_id  # Edit task
///     └── GET|POST /delete/:task_id  # Delete task
/// ```
///
/// The session-decoding middleware wraps the whole router; the gated routes
/// additionally sit behind `require_login`, which redirects anonymous
/// requests to `/login`.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: no session required (the session is still decoded so
    // flash messages work on the auth pages).
    let public_routes = Router::new()
        .route("/", get(routes::home::home))
        .route("/health", get(routes::health::health_check))
        .route(
            "/register",
            get(routes::auth::register_form).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_form).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout));

    // Task routes: require a logged-in session.
    let task_routes = Router::new()
        .route("/index", get(routes::tasks::index))
        .route("/add", post(routes::tasks::add))
        .route(
            "/update/:task_id",
            get(routes::tasks::update_form).post(routes::tasks::update),
        )
        .route(
            "/delete/:task_id",
            get(routes::tasks::delete).post(routes::tasks::delete),
        )
        .layer(axum::middleware::from_fn(session::require_login));

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session::session_layer,
        ))
        .with_state(state)
}
