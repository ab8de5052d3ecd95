/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for driving the full router
/// in-process:
/// - An in-memory SQLite pool with migrations applied
/// - Request helpers for GET and form POST, with cookie support
/// - Session cookie extraction so tests can carry state between requests
///
/// The pool is capped at one connection: each SQLite in-memory connection
/// is its own database.

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use taskboard_shared::db::migrations::run_migrations;
use taskboard_shared::db::pool::{create_pool, DatabaseConfig as PoolConfig};
use taskboard_web::app::{build_router, AppState};
use taskboard_web::config::{Config, DatabaseConfig, HttpConfig, SessionConfig};
use tower::Service as _;

/// Test context containing the app and its backing store
pub struct TestContext {
    pub db: sqlx::SqlitePool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config {
            http: HttpConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: "integration-test-secret-at-least-32-bytes".to_string(),
            },
        };

        let db = create_pool(PoolConfig {
            url: config.database.url.clone(),
            max_connections: config.database.max_connections,
            ..Default::default()
        })
        .await?;

        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Sends a GET request, optionally with a session cookie
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        self.request("GET", path, cookie, None).await
    }

    /// Sends a form-encoded POST request, optionally with a session cookie
    pub async fn post_form(&self, path: &str, cookie: Option<&str>, body: &str) -> Response {
        self.request("POST", path, cookie, Some(body)).await
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        cookie: Option<&str>,
        form_body: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match form_body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.app.clone().call(request).await.unwrap()
    }
}

/// Encodes form fields as an application/x-www-form-urlencoded body
pub fn form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

/// Extracts the `session=...` cookie pair from a response, if set
pub fn session_cookie(response: &Response) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    value.split(';').next().map(|pair| pair.trim().to_string())
}

/// Reads the full response body as a string
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Registers an account through the real endpoint
pub async fn register(ctx: &TestContext, username: &str, password: &str, confirm: &str) -> Response {
    ctx.post_form(
        "/register",
        None,
        &form(&[
            ("username", username),
            ("password", password),
            ("confirm", confirm),
        ]),
    )
    .await
}

/// Logs in through the real endpoint and returns the session cookie
pub async fn login(ctx: &TestContext, username: &str, password: &str) -> String {
    let response = ctx
        .post_form(
            "/login",
            None,
            &form(&[("username", username), ("password", password)]),
        )
        .await;

    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/index",
        "Login should redirect to the task list"
    );

    session_cookie(&response).expect("Login should set a session cookie")
}

/// Returns the redirect target of a response, if any
pub fn location(response: &Response) -> Option<&str> {
    response.headers().get(header::LOCATION)?.to_str().ok()
}
