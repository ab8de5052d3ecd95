/// Session cookie plumbing and middleware
///
/// Two middleware layers cooperate here:
///
/// 1. `session_layer` runs on every request: it decodes the `session`
///    cookie into a typed [`Session`] and inserts it into request
///    extensions. A missing or invalid cookie yields a fresh session.
/// 2. `require_login` sits in front of task-scoped routes: if the session
///    carries no user identifier it redirects to `/login`; otherwise it
///    injects a [`CurrentUser`] extension and lets the request through.
///
/// Handlers that mutate the session (login, flash messages) commit it back
/// to the client with [`store`], which signs the session and appends a
/// `Set-Cookie` header to the response.

use crate::{
    app::AppState,
    error::{WebError, WebResult},
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use taskboard_shared::auth::session::{Session, SESSION_COOKIE};

/// Identifier of the authenticated user, injected by `require_login`
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

/// Extracts the session token from the Cookie header, if present
fn cookie_token(req: &Request) -> Option<String> {
    let cookies = req.headers().get(header::COOKIE)?.to_str().ok()?;

    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(str::to_string)
}

/// Session decoding middleware
///
/// Applied to the whole router so every handler can read the session from
/// request extensions.
pub async fn session_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = cookie_token(&req);
    let session = Session::from_token(token.as_deref(), state.session_secret());

    req.extensions_mut().insert(session);

    next.run(req).await
}

/// Login-requirement middleware for task-scoped routes
///
/// Redirects to `/login` when the session carries no user identifier; no
/// detail beyond the redirect is surfaced.
pub async fn require_login(mut req: Request, next: Next) -> Response {
    let user_id = req
        .extensions()
        .get::<Session>()
        .and_then(|session| session.user_id);

    match user_id {
        Some(user_id) => {
            req.extensions_mut().insert(CurrentUser(user_id));
            next.run(req).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Commits the session back to the client on a response
///
/// Every handler that rendered flashes (draining them) or changed the login
/// state must respond through this, or the client keeps the stale cookie.
pub fn store(
    session: &Session,
    secret: &str,
    response: impl IntoResponse,
) -> WebResult<Response> {
    let token = session.encode(secret)?;
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token);
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| WebError::Internal(format!("Invalid cookie header: {}", e)))?;

    let mut response = response.into_response();
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(response)
}
