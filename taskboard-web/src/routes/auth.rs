/// Authentication handlers
///
/// Registration, login, and logout. Validation failures are recovered
/// locally: a flash message is queued and the browser is redirected back to
/// the originating form, with no state mutation.
///
/// # Endpoints
///
/// - `GET /register` / `POST /register` - create account
/// - `GET /login` / `POST /login` - authenticate and establish the session
/// - `GET /logout` - clear the session
///
/// The login failure message never distinguishes an unknown username from a
/// wrong password, so usernames cannot be enumerated.

use crate::{app::AppState, error::WebResult, session, views};
use axum::{
    extract::State,
    response::{Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::{
        password,
        session::{FlashKind, Session},
    },
    models::user::{CreateUser, User},
};

/// Registration form fields
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `GET /register` - registration form
pub async fn register_form(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
) -> WebResult<Response> {
    let flashes = session.take_flashes();
    session::store(
        &session,
        state.session_secret(),
        views::register_page(&flashes),
    )
}

/// `POST /register` - create a new account
///
/// Requires username, password, and confirmation. Duplicate usernames are
/// rejected by a pre-check before the insert; the schema's UNIQUE constraint
/// is only a backstop against the unhandled registration race.
pub async fn register(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    let username = form.username.trim();

    if username.is_empty() || form.password.is_empty() || form.confirm.is_empty() {
        session.flash(FlashKind::Danger, "All fields are required.");
        return session::store(
            &session,
            state.session_secret(),
            Redirect::to("/register"),
        );
    }

    if form.password != form.confirm {
        session.flash(FlashKind::Danger, "Passwords do not match.");
        return session::store(
            &session,
            state.session_secret(),
            Redirect::to("/register"),
        );
    }

    if User::find_by_username(&state.db, username).await?.is_some() {
        session.flash(FlashKind::Danger, "Username already exists.");
        return session::store(
            &session,
            state.session_secret(),
            Redirect::to("/register"),
        );
    }

    let password_hash = password::hash_password(&form.password)?;
    let user = User::create(
        &state.db,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    session.flash(FlashKind::Success, "Registration successful! Please log in.");
    session::store(&session, state.session_secret(), Redirect::to("/login"))
}

/// `GET /login` - login form
pub async fn login_form(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
) -> WebResult<Response> {
    let flashes = session.take_flashes();
    session::store(&session, state.session_secret(), views::login_page(&flashes))
}

/// `POST /login` - verify credentials and establish the session
pub async fn login(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    let user = User::find_by_username(&state.db, form.username.trim()).await?;

    let verified = match &user {
        Some(user) => password::verify_password(&form.password, &user.password_hash)?,
        None => false,
    };

    match (user, verified) {
        (Some(user), true) => {
            tracing::info!(user_id = user.id, "Login succeeded");

            session.log_in(user.id);
            session.flash(FlashKind::Success, format!("Welcome back, {}!", user.username));
            session::store(&session, state.session_secret(), Redirect::to("/index"))
        }
        _ => {
            // Same message for unknown user and wrong password.
            session.flash(FlashKind::Danger, "Invalid username or password.");
            session::store(&session, state.session_secret(), Redirect::to("/login"))
        }
    }
}

/// `GET /logout` - clear the session; always succeeds
pub async fn logout(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
) -> WebResult<Response> {
    session.log_out();
    session.flash(FlashKind::Success, "You have been logged out.");
    session::store(&session, state.session_secret(), Redirect::to("/login"))
}
