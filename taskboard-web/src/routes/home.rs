/// Landing page handler

use crate::{app::AppState, error::WebResult, session, views};
use axum::{extract::State, response::Response, Extension};
use taskboard_shared::auth::session::Session;

/// `GET /` - landing page with login/register links
pub async fn home(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
) -> WebResult<Response> {
    let authenticated = session.is_authenticated();
    let flashes = session.take_flashes();

    session::store(
        &session,
        state.session_secret(),
        views::home_page(&flashes, authenticated),
    )
}
