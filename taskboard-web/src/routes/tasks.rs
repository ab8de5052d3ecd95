/// Task CRUD handlers
///
/// All routes here sit behind the `require_login` middleware, which injects
/// the authenticated [`CurrentUser`]. Listing and creation are scoped to
/// that user.
///
/// Update and delete load the task by id alone and perform **no ownership
/// check**: any authenticated session can mutate any task by guessing its
/// id. This reproduces the observed behavior of the system; see DESIGN.md
/// for the defect flag.
///
/// # Endpoints
///
/// - `GET /index` - task list
/// - `POST /add` - create task
/// - `GET|POST /update/:task_id` - edit form / apply edit
/// - `GET|POST /delete/:task_id` - delete task

use crate::{
    app::AppState,
    error::{WebError, WebResult},
    session::{self, CurrentUser},
    views,
};
use axum::{
    extract::{Path, State},
    response::{Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::session::{FlashKind, Session},
    models::task::{CreateTask, Task, UpdateTask},
};

/// Add-task form fields
#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Edit-task form fields
///
/// `completed` is a checkbox: present in the submitted form when checked,
/// absent when unchecked. Absence means false, even if the task was
/// previously completed.
#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: Option<String>,
}

/// An empty description input is stored as NULL
fn normalize_description(description: String) -> Option<String> {
    if description.trim().is_empty() {
        None
    } else {
        Some(description)
    }
}

/// `GET /index` - all tasks owned by the session user, in storage order
pub async fn index(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Extension(user): Extension<CurrentUser>,
) -> WebResult<Response> {
    let tasks = Task::list_by_user(&state.db, user.0).await?;
    let flashes = session.take_flashes();

    session::store(
        &session,
        state.session_secret(),
        views::index_page(&flashes, &tasks),
    )
}

/// `POST /add` - create a task owned by the session user
///
/// A missing title fails validation: flash, redirect, no mutation.
pub async fn add(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<NewTaskForm>,
) -> WebResult<Response> {
    if form.title.trim().is_empty() {
        session.flash(FlashKind::Danger, "Title is required!");
        return session::store(&session, state.session_secret(), Redirect::to("/index"));
    }

    Task::create(
        &state.db,
        CreateTask {
            user_id: user.0,
            title: form.title,
            description: normalize_description(form.description),
        },
    )
    .await?;

    session.flash(FlashKind::Success, "Task added successfully!");
    session::store(&session, state.session_secret(), Redirect::to("/index"))
}

/// `GET /update/:task_id` - edit form pre-filled with current values
pub async fn update_form(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Path(task_id): Path<i64>,
) -> WebResult<Response> {
    let task = Task::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| WebError::NotFound(format!("No task with id {}", task_id)))?;

    let flashes = session.take_flashes();
    session::store(
        &session,
        state.session_secret(),
        views::update_page(&flashes, &task),
    )
}

/// `POST /update/:task_id` - overwrite title, description, and completed
pub async fn update(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Path(task_id): Path<i64>,
    Form(form): Form<EditTaskForm>,
) -> WebResult<Response> {
    Task::update(
        &state.db,
        task_id,
        UpdateTask {
            title: form.title,
            description: normalize_description(form.description),
            completed: form.completed.is_some(),
        },
    )
    .await?
    .ok_or_else(|| WebError::NotFound(format!("No task with id {}", task_id)))?;

    session.flash(FlashKind::Success, "Task updated successfully!");
    session::store(&session, state.session_secret(), Redirect::to("/index"))
}

/// `GET|POST /delete/:task_id` - delete a task
pub async fn delete(
    State(state): State<AppState>,
    Extension(mut session): Extension<Session>,
    Path(task_id): Path<i64>,
) -> WebResult<Response> {
    if !Task::delete(&state.db, task_id).await? {
        return Err(WebError::NotFound(format!("No task with id {}", task_id)));
    }

    session.flash(FlashKind::Success, "Task deleted successfully!");
    session::store(&session, state.session_secret(), Redirect::to("/index"))
}
