/// Task model and database operations
///
/// Tasks are the to-do items of the system. Each task is owned by exactly
/// one user; a user owns zero or more tasks. Listing is scoped by owner and
/// returns storage order.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     title TEXT NOT NULL,
///     description TEXT,
///     completed INTEGER NOT NULL DEFAULT 0,
///     created_at TEXT NOT NULL
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Task model representing a single to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Surrogate key
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Short title, required
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Whether the task has been marked complete
    pub completed: bool,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
}

/// Input for updating an existing task
///
/// All three fields overwrite the stored values unconditionally; the edit
/// form always submits the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl Task {
    /// Creates a new task owned by `data.user_id`
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, completed, created_at)
            VALUES (?, ?, ?, 0, ?)
            RETURNING id, user_id, title, description, completed, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, completed, created_at
             FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, in storage order
    pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, title, description, completed, created_at
             FROM tasks WHERE user_id = ?
             ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Overwrites title, description, and completed for a task
    ///
    /// Returns the updated task, or `None` if no task with that id exists.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, completed = ?
            WHERE id = ?
            RETURNING id, user_id, title, description, completed, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.completed)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// Returns true if a task was deleted, false if none existed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks owned by a user
    pub async fn count_by_user(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
