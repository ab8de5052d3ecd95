/// Integration tests driving the full router
///
/// Each test builds the app over a fresh in-memory database and exercises
/// the real endpoints, carrying the session cookie between requests the way
/// a browser would.

mod common;

use axum::http::StatusCode;
use common::{body_string, form, location, login, register, session_cookie, TestContext};
use taskboard_shared::models::{task::Task, user::User};

#[tokio::test]
async fn test_health_check() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    let response = ctx.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await)?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    Ok(())
}

#[tokio::test]
async fn test_register_login_and_task_lifecycle() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    // Register and log in.
    let response = register(&ctx, "alice", "pw1", "pw1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert_eq!(User::count(&ctx.db).await?, 1);

    let mut cookie = login(&ctx, "alice", "pw1").await;

    // Add a task.
    let response = ctx
        .post_form(
            "/add",
            Some(&cookie),
            &form(&[("title", "Buy milk"), ("description", "2 liters")]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/index"));
    cookie = session_cookie(&response).unwrap();

    // It shows up uncompleted on the list.
    let response = ctx.get("/index", Some(&cookie)).await;
    cookie = session_cookie(&response).unwrap();
    let html = body_string(response).await;
    assert!(html.contains("Buy milk"));
    assert!(html.contains("[ ]"));
    assert!(html.contains("Task added successfully!"));

    let tasks = Task::list_by_user(&ctx.db, 1).await?;
    assert_eq!(tasks.len(), 1);
    let task_id = tasks[0].id;

    // Mark it complete through the edit form.
    let response = ctx
        .post_form(
            &format!("/update/{}", task_id),
            Some(&cookie),
            &form(&[
                ("title", "Buy milk"),
                ("description", "2 liters"),
                ("completed", "on"),
            ]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    cookie = session_cookie(&response).unwrap();

    let response = ctx.get("/index", Some(&cookie)).await;
    cookie = session_cookie(&response).unwrap();
    let html = body_string(response).await;
    assert!(html.contains("[x]"));
    assert!(html.contains("Task updated successfully!"));

    // Delete it.
    let response = ctx
        .get(&format!("/delete/{}", task_id), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    cookie = session_cookie(&response).unwrap();

    let response = ctx.get("/index", Some(&cookie)).await;
    let html = body_string(response).await;
    assert!(html.contains("No tasks yet."));
    assert!(html.contains("Task deleted successfully!"));
    assert_eq!(Task::count_by_user(&ctx.db, 1).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_rejected() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    let response = register(&ctx, "alice", "other", "other").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/register"));
    assert_eq!(User::count(&ctx.db).await?, 1);

    // The rejection surfaces as a flash on the registration form.
    let cookie = session_cookie(&response).unwrap();
    let response = ctx.get("/register", Some(&cookie)).await;
    let html = body_string(response).await;
    assert!(html.contains("Username already exists."));

    Ok(())
}

#[tokio::test]
async fn test_registration_password_mismatch_creates_no_user() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    let response = register(&ctx, "alice", "pw1", "pw2").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/register"));
    assert_eq!(User::count(&ctx.db).await?, 0);

    let cookie = session_cookie(&response).unwrap();
    let response = ctx.get("/register", Some(&cookie)).await;
    let html = body_string(response).await;
    assert!(html.contains("Passwords do not match."));

    Ok(())
}

#[tokio::test]
async fn test_login_failure_is_generic() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;

    // Wrong password and unknown user produce the identical message.
    for (username, password) in [("alice", "wrong"), ("nobody", "pw1")] {
        let response = ctx
            .post_form(
                "/login",
                None,
                &form(&[("username", username), ("password", password)]),
            )
            .await;
        assert_eq!(location(&response), Some("/login"));

        let cookie = session_cookie(&response).unwrap();
        let response = ctx.get("/login", Some(&cookie)).await;
        let html = body_string(response).await;
        assert!(html.contains("Invalid username or password."));
    }

    Ok(())
}

#[tokio::test]
async fn test_task_list_is_scoped_to_session_user() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    register(&ctx, "bob", "pw2", "pw2").await;

    let alice = login(&ctx, "alice", "pw1").await;
    let bob = login(&ctx, "bob", "pw2").await;

    let response = ctx
        .post_form("/add", Some(&alice), &form(&[("title", "Alice's chore")]))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx.get("/index", Some(&bob)).await;
    let html = body_string(response).await;
    assert!(!html.contains("Alice&#39;s chore"));
    assert!(html.contains("No tasks yet."));

    Ok(())
}

#[tokio::test]
async fn test_anonymous_index_redirects_to_login() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    let response = ctx.get("/index", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    Ok(())
}

#[tokio::test]
async fn test_logout_ends_the_session() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    let cookie = login(&ctx, "alice", "pw1").await;

    let response = ctx.get("/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    let cookie = session_cookie(&response).unwrap();

    // The logged-out cookie no longer grants access to the task list.
    let response = ctx.get("/index", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    Ok(())
}

#[tokio::test]
async fn test_add_with_empty_title_creates_nothing() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    let cookie = login(&ctx, "alice", "pw1").await;

    let response = ctx
        .post_form(
            "/add",
            Some(&cookie),
            &form(&[("title", "   "), ("description", "ignored")]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/index"));
    assert_eq!(Task::count_by_user(&ctx.db, 1).await?, 0);

    let cookie = session_cookie(&response).unwrap();
    let response = ctx.get("/index", Some(&cookie)).await;
    let html = body_string(response).await;
    assert!(html.contains("Title is required!"));
    assert!(html.contains("alert-danger"));

    Ok(())
}

#[tokio::test]
async fn test_update_without_checkbox_clears_completed() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    let cookie = login(&ctx, "alice", "pw1").await;

    let response = ctx
        .post_form("/add", Some(&cookie), &form(&[("title", "Laundry")]))
        .await;
    let cookie = session_cookie(&response).unwrap();
    let task_id = Task::list_by_user(&ctx.db, 1).await?[0].id;

    // Complete it, then resubmit without the checkbox.
    let response = ctx
        .post_form(
            &format!("/update/{}", task_id),
            Some(&cookie),
            &form(&[("title", "Laundry"), ("completed", "on")]),
        )
        .await;
    let cookie = session_cookie(&response).unwrap();
    assert!(Task::find_by_id(&ctx.db, task_id).await?.unwrap().completed);

    let response = ctx
        .post_form(
            &format!("/update/{}", task_id),
            Some(&cookie),
            &form(&[("title", "Laundry")]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(!Task::find_by_id(&ctx.db, task_id).await?.unwrap().completed);

    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_missing_task_return_404() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    let cookie = login(&ctx, "alice", "pw1").await;

    let response = ctx.get("/update/999", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .post_form("/update/999", Some(&cookie), &form(&[("title", "ghost")]))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx.get("/delete/999", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_flash_messages_show_exactly_once() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    let cookie = login(&ctx, "alice", "pw1").await;

    // First page view renders the login flash.
    let response = ctx.get("/index", Some(&cookie)).await;
    let cookie = session_cookie(&response).unwrap();
    let html = body_string(response).await;
    assert!(html.contains("Welcome back, alice!"));

    // Reloading with the refreshed cookie does not repeat it.
    let response = ctx.get("/index", Some(&cookie)).await;
    let html = body_string(response).await;
    assert!(!html.contains("Welcome back, alice!"));

    Ok(())
}

#[tokio::test]
async fn test_tampered_cookie_is_treated_as_anonymous() -> anyhow::Result<()> {
    let ctx = TestContext::new().await?;

    register(&ctx, "alice", "pw1", "pw1").await;
    let cookie = login(&ctx, "alice", "pw1").await;

    // Corrupt the signature portion of the token.
    let tampered = format!("{}x", cookie);
    let response = ctx.get("/index", Some(&tampered)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    Ok(())
}
