/// Server-rendered HTML pages
///
/// The view layer is deliberately small: a shared layout, one function per
/// page, and manual escaping. Handlers pass in the drained flash messages
/// and whatever records the page shows; nothing here touches the store.

use axum::response::Html;
use taskboard_shared::auth::session::Flash;
use taskboard_shared::models::task::Task;

/// Escapes text for safe interpolation into HTML
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared page skeleton with flash messages rendered at the top
fn layout(title: &str, flashes: &[Flash], body: &str) -> Html<String> {
    let mut alerts = String::new();
    for flash in flashes {
        alerts.push_str(&format!(
            "<div class=\"alert alert-{}\">{}</div>\n",
            flash.kind.as_str(),
            escape(&flash.message)
        ));
    }

    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{} - Taskboard</title>\n\
         </head>\n\
         <body>\n\
         <h1>{}</h1>\n\
         {}\
         {}\n\
         </body>\n\
         </html>\n",
        escape(title),
        escape(title),
        alerts,
        body
    ))
}

/// Landing page
pub fn home_page(flashes: &[Flash], authenticated: bool) -> Html<String> {
    let nav = if authenticated {
        "<p><a href=\"/index\">My tasks</a> | <a href=\"/logout\">Log out</a></p>"
    } else {
        "<p><a href=\"/login\">Log in</a> | <a href=\"/register\">Register</a></p>"
    };

    layout(
        "Taskboard",
        flashes,
        &format!("<p>A simple personal task list.</p>\n{}", nav),
    )
}

/// Registration form
pub fn register_page(flashes: &[Flash]) -> Html<String> {
    layout(
        "Register",
        flashes,
        "<form method=\"post\" action=\"/register\">\n\
         <p><label>Username <input type=\"text\" name=\"username\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
         <p><label>Confirm password <input type=\"password\" name=\"confirm\"></label></p>\n\
         <p><button type=\"submit\">Register</button></p>\n\
         </form>\n\
         <p>Already have an account? <a href=\"/login\">Log in</a></p>",
    )
}

/// Login form
pub fn login_page(flashes: &[Flash]) -> Html<String> {
    layout(
        "Log in",
        flashes,
        "<form method=\"post\" action=\"/login\">\n\
         <p><label>Username <input type=\"text\" name=\"username\"></label></p>\n\
         <p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
         <p><button type=\"submit\">Log in</button></p>\n\
         </form>\n\
         <p>New here? <a href=\"/register\">Register</a></p>",
    )
}

/// Task list with the add-task form
pub fn index_page(flashes: &[Flash], tasks: &[Task]) -> Html<String> {
    let mut body = String::from(
        "<form method=\"post\" action=\"/add\">\n\
         <p><label>Title <input type=\"text\" name=\"title\"></label></p>\n\
         <p><label>Description <input type=\"text\" name=\"description\"></label></p>\n\
         <p><button type=\"submit\">Add task</button></p>\n\
         </form>\n",
    );

    if tasks.is_empty() {
        body.push_str("<p>No tasks yet.</p>\n");
    } else {
        body.push_str("<ul class=\"tasks\">\n");
        for task in tasks {
            let state = if task.completed { "[x]" } else { "[ ]" };
            let description = task
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| format!(" <span class=\"description\">{}</span>", escape(d)))
                .unwrap_or_default();

            body.push_str(&format!(
                "<li class=\"task\"><span class=\"state\">{}</span> \
                 <span class=\"title\">{}</span>{} \
                 <a href=\"/update/{}\">Edit</a> \
                 <a href=\"/delete/{}\">Delete</a></li>\n",
                state,
                escape(&task.title),
                description,
                task.id,
                task.id
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<p><a href=\"/logout\">Log out</a></p>");

    layout("My tasks", flashes, &body)
}

/// Edit form pre-filled with the task's current values
pub fn update_page(flashes: &[Flash], task: &Task) -> Html<String> {
    let checked = if task.completed { " checked" } else { "" };

    layout(
        "Edit task",
        flashes,
        &format!(
            "<form method=\"post\" action=\"/update/{}\">\n\
             <p><label>Title <input type=\"text\" name=\"title\" value=\"{}\"></label></p>\n\
             <p><label>Description <input type=\"text\" name=\"description\" value=\"{}\"></label></p>\n\
             <p><label><input type=\"checkbox\" name=\"completed\"{}> Completed</label></p>\n\
             <p><button type=\"submit\">Save</button></p>\n\
             </form>\n\
             <p><a href=\"/index\">Back to list</a></p>",
            task.id,
            escape(&task.title),
            escape(task.description.as_deref().unwrap_or("")),
            checked
        ),
    )
}

/// Minimal error page for 4xx/5xx responses
pub fn error_page(title: &str, message: &str) -> Html<String> {
    layout(title, &[], &format!("<p>{}</p>", escape(message)))
}
