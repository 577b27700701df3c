//! Server-rendered HTML pages.
//!
//! Plain markup, no templating engine. Every value interpolated into a page
//! passes through [`escape_html`].

use axum::http::StatusCode;
use axum::response::Html;

use crate::routes::{LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};

/// Shown on a failed login. Identical whichever field was wrong.
pub const INVALID_CREDENTIALS_NOTICE: &str = "Invalid username or password.";

/// Shown on a failed registration. Does not confirm whether the name exists.
pub const REGISTRATION_FAILED_NOTICE: &str =
    "Registration failed. Please choose a different username and try again.";

pub fn login_page(show_error: bool) -> Html<String> {
    let notice = show_error.then_some(INVALID_CREDENTIALS_NOTICE);
    let body = format!(
        "{notice}{form}\
         <p>No account yet? <a href=\"{REGISTER_PATH}\">Register</a></p>",
        notice = render_notice(notice),
        form = credentials_form(LOGIN_PATH, "Log in"),
    );
    layout("Log in", &body)
}

pub fn register_page(show_error: bool) -> Html<String> {
    let notice = show_error.then_some(REGISTRATION_FAILED_NOTICE);
    let body = format!(
        "{notice}{form}\
         <p>Already registered? <a href=\"{LOGIN_PATH}\">Log in</a></p>",
        notice = render_notice(notice),
        form = credentials_form(REGISTER_PATH, "Register"),
    );
    layout("Register", &body)
}

/// Landing page for a logged-in user.
pub fn task_list_page(username: &str) -> Html<String> {
    let body = format!(
        "<p>Logged in as <strong>{username}</strong>.</p>\
         <p>You have no tasks yet.</p>\
         <form method=\"post\" action=\"{LOGOUT_PATH}\"><button type=\"submit\">Log out</button></form>",
        username = escape_html(username),
    );
    layout("Your tasks", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<p>{message}</p><p><a href=\"{LOGIN_PATH}\">Back to login</a></p>",
        message = escape_html(message),
    );
    layout(title, &body)
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\
         <label>Username <input type=\"text\" name=\"username\" required maxlength=\"255\"></label>\
         <label>Password <input type=\"password\" name=\"password\" required maxlength=\"255\"></label>\
         <button type=\"submit\">{submit}</button>\
         </form>"
    )
}

fn render_notice(notice: Option<&str>) -> String {
    notice
        .map(|text| format!("<p class=\"error\" role=\"alert\">{}</p>", escape_html(text)))
        .unwrap_or_default()
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\
         <html lang=\"en\"><head><meta charset=\"utf-8\"><title>{title} - Task Manager</title></head>\
         <body><h1>{title}</h1>{body}</body></html>",
        title = escape_html(title),
    ))
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
