/// Request handlers organized by page
///
/// - `home`: Landing page
/// - `health`: Liveness endpoint
/// - `auth`: Registration, login, logout
/// - `tasks`: Task list and CRUD handlers (session-gated)

pub mod auth;
pub mod health;
pub mod home;
pub mod tasks;
