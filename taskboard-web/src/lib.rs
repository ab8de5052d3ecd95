//! # Taskboard Web Server Library
//!
//! This library provides the core functionality for the Taskboard web
//! application: server-rendered HTML pages over a session-gated task list.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: Request handlers
//! - `session`: Session cookie plumbing and middleware
//! - `views`: Server-rendered HTML pages

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod views;
