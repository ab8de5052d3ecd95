//! # Taskboard Shared Library
//!
//! This crate contains the persistence layer and authentication primitives
//! used by the Taskboard web application.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `auth`: Password hashing and the signed session cookie
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
