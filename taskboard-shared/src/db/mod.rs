/// Database layer for Taskboard
///
/// This module provides database connection pooling and migrations over the
/// file-backed SQLite store.
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with a startup health check
/// - `migrations`: Database migration runner
/// - Models are in the `models` module at crate root level

pub mod migrations;
pub mod pool;
