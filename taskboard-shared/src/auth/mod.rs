/// Authentication primitives for Taskboard
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Typed session state with explicit serialization to and
///   from a signed cookie token
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Cookie**: HS256-signed token; tampering yields a fresh session
/// - **Constant-time Comparison**: Password verification is constant-time

pub mod password;
pub mod session;
