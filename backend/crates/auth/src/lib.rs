//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and session tokens
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Signup / login / logout with username + password
//! - Stateless HMAC-signed session token in an HTTP-only cookie
//! - `require_auth` middleware for protected routes
//!
//! ## Security Model
//! - Passwords hashed with salted Argon2id, verified in constant time
//! - Session tokens signed with HMAC-SHA256, 7-day expiry
//! - Cookie is `HttpOnly`, `SameSite=Strict`, `Secure` outside development

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthenticatedUser};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::{AuthAppState, auth_router, require_auth};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
