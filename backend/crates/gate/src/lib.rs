//! Gate (Access Control) Backend Module
//!
//! The session/navigation gate of the recruitment portal: for every
//! protected navigation it decides whether to pass the request through,
//! redirect to the login page, or redirect to a role-appropriate
//! dashboard. Credential checks, MFA verification and user storage live
//! in an external auth backend consumed over HTTP; this crate only
//! consumes their outcome.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - In-memory repositories, auth-backend HTTP client
//! - `presentation/` - HTTP middleware, handlers, DTOs, router
//!
//! ## Features
//! - Token classification by shape (JWT vs. verification vs. invalid)
//! - Out-of-band bearer-token adoption from a `?token=` query parameter
//! - Attempted-route memory with read-once restore after login
//! - Role-scoped sections with redirect-to-own-dashboard on mismatch
//! - MFA-pending detection with a persisted-flag fallback
//!
//! ## Security Model
//! - The gate performs no cryptographic verification of bearer tokens;
//!   the auth backend is the authority (`GET /auth/me`)
//! - The portal's own session cookie is an HMAC-signed session ID
//! - Tokens are never logged in full (kind, length, 8-char prefix only)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::GateConfig;
pub use error::{GateError, GateResult};
pub use infra::http::HttpAuthBackend;
pub use infra::memory::InMemorySessionRepository;
pub use presentation::router::gate_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
