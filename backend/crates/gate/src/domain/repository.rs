//! Repository Traits
//!
//! Interfaces for session persistence and the external auth backend.
//! Implementations are in the infrastructure layer.

use kernel::id::SessionId;

use crate::domain::entity::{session::Session, user::User};
use crate::error::GateResult;

/// Gateway session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> GateResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: SessionId) -> GateResult<Option<Session>>;

    /// Update session (adoption state, user, MFA upgrade)
    async fn update(&self, session: &Session) -> GateResult<()>;

    /// Bump the last-activity timestamp only
    ///
    /// Separate from `update` so a background activity bump can never
    /// clobber a concurrent state change on the same session.
    async fn touch(&self, session_id: SessionId) -> GateResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: SessionId) -> GateResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> GateResult<u64>;
}

/// External auth backend trait
///
/// The single operation the gate needs from the backend: resolve a
/// bearer token into the current profile. No retries here; a failed
/// adoption sends the user to the login page.
#[trait_variant::make(AuthBackend: Send)]
pub trait LocalAuthBackend {
    /// `GET /auth/me` with the given bearer token
    async fn fetch_profile(&self, bearer_token: &str) -> GateResult<User>;
}
