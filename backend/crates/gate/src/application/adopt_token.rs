//! Token Adoption Use Case
//!
//! Adopts a bearer token presented out-of-band (e.g. from an email
//! link's query parameter): persists it on the session and resolves it
//! to a profile through the auth backend. The backend is the authority;
//! nothing is verified locally and nothing is retried.

use std::sync::Arc;

use crate::domain::entity::session::Session;
use crate::domain::repository::{AuthBackend, SessionRepository};
use crate::error::{GateError, GateResult};

/// Token adoption use case
pub struct AdoptTokenUseCase<B, S>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    backend: Arc<B>,
    sessions: Arc<S>,
}

impl<B, S> AdoptTokenUseCase<B, S>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(backend: Arc<B>, sessions: Arc<S>) -> Self {
        Self { backend, sessions }
    }

    /// Resolve the token to a profile and establish the session
    ///
    /// On a backend 401 an already-established session is cleared: the
    /// backend no longer recognizes this visitor, so the gateway must
    /// not either.
    pub async fn execute(&self, session: &mut Session, raw_token: &str) -> GateResult<()> {
        let was_authenticated = session.is_authenticated();

        match self.backend.fetch_profile(raw_token).await {
            Ok(user) => {
                tracing::info!(
                    session_id = %session.session_id,
                    user_id = %user.id,
                    role = ?user.role,
                    "Bearer token adopted"
                );

                session.establish(user, raw_token.to_string());
                self.sessions.update(session).await?;
                Ok(())
            }
            Err(err) => {
                if was_authenticated && matches!(err, GateError::TokenRejected) {
                    session.clear();
                    self.sessions.update(session).await?;
                }
                Err(err)
            }
        }
    }
}
