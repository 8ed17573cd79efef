//! Sign Out Use Case
//!
//! Destroys the gateway session referenced by a cookie token.

use std::sync::Arc;

use crate::application::config::GateConfig;
use crate::application::session_token;
use crate::domain::repository::SessionRepository;
use crate::error::GateResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    sessions: Arc<S>,
    config: Arc<GateConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(sessions: Arc<S>, config: Arc<GateConfig>) -> Self {
        Self { sessions, config }
    }

    /// Delete the session behind the cookie token
    pub async fn execute(&self, cookie_token: &str) -> GateResult<()> {
        let session_id = session_token::verify(cookie_token, &self.config.session_secret)?;

        self.sessions.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "Session signed out");

        Ok(())
    }
}
