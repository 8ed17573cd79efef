//! Session Context Use Case
//!
//! Resolves the gateway session for a request from its cookie token,
//! creating an anonymous session when there is none to resume. The
//! explicit, repository-backed session replaces the ambient global auth
//! context of the original frontend.

use std::sync::Arc;

use crate::application::config::GateConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{GateError, GateResult};

/// A session plus whether this request created it
pub struct ResolvedSession {
    pub session: Session,
    /// True when a fresh anonymous session was created; the caller must
    /// set the session cookie on the response
    pub created: bool,
}

/// Session context use case
pub struct SessionContextUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    sessions: Arc<S>,
    config: Arc<GateConfig>,
}

impl<S> SessionContextUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(sessions: Arc<S>, config: Arc<GateConfig>) -> Self {
        Self { sessions, config }
    }

    /// Resume the session referenced by the cookie, or start a new one
    ///
    /// An unverifiable or expired cookie is not an error; the visitor
    /// simply continues with a fresh anonymous session.
    pub async fn resolve(&self, cookie_token: Option<&str>) -> GateResult<ResolvedSession> {
        if let Some(token) = cookie_token {
            match session_token::verify(token, &self.config.session_secret) {
                Ok(session_id) => {
                    if let Some(session) = self.sessions.find_by_id(session_id).await? {
                        if session.is_expired() {
                            self.sessions.delete(session_id).await?;
                        } else {
                            let mut session = session;
                            session.touch();

                            // Update last activity in the background
                            let repo = self.sessions.clone();
                            tokio::spawn(async move {
                                if let Err(e) = repo.touch(session_id).await {
                                    tracing::warn!(error = %e, "Failed to update session activity");
                                }
                            });

                            return Ok(ResolvedSession {
                                session,
                                created: false,
                            });
                        }
                    }
                }
                Err(_) => {
                    tracing::debug!("Discarding unverifiable session cookie");
                }
            }
        }

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| GateError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = Session::new(ttl);
        self.sessions.create(&session).await?;

        tracing::debug!(session_id = %session.session_id, "Created anonymous session");

        Ok(ResolvedSession {
            session,
            created: true,
        })
    }

    /// Look up the session without creating one
    ///
    /// Used by status/sign-out handlers where an absent session is a
    /// perfectly fine answer.
    pub async fn peek(&self, cookie_token: Option<&str>) -> GateResult<Option<Session>> {
        let Some(token) = cookie_token else {
            return Ok(None);
        };

        let Ok(session_id) = session_token::verify(token, &self.config.session_secret) else {
            return Ok(None);
        };

        match self.sessions.find_by_id(session_id).await? {
            Some(session) if !session.is_expired() => Ok(Some(session)),
            _ => Ok(None),
        }
    }

    /// Signed cookie token for a session
    pub fn issue_cookie_token(&self, session: &Session) -> String {
        session_token::issue(session.session_id, &self.config.session_secret)
    }
}
