//! In-Memory Repository Implementations
//!
//! Gateway sessions are browser-session-scoped by design, so the only
//! store is process memory. Last write wins; there is no cross-instance
//! sharing.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::SessionId;
use tokio::sync::RwLock;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::GateResult;

/// In-memory session repository
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions (including expired but not yet cleaned)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: &Session) -> GateResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> GateResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn update(&self, session: &Session) -> GateResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn touch(&self, session_id: SessionId) -> GateResult<()> {
        if let Some(session) = self.sessions.write().await.get_mut(&session_id) {
            session.touch();
        }
        Ok(())
    }

    async fn delete(&self, session_id: SessionId) -> GateResult<()> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> GateResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at_ms >= now_ms);
        let deleted = (before - sessions.len()) as u64;

        if deleted > 0 {
            tracing::info!(sessions_deleted = deleted, "Cleaned up expired gateway sessions");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemorySessionRepository::new();
        let session = Session::new(Duration::hours(1));

        repo.create(&session).await.unwrap();

        let found = repo.find_by_id(session.session_id).await.unwrap().unwrap();
        assert_eq!(found.session_id, session.session_id);
        assert!(!found.is_authenticated());
    }

    #[tokio::test]
    async fn test_update_overwrites() {
        let repo = InMemorySessionRepository::new();
        let mut session = Session::new(Duration::hours(1));
        repo.create(&session).await.unwrap();

        session.mark_adoption_attempted();
        repo.update(&session).await.unwrap();

        let found = repo.find_by_id(session.session_id).await.unwrap().unwrap();
        assert!(found.adoption_attempted);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemorySessionRepository::new();
        let session = Session::new(Duration::hours(1));
        repo.create(&session).await.unwrap();

        repo.delete(session.session_id).await.unwrap();

        assert!(repo.find_by_id(session.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let repo = InMemorySessionRepository::new();
        let live = Session::new(Duration::hours(1));
        let expired = Session::new(Duration::milliseconds(-1));

        repo.create(&live).await.unwrap();
        repo.create(&expired).await.unwrap();

        let deleted = repo.cleanup_expired().await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_id(live.session_id).await.unwrap().is_some());
    }
}
