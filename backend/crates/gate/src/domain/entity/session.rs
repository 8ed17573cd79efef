//! Gateway Session Entity
//!
//! One browser session at the gateway. Created anonymous on first
//! contact, established when a bearer token resolves to a profile,
//! cleared on sign-out or when the auth backend rejects the token.

use chrono::{DateTime, Duration, Utc};
use kernel::id::SessionId;

use crate::domain::entity::user::User;

/// Gateway session
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID, referenced by the signed cookie token
    pub session_id: SessionId,
    /// Current user; `None` while unauthenticated
    pub user: Option<User>,
    /// Bearer token for auth-backend calls on this session's behalf
    pub bearer_token: Option<String>,
    /// Whether the MFA step has been satisfied this session
    pub mfa_verified: bool,
    /// Whether out-of-band token adoption has already been tried
    ///
    /// Adoption runs at most once per session; a failed attempt is not
    /// retried on the next navigation.
    pub adoption_attempted: bool,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    /// Create a new anonymous session
    ///
    /// TTL is provided by the application layer (config), not hard-coded
    /// here.
    pub fn new(ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user: None,
            bearer_token: None,
            mfa_verified: false,
            adoption_attempted: false,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_seen_at: now,
        }
    }

    /// Whether a user is attached
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_seen_at = Utc::now();
    }

    /// Attach a user and the bearer token that resolved to it
    pub fn establish(&mut self, user: User, bearer_token: String) {
        self.user = Some(user);
        self.bearer_token = Some(bearer_token);
        self.touch();
    }

    /// Drop all authentication state, back to anonymous
    ///
    /// Used on sign-out and when the auth backend answers 401.
    pub fn clear(&mut self) {
        self.user = None;
        self.bearer_token = None;
        self.mfa_verified = false;
        self.touch();
    }

    /// Record that token adoption was tried
    pub fn mark_adoption_attempted(&mut self) {
        self.adoption_attempted = true;
    }

    /// Whether the MFA step still stands between this session and
    /// protected content
    pub fn needs_mfa(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.mfa_enabled && !self.mfa_verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::role::Role;

    fn test_user() -> User {
        User {
            id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Some(Role::Admin),
            mfa_enabled: false,
        }
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new(Duration::hours(12));
        assert!(!session.is_authenticated());
        assert!(!session.is_expired());
        assert!(!session.adoption_attempted);
        assert!(!session.needs_mfa());
    }

    #[test]
    fn test_establish_and_clear() {
        let mut session = Session::new(Duration::hours(12));

        session.establish(test_user(), "a.b.c".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token.as_deref(), Some("a.b.c"));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.bearer_token.is_none());
        assert!(!session.mfa_verified);
    }

    #[test]
    fn test_needs_mfa() {
        let mut session = Session::new(Duration::hours(12));
        let mut user = test_user();
        user.mfa_enabled = true;

        session.establish(user, "a.b.c".to_string());
        assert!(session.needs_mfa());

        session.mfa_verified = true;
        assert!(!session.needs_mfa());
    }

    #[test]
    fn test_expiry() {
        let session = Session::new(Duration::milliseconds(-1));
        assert!(session.is_expired());
    }
}
