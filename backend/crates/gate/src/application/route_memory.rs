//! Route Memory Use Case
//!
//! Remembers the last protected path a visitor tried to reach, so they
//! land back there after the login detour. One slot per session, backed
//! by an injected key-value store; read-once on resolution.

use std::sync::Arc;

use platform::query;
use platform::storage::KeyValueStore;

use crate::application::config::GateConfig;
use crate::domain::value_object::role::Role;
use crate::domain::value_object::route_path;

/// Route memory over a session-scoped key-value store
pub struct RouteMemory<K: KeyValueStore> {
    store: K,
    config: Arc<GateConfig>,
}

impl<K: KeyValueStore> RouteMemory<K> {
    pub fn new(store: K, config: Arc<GateConfig>) -> Self {
        Self { store, config }
    }

    /// Remember the attempted route, if it is worth remembering
    ///
    /// An explicit `returnUrl` query parameter wins and is stored without
    /// prefix checks. Otherwise the path is stored only when it belongs
    /// to a role section or a role-agnostic area; anything else is
    /// silently ignored.
    pub fn store_if_needed(&self, path: &str, query: &str) {
        if let Some(return_url) = query::get_param(query, "returnUrl") {
            self.store.put(&self.config.stored_route_key, &return_url);
            tracing::debug!(route = %return_url, "Stored returnUrl hint");
            return;
        }

        if route_path::is_recognized(path) {
            self.store.put(&self.config.stored_route_key, path);
            tracing::debug!(route = %path, "Stored attempted route");
        }
    }

    /// The stored route, if it is valid for this role
    ///
    /// Role-agnostic paths are valid for everyone; section paths only for
    /// their own role. An unrecognized role matches no section.
    pub fn stored_route_for(&self, role: Option<Role>) -> Option<String> {
        let stored = self.store.get(&self.config.stored_route_key)?;

        if route_path::is_role_agnostic(&stored) {
            return Some(stored);
        }

        match (route_path::section_role(&stored), role) {
            (Some(section), Some(role)) if section == role => Some(stored),
            _ => None,
        }
    }

    /// Forget the stored route
    pub fn clear(&self) {
        self.store.remove(&self.config.stored_route_key);
    }

    /// Where this user should land next
    ///
    /// Consumes the stored route when it is used: callers must intend to
    /// navigate to the result, or the remembered route is lost. Falls
    /// back to the role's dashboard, or the generic dashboard sentinel
    /// for an unrecognized role.
    pub fn target_route_for(&self, role: Option<Role>) -> String {
        match self.stored_route_for(role) {
            Some(route) => {
                self.clear();
                route
            }
            None => route_path::dashboard_path_for(role).to_string(),
        }
    }

    /// Persisted MFA flag, the defensive fallback the gate re-checks
    /// when in-memory session state lags storage
    pub fn persisted_mfa_verified(&self) -> bool {
        self.store
            .get(&self.config.mfa_verified_key)
            .is_some_and(|value| value == "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::storage::MemoryStore;

    fn routes() -> RouteMemory<MemoryStore> {
        RouteMemory::new(MemoryStore::new(), Arc::new(GateConfig::default()))
    }

    #[test]
    fn test_stores_section_path_for_own_role_only() {
        let routes = routes();
        routes.store_if_needed("/candidate/profile", "");

        assert_eq!(
            routes.stored_route_for(Some(Role::Candidate)),
            Some("/candidate/profile".to_string())
        );
        assert_eq!(routes.stored_route_for(Some(Role::Admin)), None);
        assert_eq!(routes.stored_route_for(None), None);
    }

    #[test]
    fn test_role_agnostic_path_is_valid_for_any_role() {
        let routes = routes();
        routes.store_if_needed("/jobs/42", "");

        assert_eq!(
            routes.stored_route_for(Some(Role::Admin)),
            Some("/jobs/42".to_string())
        );
        assert_eq!(
            routes.stored_route_for(Some(Role::Candidate)),
            Some("/jobs/42".to_string())
        );
        assert_eq!(routes.stored_route_for(None), Some("/jobs/42".to_string()));
    }

    #[test]
    fn test_unrecognized_path_is_not_stored() {
        let routes = routes();
        routes.store_if_needed("/settings", "");

        for role in Role::ALL {
            assert_eq!(routes.stored_route_for(Some(role)), None);
        }
    }

    #[test]
    fn test_return_url_wins_and_skips_prefix_checks() {
        let routes = routes();
        routes.store_if_needed("/settings", "returnUrl=%2Fwherever%2Fnext");

        // returnUrl is stored verbatim, but role validation still applies
        // on the way out; an unsectioned path resolves for nobody.
        assert_eq!(routes.stored_route_for(Some(Role::Admin)), None);

        routes.store_if_needed("/settings", "returnUrl=%2Fadmin%2Fusers");
        assert_eq!(
            routes.stored_route_for(Some(Role::Admin)),
            Some("/admin/users".to_string())
        );
    }

    #[test]
    fn test_target_route_consumes_stored_value() {
        let routes = routes();
        routes.store_if_needed("/admin/users", "");

        assert_eq!(routes.target_route_for(Some(Role::Admin)), "/admin/users");
        // Read-once: the second resolution falls back to the default
        assert_eq!(routes.target_route_for(Some(Role::Admin)), "/admin");
    }

    #[test]
    fn test_target_route_default_is_idempotent_when_nothing_stored() {
        let routes = routes();

        assert_eq!(routes.target_route_for(Some(Role::Admin)), "/admin");
        assert_eq!(routes.target_route_for(Some(Role::Admin)), "/admin");
    }

    #[test]
    fn test_target_route_keeps_foreign_section_stored() {
        let routes = routes();
        routes.store_if_needed("/candidate/profile", "");

        // Wrong role falls back to its default and must NOT consume the
        // candidate's remembered route.
        assert_eq!(routes.target_route_for(Some(Role::Admin)), "/admin");
        assert_eq!(
            routes.target_route_for(Some(Role::Candidate)),
            "/candidate/profile"
        );
    }

    #[test]
    fn test_target_route_sentinel_for_unknown_role() {
        let routes = routes();
        assert_eq!(routes.target_route_for(None), "/dashboard");
    }

    #[test]
    fn test_clear() {
        let routes = routes();
        routes.store_if_needed("/admin/users", "");
        routes.clear();

        assert_eq!(routes.stored_route_for(Some(Role::Admin)), None);
    }

    #[test]
    fn test_persisted_mfa_verified() {
        let store = MemoryStore::new();
        let config = Arc::new(GateConfig::default());
        let routes = RouteMemory::new(store.clone(), config.clone());

        assert!(!routes.persisted_mfa_verified());

        store.put(&config.mfa_verified_key, "false");
        assert!(!routes.persisted_mfa_verified());

        store.put(&config.mfa_verified_key, "true");
        assert!(routes.persisted_mfa_verified());
    }
}
