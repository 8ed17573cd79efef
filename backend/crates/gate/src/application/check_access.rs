//! Check Access Use Case
//!
//! The gate itself. Re-evaluated on every protected navigation, it walks
//! the session through validating → unauthenticated / MFA-pending /
//! role-check → authorized, and always terminates in a navigation
//! decision. It never returns an error: failed token adoption, unknown
//! roles and missing sessions all end in a redirect, not a 500.

use std::sync::Arc;

use platform::query;
use platform::storage::KeyValueStore;

use crate::application::adopt_token::AdoptTokenUseCase;
use crate::application::config::GateConfig;
use crate::application::route_memory::RouteMemory;
use crate::domain::entity::session::Session;
use crate::domain::repository::{AuthBackend, SessionRepository};
use crate::domain::value_object::role::Role;
use crate::domain::value_object::token::{TokenKind, log_token_info};

/// One protected navigation
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// Request path
    pub path: &'a str,
    /// Raw query string, without the leading `?`
    pub query: &'a str,
    /// Allow-list declared by the route; `None` means any authenticated
    /// user may pass
    pub allowed_roles: Option<&'a [Role]>,
}

/// Outcome of a gate evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Serve the protected content
    Allow,
    /// Navigate elsewhere (token-strip replace, role-mismatch dashboard)
    Redirect { target: String },
    /// Navigate to the login page, carrying where the visitor came from
    /// and whether an MFA step must be forced
    RedirectToLogin { from: String, require_mfa: bool },
}

/// Check access use case
pub struct CheckAccessUseCase<B, S, K>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone,
{
    backend: Arc<B>,
    sessions: Arc<S>,
    store: K,
    config: Arc<GateConfig>,
}

impl<B, S, K> CheckAccessUseCase<B, S, K>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone,
{
    pub fn new(backend: Arc<B>, sessions: Arc<S>, store: K, config: Arc<GateConfig>) -> Self {
        Self {
            backend,
            sessions,
            store,
            config,
        }
    }

    /// Evaluate the gate for one navigation
    pub async fn execute(
        &self,
        session: &mut Session,
        request: AccessRequest<'_>,
    ) -> GateDecision {
        let routes = RouteMemory::new(self.store.clone(), self.config.clone());

        if !session.is_authenticated() {
            if let Some(decision) = self.try_adoption(session, &request).await {
                return decision;
            }

            routes.store_if_needed(request.path, request.query);
            return GateDecision::RedirectToLogin {
                from: request.path.to_string(),
                require_mfa: false,
            };
        }

        let (mfa_enabled, role) = match &session.user {
            Some(user) => (user.mfa_enabled, user.role),
            None => (false, None),
        };

        if mfa_enabled && !session.mfa_verified {
            if routes.persisted_mfa_verified() {
                // In-memory state can lag the persisted flag; trust storage
                session.mfa_verified = true;
                if let Err(e) = self.sessions.update(session).await {
                    tracing::warn!(error = %e, "Failed to persist MFA upgrade");
                }
            } else {
                return GateDecision::RedirectToLogin {
                    from: request.path.to_string(),
                    require_mfa: true,
                };
            }
        }

        if let Some(allowed) = request.allowed_roles {
            let permitted = role.is_some_and(|r| allowed.contains(&r));

            if !permitted {
                let target = routes.target_route_for(role);
                tracing::debug!(
                    ?role,
                    path = %request.path,
                    target = %target,
                    "Role not allowed here, redirecting"
                );
                return GateDecision::Redirect { target };
            }
        }

        GateDecision::Allow
    }

    /// The validating step: adopt a `?token=` parameter at most once
    ///
    /// `Some(decision)` short-circuits the evaluation (successful
    /// adoption redirects to the same URL without the token); `None`
    /// falls through to the unauthenticated handling.
    async fn try_adoption(
        &self,
        session: &mut Session,
        request: &AccessRequest<'_>,
    ) -> Option<GateDecision> {
        if session.adoption_attempted {
            return None;
        }

        let raw_token = query::get_param(request.query, "token")?;

        session.mark_adoption_attempted();
        if let Err(e) = self.sessions.update(session).await {
            tracing::warn!(error = %e, "Failed to persist adoption attempt");
        }

        log_token_info(&raw_token, "query parameter");

        match TokenKind::classify(&raw_token) {
            TokenKind::Jwt => {
                let adopt = AdoptTokenUseCase::new(self.backend.clone(), self.sessions.clone());

                match adopt.execute(session, &raw_token).await {
                    Ok(()) => {
                        // Strip the token from the visible URL; everything
                        // else in the query survives
                        let stripped = query::strip_param(request.query, "token");
                        let target = if stripped.is_empty() {
                            request.path.to_string()
                        } else {
                            format!("{}?{}", request.path, stripped)
                        };
                        Some(GateDecision::Redirect { target })
                    }
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            "Token adoption failed, continuing unauthenticated"
                        );
                        None
                    }
                }
            }
            kind => {
                // Verification/reset tokens belong to other flows
                tracing::debug!(%kind, "Ignoring non-JWT token parameter");
                None
            }
        }
    }
}
