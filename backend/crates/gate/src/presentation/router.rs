//! Gate Router

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    routing::{get, post},
};
use platform::storage::KeyValueStore;

use crate::domain::repository::{AuthBackend, SessionRepository};
use crate::domain::value_object::role::Role;
use crate::presentation::handlers;
use crate::presentation::middleware::{GateState, require_gate};

/// Create the session service router (status + signout)
pub fn gate_router<B, S, K>(state: GateState<B, S, K>) -> Router
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/status", get(handlers::session_status::<B, S, K>))
        .route("/signout", post(handlers::sign_out::<B, S, K>))
        .with_state(state)
}

/// Wrap a router section behind the gate
///
/// `allowed_roles: None` admits any authenticated user; a list restricts
/// the section to those roles, redirecting everyone else to their own
/// dashboard.
pub fn protect<B, S, K>(
    router: Router,
    state: GateState<B, S, K>,
    allowed_roles: Option<&[Role]>,
) -> Router
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
{
    let roles: Option<Arc<[Role]>> = allowed_roles.map(|roles| roles.to_vec().into());

    router.layer(middleware::from_fn(
        move |req: Request<Body>, next: Next| {
            let state = state.clone();
            let roles = roles.clone();
            async move { require_gate(state, roles, req, next).await }
        },
    ))
}
