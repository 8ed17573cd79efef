//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use platform::cookie::extract_cookie;
use platform::storage::{KeyValueStore, ScopedStore};

use crate::application::route_memory::RouteMemory;
use crate::application::session_context::SessionContextUseCase;
use crate::application::sign_out::SignOutUseCase;
use crate::domain::repository::{AuthBackend, SessionRepository};
use crate::error::GateResult;
use crate::presentation::dto::SessionStatusResponse;
use crate::presentation::middleware::GateState;

// ============================================================================
// Session Status
// ============================================================================

/// GET /session/status
pub async fn session_status<B, S, K>(
    State(state): State<GateState<B, S, K>>,
    headers: HeaderMap,
) -> GateResult<Json<SessionStatusResponse>>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
{
    let cookie_token = extract_cookie(&headers, &state.config.session_cookie_name);

    let context = SessionContextUseCase::new(state.sessions.clone(), state.config.clone());

    let response = match context.peek(cookie_token.as_deref()).await? {
        Some(session) => SessionStatusResponse {
            authenticated: session.is_authenticated(),
            email: session.user.as_ref().map(|user| user.email.clone()),
            role: session
                .user
                .as_ref()
                .and_then(|user| user.role)
                .map(|role| role.code().to_string()),
            mfa_verified: session.mfa_verified,
        },
        None => SessionStatusResponse::anonymous(),
    };

    Ok(Json(response))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /session/signout
pub async fn sign_out<B, S, K>(
    State(state): State<GateState<B, S, K>>,
    headers: HeaderMap,
) -> GateResult<impl IntoResponse>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
{
    let cookie_token = extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = &cookie_token {
        let context = SessionContextUseCase::new(state.sessions.clone(), state.config.clone());

        // Clear the remembered route before the session goes away
        if let Ok(Some(session)) = context.peek(Some(token)).await {
            let scoped = ScopedStore::new(state.store.clone(), session.session_id.to_string());
            RouteMemory::new(scoped, state.config.clone()).clear();
        }

        let use_case = SignOutUseCase::new(state.sessions.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(token).await;
    }

    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}
