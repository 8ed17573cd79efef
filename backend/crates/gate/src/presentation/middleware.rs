//! Gate Middleware
//!
//! Axum middleware wiring the gate into protected routers: resolves the
//! gateway session from the signed cookie, evaluates the access gate,
//! and maps the decision to a response. All redirects are `303 See
//! Other`; the login redirect carries the navigation payload as `from`
//! and `requireMfa` query parameters.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::cookie::extract_cookie;
use platform::query;
use platform::storage::{KeyValueStore, ScopedStore};

use crate::application::check_access::{AccessRequest, CheckAccessUseCase, GateDecision};
use crate::application::config::GateConfig;
use crate::application::session_context::{ResolvedSession, SessionContextUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthBackend, SessionRepository};
use crate::domain::value_object::role::Role;

/// Shared state for the gate middleware and handlers
#[derive(Clone)]
pub struct GateState<B, S, K>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
{
    pub backend: Arc<B>,
    pub sessions: Arc<S>,
    pub store: K,
    pub config: Arc<GateConfig>,
}

impl<B, S, K> GateState<B, S, K>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
{
    pub fn new(backend: B, sessions: S, store: K, config: GateConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            sessions: Arc::new(sessions),
            store,
            config: Arc::new(config),
        }
    }
}

/// The authenticated user, injected into request extensions on Allow
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that gates a protected router section
pub async fn require_gate<B, S, K>(
    state: GateState<B, S, K>,
    allowed_roles: Option<Arc<[Role]>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    B: AuthBackend + Clone + Send + Sync + 'static,
    S: SessionRepository + Clone + Send + Sync + 'static,
    K: KeyValueStore + Clone + Send + Sync + 'static,
{
    let cookie_token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let context = SessionContextUseCase::new(state.sessions.clone(), state.config.clone());

    let ResolvedSession {
        mut session,
        created,
    } = context
        .resolve(cookie_token.as_deref())
        .await
        .map_err(|e| e.into_response())?;

    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();

    let scoped = ScopedStore::new(state.store.clone(), session.session_id.to_string());
    let gate = CheckAccessUseCase::new(
        state.backend.clone(),
        state.sessions.clone(),
        scoped,
        state.config.clone(),
    );

    let decision = gate
        .execute(
            &mut session,
            AccessRequest {
                path: &path,
                query: &query,
                allowed_roles: allowed_roles.as_deref(),
            },
        )
        .await;

    // Fresh sessions get their cookie on whatever response goes out
    let cookie = created.then(|| context.issue_cookie_token(&session));

    match decision {
        GateDecision::Allow => {
            if let Some(user) = session.user.clone() {
                req.extensions_mut().insert(CurrentUser(user));
            }

            let mut response = next.run(req).await;
            if let Some(token) = &cookie {
                append_session_cookie(&mut response, &state.config, token);
            }
            Ok(response)
        }
        GateDecision::Redirect { target } => {
            Err(see_other(&target, &state.config, cookie.as_deref()))
        }
        GateDecision::RedirectToLogin { from, require_mfa } => {
            let mut params: Vec<(&str, &str)> = vec![("from", &from)];
            if require_mfa {
                params.push(("requireMfa", "true"));
            }
            let location = query::append_params(&state.config.login_path, &params);

            Err(see_other(&location, &state.config, cookie.as_deref()))
        }
    }
}

fn see_other(location: &str, config: &GateConfig, cookie_token: Option<&str>) -> Response {
    // A stored returnUrl may carry decoded bytes no header accepts;
    // fail toward the login page rather than erroring the navigation
    let location = HeaderValue::from_str(location).unwrap_or_else(|_| {
        tracing::warn!("Redirect target is not a valid header value, sending to login");
        HeaderValue::from_str(&config.login_path).unwrap_or_else(|_| HeaderValue::from_static("/login"))
    });

    let mut response = StatusCode::SEE_OTHER.into_response();
    response.headers_mut().insert(header::LOCATION, location);

    if let Some(token) = cookie_token {
        append_session_cookie(&mut response, config, token);
    }

    response
}

fn append_session_cookie(response: &mut Response, config: &GateConfig, token: &str) {
    let cookie = config.cookie_config().build_set_cookie(token);

    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
