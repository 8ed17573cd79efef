//! Portal Gateway Entry Point
//!
//! Runs the edge gateway in front of the recruitment portal: every
//! section is wired through the access gate, which decides per
//! navigation whether to serve, send the visitor to `/login`, or send
//! them to a role-appropriate dashboard. Uses `anyhow` for startup
//! errors; request-level errors go through `kernel::error::AppError`.

use axum::extract::{Extension, Query};
use axum::http::{Method, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, http};
use base64::Engine;
use base64::engine::general_purpose;
use gate::domain::SessionRepository;
use gate::domain::value_object::role::Role;
use gate::middleware::{CurrentUser, GateState};
use gate::presentation::{gate_router, protect};
use gate::{GateConfig, HttpAuthBackend, InMemorySessionRepository};
use kernel::error::app_error::AppError;
use platform::storage::MemoryStore;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type PortalGateState = GateState<HttpAuthBackend, InMemorySessionRepository, MemoryStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal=info,gate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Gate configuration
    let config = if cfg!(debug_assertions) {
        GateConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 = env::var("GATE_SESSION_SECRET")
            .expect("GATE_SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "GATE_SESSION_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        GateConfig {
            session_secret: secret,
            ..GateConfig::default()
        }
    };

    // Auth backend the gate resolves bearer tokens against
    let backend_url =
        env::var("AUTH_BACKEND_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string());
    tracing::info!(backend = %backend_url, "Using auth backend");

    let backend = HttpAuthBackend::new(backend_url);
    let sessions = InMemorySessionRepository::new();
    let store = MemoryStore::new();

    // Periodic cleanup of expired gateway sessions
    // Errors here should not take the server down
    {
        let sessions = sessions.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(3600));
            loop {
                ticker.tick().await;
                if let Err(e) = sessions.cleanup_expired().await {
                    tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
                }
            }
        });
    }

    let state = PortalGateState::new(backend, sessions, store, config);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router: login is open, everything else goes through the gate
    let app = Router::new()
        .route("/login", get(login_page))
        .nest("/session", gate_router(state.clone()))
        .merge(protected_section(&state, "/admin", Some(&[Role::Admin])))
        .merge(protected_section(
            &state,
            "/interviewer",
            Some(&[Role::Interviewer]),
        ))
        .merge(protected_section(
            &state,
            "/hiring-manager",
            Some(&[Role::HiringManager]),
        ))
        .merge(protected_section(
            &state,
            "/candidate",
            Some(&[Role::Candidate]),
        ))
        .merge(protected_section(&state, "/jobs", None))
        .merge(protected_section(&state, "/apply", None))
        .merge(protect(
            Router::new().route("/dashboard", get(generic_dashboard)),
            state.clone(),
            None,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8090));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// One gated section: the base path plus everything under it
///
/// Routes are declared with their full prefix (no nesting) so the gate
/// middleware sees the path the visitor actually requested.
fn protected_section(
    state: &PortalGateState,
    prefix: &'static str,
    allowed_roles: Option<&[Role]>,
) -> Router {
    let wildcard = format!("{prefix}/{{*rest}}");

    let router = Router::new()
        .route(prefix, get(section_page))
        .route(&wildcard, get(section_page));

    protect(router, state.clone(), allowed_roles)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionResponse {
    path: String,
    user: String,
    role: Option<String>,
}

/// Placeholder page for every gated section
async fn section_page(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    uri: Uri,
) -> Json<SectionResponse> {
    Json(SectionResponse {
        path: uri.path().to_string(),
        user: user.full_name(),
        role: user.role.map(|role| role.code().to_string()),
    })
}

/// Generic dashboard, the landing spot when no role-specific one fits
///
/// A visitor lands here when their profile carried a role the portal
/// does not know; that condition is surfaced as a visible error with a
/// return-to-login action instead of a silent blank page.
async fn generic_dashboard(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Response {
    match user.role {
        Some(role) => Json(serde_json::json!({
            "dashboard": role.dashboard_path(),
            "user": user.full_name(),
        }))
        .into_response(),
        None => AppError::unprocessable("Unable to determine your role")
            .with_action("Return to login and sign in again")
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginParams {
    from: Option<String>,
    require_mfa: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPromptResponse {
    from: Option<String>,
    require_mfa: bool,
}

/// Login page contract
///
/// The SPA renders the real form; this endpoint echoes the navigation
/// payload the gate passed along so the page knows where to return and
/// whether to force the MFA step.
async fn login_page(Query(params): Query<LoginParams>) -> Json<LoginPromptResponse> {
    Json(LoginPromptResponse {
        from: params.from,
        require_mfa: params.require_mfa.as_deref() == Some("true"),
    })
}
