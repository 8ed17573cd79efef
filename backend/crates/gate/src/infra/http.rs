//! Auth Backend HTTP Client
//!
//! `reqwest` implementation of the [`AuthBackend`] trait against the
//! external REST backend. A 401 means the backend does not recognize
//! the token; any other failure is transport trouble, not a verdict.

use serde::Deserialize;

use crate::domain::entity::user::User;
use crate::domain::repository::AuthBackend;
use crate::domain::value_object::role::Role;
use crate::error::{GateError, GateResult};

/// HTTP client for the auth backend
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    /// Create a client against a backend base URL (no trailing slash
    /// required)
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("static client options cannot fail");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// `GET /auth/me` response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    role: String,
    #[serde(default)]
    mfa_enabled: bool,
}

impl ProfileResponse {
    fn into_user(self) -> User {
        let role = Role::parse(&self.role);

        if role.is_none() {
            tracing::warn!(raw_role = %self.role, "Profile carries an unrecognized role");
        }

        User {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            mfa_enabled: self.mfa_enabled,
        }
    }
}

impl AuthBackend for HttpAuthBackend {
    async fn fetch_profile(&self, bearer_token: &str) -> GateResult<User> {
        let url = format!("{}/auth/me", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let profile: ProfileResponse = response.json().await?;
                Ok(profile.into_user())
            }
            reqwest::StatusCode::UNAUTHORIZED => Err(GateError::TokenRejected),
            status => Err(GateError::AdoptionFailed(format!(
                "auth backend answered {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_camel_case() {
        let profile: ProfileResponse = serde_json::from_str(
            r#"{
                "id": "u-42",
                "email": "grace@example.com",
                "firstName": "Grace",
                "lastName": "Hopper",
                "role": "ROLE_HIRING_MANAGER",
                "mfaEnabled": true
            }"#,
        )
        .unwrap();

        let user = profile.into_user();
        assert_eq!(user.id, "u-42");
        assert_eq!(user.role, Some(Role::HiringManager));
        assert!(user.mfa_enabled);
        assert_eq!(user.full_name(), "Grace Hopper");
    }

    #[test]
    fn test_profile_unknown_role_maps_to_none() {
        let profile: ProfileResponse = serde_json::from_str(
            r#"{
                "id": "u-7",
                "email": "x@example.com",
                "firstName": "X",
                "lastName": "Y",
                "role": "SUPERVISOR"
            }"#,
        )
        .unwrap();

        let user = profile.into_user();
        assert_eq!(user.role, None);
        assert!(!user.mfa_enabled);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpAuthBackend::new("http://backend:8080/");
        assert_eq!(backend.base_url, "http://backend:8080");
    }
}
