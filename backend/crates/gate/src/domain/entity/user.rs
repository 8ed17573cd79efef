//! User Entity
//!
//! Profile snapshot as served by the auth backend's `/auth/me`.
//! Replaced wholesale on every fetch; never mutated locally.

use crate::domain::value_object::role::Role;

/// Authenticated user profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Backend identifier, opaque to the gateway
    pub id: String,
    /// Account email
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Parsed role; `None` when the backend sent an unmapped code,
    /// in which case the generic dashboard sentinel routes the user
    pub role: Option<Role>,
    /// Whether the account has multi-factor auth enabled
    pub mfa_enabled: bool,
}

impl User {
    /// Display name for logging and status responses
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
