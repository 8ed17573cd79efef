//! API DTOs (Data Transfer Objects)

use serde::Serialize;

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub email: Option<String>,
    pub role: Option<String>,
    pub mfa_verified: bool,
}

impl SessionStatusResponse {
    /// The status every anonymous visitor gets
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            email: None,
            role: None,
            mfa_verified: false,
        }
    }
}
