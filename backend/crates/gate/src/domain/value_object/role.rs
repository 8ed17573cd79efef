//! Role Value Object
//!
//! The single canonical role vocabulary and role-to-section mapping.
//! Every piece of role-based path logic goes through this table; the
//! prefixes are written down nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Portal role
///
/// Backends may still send the legacy `RECRUITER` code; [`Role::parse`]
/// accepts it as an alias of `Interviewer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Interviewer,
    HiringManager,
    Candidate,
}

impl Role {
    /// All roles, in a fixed order
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Interviewer,
        Role::HiringManager,
        Role::Candidate,
    ];

    /// Canonical string code
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Interviewer => "INTERVIEWER",
            Role::HiringManager => "HIRING_MANAGER",
            Role::Candidate => "CANDIDATE",
        }
    }

    /// Path prefix of the role's own section
    #[inline]
    pub const fn section_prefix(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/",
            Role::Interviewer => "/interviewer/",
            Role::HiringManager => "/hiring-manager/",
            Role::Candidate => "/candidate/",
        }
    }

    /// Default landing path for the role
    #[inline]
    pub const fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Interviewer => "/interviewer",
            Role::HiringManager => "/hiring-manager",
            Role::Candidate => "/candidate",
        }
    }

    /// Parse a role string as the backend sends it
    ///
    /// Normalization: trims, uppercases, strips a literal `ROLE_` prefix.
    /// Unknown codes yield `None`; callers route those through the
    /// generic dashboard sentinel rather than failing.
    pub fn parse(raw: &str) -> Option<Role> {
        let normalized = raw.trim().to_ascii_uppercase();
        let code = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);

        match code {
            "ADMIN" => Some(Role::Admin),
            "INTERVIEWER" => Some(Role::Interviewer),
            // Legacy vocabulary still in use by older backend builds
            "RECRUITER" => Some(Role::Interviewer),
            "HIRING_MANAGER" => Some(Role::HiringManager),
            "CANDIDATE" => Some(Role::Candidate),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
