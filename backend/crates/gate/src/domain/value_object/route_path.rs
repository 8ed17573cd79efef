//! Route Path Checks
//!
//! Path predicates built on the canonical role/section table in
//! [`Role`]. Role-agnostic prefixes (job viewing, application flows) are
//! reachable sections for every authenticated user.

use super::role::Role;

/// Prefixes valid for any role
pub const ROLE_AGNOSTIC_PREFIXES: [&str; 2] = ["/apply/", "/jobs/"];

/// Landing path when the user's role could not be determined
///
/// The generic dashboard is responsible for surfacing the condition to
/// the user; routing never fails on an unknown role.
pub const FALLBACK_DASHBOARD: &str = "/dashboard";

/// Whether the path is valid for every role
pub fn is_role_agnostic(path: &str) -> bool {
    ROLE_AGNOSTIC_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// The role whose section this path belongs to, if any
pub fn section_role(path: &str) -> Option<Role> {
    Role::ALL
        .into_iter()
        .find(|role| path.starts_with(role.section_prefix()))
}

/// Whether the path is worth remembering across a login detour
pub fn is_recognized(path: &str) -> bool {
    is_role_agnostic(path) || section_role(path).is_some()
}

/// Default landing path, falling back to the generic dashboard sentinel
pub fn dashboard_path_for(role: Option<Role>) -> &'static str {
    role.map_or(FALLBACK_DASHBOARD, |r| r.dashboard_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_role_agnostic() {
        assert!(is_role_agnostic("/jobs/42"));
        assert!(is_role_agnostic("/apply/42"));
        assert!(!is_role_agnostic("/admin/users"));
        assert!(!is_role_agnostic("/settings"));
    }

    #[test]
    fn test_section_role() {
        assert_eq!(section_role("/admin/users"), Some(Role::Admin));
        assert_eq!(
            section_role("/hiring-manager/reviews"),
            Some(Role::HiringManager)
        );
        assert_eq!(section_role("/candidate/profile"), Some(Role::Candidate));
        assert_eq!(section_role("/jobs/42"), None);
        assert_eq!(section_role("/settings"), None);
        // Section match requires the trailing slash; "/admin" alone is
        // the dashboard, not a remembered in-section path.
        assert_eq!(section_role("/admin"), None);
    }

    #[test]
    fn test_is_recognized() {
        assert!(is_recognized("/admin/users"));
        assert!(is_recognized("/interviewer/schedule"));
        assert!(is_recognized("/jobs/42"));
        assert!(!is_recognized("/settings"));
        assert!(!is_recognized("/"));
    }

    #[test]
    fn test_dashboard_path_for() {
        assert_eq!(dashboard_path_for(Some(Role::Admin)), "/admin");
        assert_eq!(dashboard_path_for(None), FALLBACK_DASHBOARD);
    }
}
