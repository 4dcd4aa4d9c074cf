//! Role-gated navigation.
//!
//! Pure derivation from session state to the set of visible sections.
//! Nothing here touches the network; link visibility is a courtesy,
//! enforcement belongs to the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role as reported by the backend.
///
/// Any label outside the three known ones maps to `Unknown`, which
/// unlocks no role group. A missing or unrecognized role must never
/// widen the visible surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Resident,
    Admin,
    Security,
    Unknown,
}

/// Labels arriving off the wire or out of the session file all go
/// through [`Role::parse`], so the `Unknown` fallback is the single
/// place odd labels end up.
impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Role::parse(&label))
    }
}

impl Role {
    pub fn parse(label: &str) -> Self {
        match label {
            "resident" => Role::Resident,
            "admin" => Role::Admin,
            "security" => Role::Security,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Resident => "resident",
            Role::Admin => "admin",
            Role::Security => "security",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    AnyAuthenticated,
    Only(Role),
}

/// A navigable section of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub label: &'static str,
    pub access: Access,
}

/// Static route table. Order is presentation order.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        label: "Home",
        access: Access::Public,
    },
    Route {
        path: "/login",
        label: "Login",
        access: Access::Public,
    },
    Route {
        path: "/register",
        label: "Register",
        access: Access::Public,
    },
    Route {
        path: "/dashboard",
        label: "Dashboard",
        access: Access::AnyAuthenticated,
    },
    Route {
        path: "/facility-booking",
        label: "Facility Booking",
        access: Access::Only(Role::Resident),
    },
    Route {
        path: "/complaints",
        label: "Complaints",
        access: Access::Only(Role::Resident),
    },
    Route {
        path: "/payments",
        label: "Payments",
        access: Access::Only(Role::Resident),
    },
    Route {
        path: "/admin/manage-residents",
        label: "Manage Residents",
        access: Access::Only(Role::Admin),
    },
    Route {
        path: "/admin/view-complaints",
        label: "View Complaints",
        access: Access::Only(Role::Admin),
    },
    Route {
        path: "/admin/approve-bookings",
        label: "Approve Bookings",
        access: Access::Only(Role::Admin),
    },
    Route {
        path: "/admin/manage-payments",
        label: "Manage Payments",
        access: Access::Only(Role::Admin),
    },
    Route {
        path: "/admin/notices",
        label: "Notices",
        access: Access::Only(Role::Admin),
    },
    Route {
        path: "/security/visitor-logs",
        label: "Visitor Logs",
        access: Access::Only(Role::Security),
    },
    Route {
        path: "/profile",
        label: "Profile",
        access: Access::AnyAuthenticated,
    },
];

/// Compute the visible link set for the current session state.
///
/// Unauthenticated callers see the public routes. Authenticated
/// callers see the always-visible routes plus the group matching
/// their exact role; `Unknown` or absent role yields only the
/// always-visible set (fail-closed).
pub fn visible_routes(authenticated: bool, role: Option<Role>) -> Vec<&'static Route> {
    ROUTES
        .iter()
        .filter(|route| match route.access {
            Access::Public => !authenticated,
            Access::AnyAuthenticated => authenticated,
            Access::Only(required) => {
                authenticated && role.map(|r| r == required).unwrap_or(false)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(authenticated: bool, role: Option<Role>) -> Vec<&'static str> {
        visible_routes(authenticated, role)
            .iter()
            .map(|r| r.label)
            .collect()
    }

    #[test]
    fn test_unauthenticated_sees_public_only() {
        assert_eq!(labels(false, None), vec!["Home", "Login", "Register"]);
        // A stored role without a token carries no weight
        assert_eq!(
            labels(false, Some(Role::Admin)),
            vec!["Home", "Login", "Register"]
        );
    }

    #[test]
    fn test_resident_links() {
        assert_eq!(
            labels(true, Some(Role::Resident)),
            vec![
                "Dashboard",
                "Facility Booking",
                "Complaints",
                "Payments",
                "Profile"
            ]
        );
    }

    #[test]
    fn test_admin_links() {
        assert_eq!(
            labels(true, Some(Role::Admin)),
            vec![
                "Dashboard",
                "Manage Residents",
                "View Complaints",
                "Approve Bookings",
                "Manage Payments",
                "Notices",
                "Profile"
            ]
        );
    }

    #[test]
    fn test_security_links() {
        assert_eq!(
            labels(true, Some(Role::Security)),
            vec!["Dashboard", "Visitor Logs", "Profile"]
        );
    }

    #[test]
    fn test_unknown_role_fails_closed() {
        assert_eq!(
            labels(true, Some(Role::Unknown)),
            vec!["Dashboard", "Profile"]
        );
        assert_eq!(labels(true, None), vec!["Dashboard", "Profile"]);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        for role in [
            None,
            Some(Role::Resident),
            Some(Role::Admin),
            Some(Role::Security),
            Some(Role::Unknown),
        ] {
            assert_eq!(labels(true, role), labels(true, role));
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("resident"), Role::Resident);
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("security"), Role::Security);
        assert_eq!(Role::parse("landlord"), Role::Unknown);
        assert_eq!(Role::parse(""), Role::Unknown);
        assert_eq!(Role::parse("Admin"), Role::Unknown);
    }

    #[test]
    fn test_role_labels_round_trip() {
        for role in [Role::Resident, Role::Admin, Role::Security] {
            assert_eq!(Role::parse(role.as_str()), role);
        }
    }

    #[test]
    fn test_role_deserializes_through_parse() {
        let role: Role = serde_json::from_str("\"security\"").unwrap();
        assert_eq!(role, Role::Security);

        // Unrecognized and wrong-case labels land on Unknown instead
        // of failing the whole payload
        let role: Role = serde_json::from_str("\"caretaker\"").unwrap();
        assert_eq!(role, Role::Unknown);
        let role: Role = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, Role::Unknown);
    }
}
