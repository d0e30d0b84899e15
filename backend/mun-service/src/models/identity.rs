//! Session identity and role-derived views (navigation, home quick actions)

use crate::error::AppError;
use actix_middleware::AuthenticatedUser;
use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Delegate,
    Chair,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Delegate => "delegate",
            Role::Chair => "chair",
            Role::Admin => "admin",
        }
    }

    /// Human label shown on the home banner
    pub fn label(&self) -> &'static str {
        match self {
            Role::Delegate => "Delegate",
            Role::Chair => "Chair",
            Role::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delegate" => Ok(Role::Delegate),
            "chair" => Ok(Role::Chair),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::Unauthorized(format!("Unknown role: {other}"))),
        }
    }
}

/// Authenticated caller, built from the JWT claims the auth middleware stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub role: Role,
    pub name: String,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_role(&self, allowed: &[Role], message: &str) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(message.to_string()))
        }
    }
}

impl TryFrom<AuthenticatedUser> for Identity {
    type Error = AppError;

    fn try_from(user: AuthenticatedUser) -> Result<Self, Self::Error> {
        Ok(Identity {
            role: user.role.parse()?,
            id: user.id,
            name: user.name,
        })
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => Identity::try_from(user.clone()).map_err(actix_web::Error::from),
            None => Err(AppError::Unauthorized("Please log in to continue".into()).into()),
        };
        ready(result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub to: &'static str,
}

const BASE_NAV: [NavItem; 6] = [
    NavItem { name: "Home", to: "/home" },
    NavItem { name: "Live Updates", to: "/live-updates" },
    NavItem { name: "Glossary", to: "/glossary" },
    NavItem { name: "Resolutions", to: "/resolutions" },
    NavItem { name: "Speech Repository", to: "/speechrepo" },
    NavItem { name: "Messages", to: "/messages" },
];

/// Navigation entries visible to `role`, in display order
pub fn navigation_for(role: Role) -> Vec<NavItem> {
    let mut items = BASE_NAV.to_vec();
    match role {
        Role::Admin => items.push(NavItem {
            name: "Admin Panel",
            to: "/admin",
        }),
        Role::Chair => items.push(NavItem {
            name: "Chair Dashboard",
            to: "/chair",
        }),
        Role::Delegate => {}
    }
    items
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
}

/// Home page shortcuts, identical for every role
pub fn quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction {
            title: "Live Updates",
            description: "Stay informed with real-time conference updates",
            href: "/live-updates",
        },
        QuickAction {
            title: "Speech Repository",
            description: "Manage and organize your speeches",
            href: "/speechrepo",
        },
        QuickAction {
            title: "Resolutions",
            description: "Draft and submit your committee resolutions",
            href: "/resolutions",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(role: Role) -> Vec<&'static str> {
        navigation_for(role).into_iter().map(|n| n.name).collect()
    }

    #[test]
    fn delegate_sees_base_navigation_only() {
        assert_eq!(
            names(Role::Delegate),
            vec![
                "Home",
                "Live Updates",
                "Glossary",
                "Resolutions",
                "Speech Repository",
                "Messages"
            ]
        );
    }

    #[test]
    fn admin_and_chair_get_their_panels() {
        assert_eq!(names(Role::Admin).last(), Some(&"Admin Panel"));
        assert!(!names(Role::Admin).contains(&"Chair Dashboard"));
        assert_eq!(names(Role::Chair).last(), Some(&"Chair Dashboard"));
        assert_eq!(navigation_for(Role::Chair).len(), 7);
    }

    #[test]
    fn role_labels() {
        assert_eq!(Role::Delegate.label(), "Delegate");
        assert_eq!(Role::Chair.label(), "Chair");
        assert_eq!(Role::Admin.label(), "Administrator");
    }

    #[test]
    fn unknown_role_claim_is_unauthorized() {
        let user = AuthenticatedUser {
            id: "0001".into(),
            role: "superuser".into(),
            name: "Eve".into(),
        };
        assert!(matches!(
            Identity::try_from(user),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn require_role_forbids_others() {
        let admin = Identity {
            id: "A1".into(),
            role: Role::Admin,
            name: "Root".into(),
        };
        assert!(admin.require_role(&[Role::Admin], "nope").is_ok());
        let err = admin.require_role(&[Role::Chair], "Chairs only").unwrap_err();
        assert_eq!(err.client_message(), "Chairs only");
    }
}
