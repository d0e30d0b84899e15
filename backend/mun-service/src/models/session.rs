use super::committee::Committee;
use super::identity::{NavItem, QuickAction, Role};
use super::reso::ResoPerms;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter your password"))]
    pub password: String,
}

/// Account row matched by email at login
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountCredentials {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub password_hash: String,
}

impl AccountCredentials {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(rename = "roleLabel")]
    pub role_label: &'static str,
    pub committee: Option<Committee>,
    /// Delegates only; reloaded on every call
    #[serde(rename = "resoPerms", skip_serializing_if = "Option::is_none")]
    pub reso_perms: Option<ResoPerms>,
    pub navigation: Vec<NavItem>,
    #[serde(rename = "quickActions")]
    pub quick_actions: Vec<QuickAction>,
}
