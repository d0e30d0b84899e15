use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::identity::Role;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Committee {
    #[serde(rename = "committeeID")]
    pub committee_id: String,
    pub name: String,
    pub abbreviation: String,
}

/// Account an administrator creates for a delegate or chair
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    pub role: Role,
    #[validate(length(min = 1, max = 64, message = "Account id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub firstname: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub lastname: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(rename = "committeeID")]
    #[validate(length(min = 1, message = "Committee is required"))]
    pub committee_id: String,
    /// Delegates only
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedAccount {
    pub id: String,
    pub role: Role,
    pub name: String,
    #[serde(rename = "committeeID")]
    pub committee_id: String,
}
