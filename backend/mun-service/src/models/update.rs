//! Live crisis bulletins

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Update {
    #[serde(rename = "updateID")]
    pub update_id: Uuid,
    pub title: String,
    pub content: String,
    pub time: DateTime<Utc>,
    /// Optional image URL
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUpdateRequest {
    #[validate(length(min = 1, max = 200, message = "Update title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Update content is required"))]
    pub content: String,
    #[validate(url(message = "Image link must be a valid URL"))]
    pub href: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_fails_validation() {
        let req = CreateUpdateRequest {
            title: String::new(),
            content: "Crisis escalates".into(),
            href: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn href_must_be_url() {
        let req = CreateUpdateRequest {
            title: "Breaking".into(),
            content: "Crisis escalates".into(),
            href: Some("not a url".into()),
        };
        assert!(req.validate().is_err());

        let req = CreateUpdateRequest {
            href: Some("https://cdn.example.org/map.png".into()),
            ..req
        };
        assert!(req.validate().is_ok());
    }
}
