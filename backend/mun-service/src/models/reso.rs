//! Resolutions and the per-delegate permissions that gate editing them

use super::identity::{Identity, Role};
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Delegate resolution permissions, stored as JSONB with the client's keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResoPerms {
    #[serde(rename = "view:ownreso", default)]
    pub view_own: bool,
    #[serde(rename = "view:allreso", default)]
    pub view_all: bool,
    #[serde(rename = "update:ownreso", default)]
    pub update_own: bool,
    /// Resolution ids this delegate may edit besides their own
    #[serde(rename = "update:reso", default)]
    pub update_reso: Vec<String>,
}

impl ResoPerms {
    /// Add or remove `reso_id` from the editable list. Returns true when granted.
    pub fn toggle_editor(&mut self, reso_id: &str) -> bool {
        if let Some(pos) = self.update_reso.iter().position(|id| id == reso_id) {
            self.update_reso.remove(pos);
            false
        } else {
            self.update_reso.push(reso_id.to_string());
            true
        }
    }

    pub fn can_edit(&self, reso_id: &str) -> bool {
        self.update_reso.iter().any(|id| id == reso_id)
    }

    /// Delegates need `view:ownreso` before they can see, submit or edit anything.
    pub fn require_access(&self) -> Result<(), AppError> {
        if self.view_own {
            Ok(())
        } else {
            Err(AppError::Forbidden(NO_RESO_ACCESS.into()))
        }
    }
}

pub const NO_RESO_ACCESS: &str = "You currently don't have access to submit or edit resolutions. Please contact your chair for approval.";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Reso {
    #[serde(rename = "resoID")]
    pub reso_id: String,
    pub title: String,
    /// Rich-text editor document
    #[schema(value_type = Object)]
    pub content: Value,
    #[serde(rename = "delegateID")]
    pub delegate_id: String,
    #[serde(rename = "committeeID")]
    pub committee_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveResoRequest {
    /// Absent for a new resolution
    #[serde(rename = "resoID", default)]
    pub reso_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[schema(value_type = Object)]
    pub content: Value,
}

/// Committee delegate as listed on the chair's permission panel
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DelegateWithPerms {
    #[serde(rename = "delegateID")]
    pub delegate_id: String,
    pub firstname: String,
    pub lastname: String,
    pub country: String,
    #[serde(rename = "resoPerms")]
    #[sqlx(json)]
    pub reso_perms: ResoPerms,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EditorToggleResponse {
    pub granted: bool,
    pub message: String,
    #[serde(rename = "resoPerms")]
    pub reso_perms: ResoPerms,
}

/// Number of visible characters in an editor document.
///
/// Plain strings count as-is; JSON documents count every `text` leaf.
pub fn reso_text_len(content: &Value) -> usize {
    match content {
        Value::String(s) => s.trim().chars().count(),
        Value::Array(items) => items.iter().map(reso_text_len).sum(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| match (key.as_str(), value) {
                ("text", Value::String(s)) => s.chars().count(),
                (_, Value::Array(_) | Value::Object(_)) => reso_text_len(value),
                _ => 0,
            })
            .sum(),
        _ => 0,
    }
}

/// Resolution being updated, as seen by the write check
#[derive(Debug, Clone)]
pub struct ResoTarget {
    pub reso_id: String,
    pub delegate_id: String,
}

/// Check a create/update request against the caller's freshly loaded permissions.
///
/// `perms` is the caller's permission set when the caller is a delegate;
/// `owned` is how many resolutions the caller already owns.
pub fn authorize_reso_write(
    identity: &Identity,
    perms: Option<&ResoPerms>,
    target: Option<&ResoTarget>,
    title: &str,
    content: &Value,
    owned: i64,
) -> Result<(), AppError> {
    if reso_text_len(content) == 0 {
        return Err(AppError::BadRequest("Resolution length invalid".into()));
    }

    let is_delegate = identity.role == Role::Delegate;
    if !is_delegate && target.is_none() {
        return Err(AppError::Forbidden(
            "Only delegates can post resolutions.".into(),
        ));
    }

    if is_delegate {
        let perms = perms.cloned().unwrap_or_default();
        if let Some(target) = target {
            if target.delegate_id == identity.id && !perms.update_own {
                return Err(AppError::Forbidden(
                    "You do not have permission to post resolutions.".into(),
                ));
            }
            if target.delegate_id != identity.id && !perms.can_edit(&target.reso_id) {
                return Err(AppError::Forbidden(
                    "You can only update your own resolutions.".into(),
                ));
            }
        }
    }

    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Please enter a resolution title".into()));
    }

    if is_delegate && target.is_none() && owned >= 1 {
        return Err(AppError::Conflict(
            "You can only post one resolution as a delegate.".into(),
        ));
    }

    Ok(())
}
