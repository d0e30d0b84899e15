//! Personal speech repository

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Speech {
    #[serde(rename = "speechID")]
    pub speech_id: String,
    pub title: String,
    /// Serialized editor document
    pub content: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveSpeechRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SaveSpeechRequest {
    pub fn check(&self) -> Result<(), AppError> {
        if self.content.trim().is_empty() {
            return Err(AppError::BadRequest("Speech content cannot be empty".into()));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("Please enter a speech title".into()));
        }
        Ok(())
    }

    /// Trimmed, non-empty, de-duplicated tags in the order listings return them
    pub fn normalized_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

/// Next speech id: highest numeric id + 1, zero-padded to four digits.
///
/// Non-numeric ids are ignored. A numeric id too large to count past is an
/// error rather than a silent reuse.
pub fn next_speech_id<'a>(
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<String, AppError> {
    let mut max: u64 = 0;
    for id in existing.into_iter().map(str::trim) {
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let n: u64 = id
            .parse()
            .map_err(|_| AppError::Internal(format!("Speech id out of range: {id}")))?;
        max = max.max(n);
    }

    let next = max
        .checked_add(1)
        .ok_or_else(|| AppError::Internal("Speech id space exhausted".into()))?;
    Ok(format!("{next:04}"))
}
